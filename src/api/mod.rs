mod accessor;
mod axis_allocation;
mod catalog;
mod catalog_builder;
mod category_index;
mod coercion;
mod edit_session;
mod editor;
mod editor_config;
mod validation;

pub use accessor::{Accessor, NodeRef};
pub use axis_allocation::{
    default_bin_count, ensure_bin_scale_options, get_or_create_axis_for_series,
    remove_series_with_axis,
};
pub use catalog::{
    BinSetting, Catalog, CatalogEntry, CategoryKey, CategoryKind, EntryId, EntryTarget,
};
pub use catalog_builder::build_catalog;
pub use category_index::{Category, CategoryIndex, CategoryMember, SeriesSelection};
pub use coercion::{RawInput, coerce};
pub use edit_session::{
    CommitOutcome, EditSession, EditorKind, SkipReason, SkippedEntry, StagedEntry,
};
pub use editor::{ApplyReport, ChartPropertiesEditor};
pub use editor_config::EditorConfig;
pub use validation::{ValidationError, validate_staged};
