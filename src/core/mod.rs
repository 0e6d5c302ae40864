pub mod chart;
pub mod choices;
pub mod fields;
pub mod histogram_bins;
pub mod types;
pub mod value;

pub use chart::{
    Axis, AxisBinding, AxisSlot, ChartControl, ContinuousScaleOptions, CountIntervalScaleOptions,
    PRIMARY_AXIS_X_NAME, PRIMARY_AXIS_Y_NAME, ScaleOptions, Series, XyDiagram,
};
pub use choices::{AggregateFunction, AnimationMode, AxisAlignment, PaneOrientation, SeriesView};
pub use fields::{FieldAccess, FieldRole, FieldSpec, PropertySource};
pub use histogram_bins::{
    BinKind, HistogramBin, SeriesBins, compute_diagram_bins, compute_histogram_bins,
};
pub use types::DataPoint;
pub use value::{ChoiceEnum, DeclaredType, EnumSpec, PropertyValue, ValueKind};
