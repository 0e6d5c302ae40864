use std::fmt;

use crate::core::{ChartControl, DeclaredType, FieldRole, PropertyValue};
use crate::error::ChartResult;

use super::Accessor;

/// Position of an entry in its catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryKind {
    Chart,
    Diagram,
    Series,
    Axes,
    ScaleOptions,
    Histogram,
}

impl CategoryKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Chart => "Chart",
            Self::Diagram => "Diagram",
            Self::Series => "Series",
            Self::Axes => "Axes",
            Self::ScaleOptions => "Scale Options",
            Self::Histogram => "Histogram",
        }
    }
}

/// Structured category identity: a kind plus the series it belongs to.
///
/// Axis, scale and histogram categories are split per series; shared
/// categories (the Y axis, chart and diagram settings) carry no series.
/// The generic `Series` category is never split; its entries carry the
/// series tag instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryKey {
    pub kind: CategoryKind,
    pub series: Option<usize>,
}

impl CategoryKey {
    #[must_use]
    pub fn shared(kind: CategoryKind) -> Self {
        Self { kind, series: None }
    }

    #[must_use]
    pub fn for_series(kind: CategoryKind, series_index: usize) -> Self {
        Self {
            kind,
            series: Some(series_index),
        }
    }

    /// Display name, e.g. `"Scale Options"` or `"Histogram - Series 2"`.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.series {
            Some(index) => format!("{} - Series {}", self.kind.label(), index + 1),
            None => self.kind.label().to_owned(),
        }
    }

    #[must_use]
    pub fn expanded_by_default(&self) -> bool {
        match self.kind {
            CategoryKind::Histogram => true,
            CategoryKind::ScaleOptions => self.series.is_none(),
            _ => false,
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

/// Histogram settings surfaced as dedicated entries per series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinSetting {
    Count,
    Underflow,
    Overflow,
    Aggregation,
}

impl BinSetting {
    pub const ALL: [Self; 4] = [Self::Count, Self::Underflow, Self::Overflow, Self::Aggregation];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "Bin Count",
            Self::Underflow => "Underflow Value",
            Self::Overflow => "Overflow Value",
            Self::Aggregation => "Aggregation Mode",
        }
    }

    /// Scale-options field that stores the setting.
    #[must_use]
    pub fn backing_field(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Underflow => "Underflow Value",
            Self::Overflow => "Overflow Value",
            Self::Aggregation => "Aggregate Function",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Count => "Number of bins for histogram",
            Self::Underflow => "Values below this go into the underflow bin",
            Self::Overflow => "Values above this go into the overflow bin",
            Self::Aggregation => "Aggregation applied to values falling into each bin",
        }
    }

    #[must_use]
    pub fn role(self) -> FieldRole {
        match self {
            Self::Count => FieldRole::BinCount,
            Self::Underflow | Self::Overflow => FieldRole::BinThreshold,
            Self::Aggregation => FieldRole::Plain,
        }
    }
}

/// Where a committed value is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntryTarget {
    /// A field read straight off a configuration node.
    Field(Accessor),
    /// A derived entry presented with its own type; writes go to the
    /// backing scale-options field.
    Synthetic {
        setting: BinSetting,
        backing: Accessor,
    },
}

impl EntryTarget {
    #[must_use]
    pub fn accessor(&self) -> &Accessor {
        match self {
            Self::Field(accessor) | Self::Synthetic { backing: accessor, .. } => accessor,
        }
    }

    pub fn write(&self, chart: &mut ChartControl, value: Option<PropertyValue>) -> ChartResult<()> {
        self.accessor().write(chart, value)
    }
}

/// One editable setting.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub category: CategoryKey,
    pub value: Option<PropertyValue>,
    pub declared: DeclaredType,
    pub description: String,
    pub role: FieldRole,
    /// Series the entry belongs to, if any.
    pub series: Option<usize>,
    pub target: EntryTarget,
}

impl CatalogEntry {
    /// Text after the last `" - "` separator of the display name.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.name
            .rsplit_once(" - ")
            .map_or(self.name.as_str(), |(_, short)| short)
    }

    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        matches!(self.target, EntryTarget::Synthetic { .. })
    }
}

/// Flat, ordered list of catalog entries for one configuration graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.entries.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|entry| entry.name == name)
            .map(EntryId)
    }

    pub fn ids(&self) -> impl Iterator<Item = EntryId> + '_ {
        (0..self.entries.len()).map(EntryId)
    }

    /// `(category, name, value)` tuples, the identity of a catalog build.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, String, Option<PropertyValue>)> {
        self.entries
            .iter()
            .map(|entry| {
                (
                    entry.category.display_name(),
                    entry.name.clone(),
                    entry.value.clone(),
                )
            })
            .collect()
    }

    pub(crate) fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}
