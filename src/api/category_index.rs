use indexmap::IndexMap;

use crate::error::{ChartError, ChartResult};

use super::{CatalogEntry, CategoryKey, CategoryKind, EntryId};

/// Current series focus of the property sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SeriesSelection {
    #[default]
    All,
    Series(usize),
}

impl SeriesSelection {
    /// Maps a selector index where `-1` stands for "all series".
    pub fn from_index(index: i64) -> ChartResult<Self> {
        match index {
            -1 => Ok(Self::All),
            index if index >= 0 => usize::try_from(index)
                .map(Self::Series)
                .map_err(|_| ChartError::InvalidData(format!("series index {index} is too large"))),
            index => Err(ChartError::InvalidData(format!(
                "series selection index must be -1 or >= 0, got {index}"
            ))),
        }
    }

    #[must_use]
    pub fn to_index(self) -> i64 {
        match self {
            Self::All => -1,
            Self::Series(index) => i64::try_from(index).unwrap_or(i64::MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryMember {
    pub id: EntryId,
    pub visible: bool,
}

/// Named group of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: CategoryKey,
    pub name: String,
    pub header: String,
    pub expanded: bool,
    pub visible: bool,
    pub members: Vec<CategoryMember>,
}

impl Category {
    pub fn visible_members(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.members
            .iter()
            .filter(|member| member.visible)
            .map(|member| member.id)
    }
}

/// Categories ordered by name, members ordered by entry name.
///
/// Selection only toggles visibility flags; members are never added,
/// removed or reordered after `build`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex {
    categories: Vec<Category>,
}

impl CategoryIndex {
    #[must_use]
    pub fn build<'a>(entries: impl IntoIterator<Item = (EntryId, &'a CatalogEntry)>) -> Self {
        let mut groups: IndexMap<CategoryKey, Vec<(EntryId, &CatalogEntry)>> = IndexMap::new();
        for (id, entry) in entries {
            groups.entry(entry.category).or_default().push((id, entry));
        }

        let mut categories: Vec<Category> = groups
            .into_iter()
            .map(|(key, mut members)| {
                members.sort_by(|(_, left), (_, right)| left.name.cmp(&right.name));
                let name = key.display_name();
                Category {
                    key,
                    header: format!("{name} ({} properties)", members.len()),
                    name,
                    expanded: key.expanded_by_default(),
                    visible: true,
                    members: members
                        .into_iter()
                        .map(|(id, _)| CategoryMember { id, visible: true })
                        .collect(),
                }
            })
            .collect();
        categories.sort_by(|left, right| left.name.cmp(&right.name));
        Self { categories }
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn categories_mut(&mut self) -> &mut [Category] {
        &mut self.categories
    }

    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name == name)
    }

    /// Sets the UI expansion hint of a category. Returns `false` when absent.
    pub fn set_expanded(&mut self, name: &str, expanded: bool) -> bool {
        match self
            .categories
            .iter_mut()
            .find(|category| category.name == name)
        {
            Some(category) => {
                category.expanded = expanded;
                true
            }
            None => false,
        }
    }

    /// Whether `id` is currently visible: its member flag and its category.
    #[must_use]
    pub fn is_entry_visible(&self, id: EntryId) -> bool {
        self.categories.iter().any(|category| {
            category.visible
                && category
                    .members
                    .iter()
                    .any(|member| member.id == id && member.visible)
        })
    }

    /// Applies a series focus. `lookup` returns the entry for an id.
    ///
    /// - all series: everything visible
    /// - series `i`: histogram groups only for `i`; axis and scale groups for
    ///   `i` or shared; generic series entries only those tagged `i` (the
    ///   category hides when none remain); everything else stays visible
    pub fn apply_selection<'a, F>(&mut self, selection: SeriesSelection, lookup: F)
    where
        F: Fn(EntryId) -> Option<&'a CatalogEntry>,
    {
        for category in &mut self.categories {
            let SeriesSelection::Series(selected) = selection else {
                category.visible = true;
                for member in &mut category.members {
                    member.visible = true;
                }
                continue;
            };

            match category.key.kind {
                CategoryKind::Histogram => {
                    category.visible = category.key.series == Some(selected);
                    set_all_members(category, true);
                }
                CategoryKind::Axes | CategoryKind::ScaleOptions => {
                    category.visible = category
                        .key
                        .series
                        .is_none_or(|series| series == selected);
                    set_all_members(category, true);
                }
                CategoryKind::Series => {
                    for member in &mut category.members {
                        member.visible = lookup(member.id)
                            .is_some_and(|entry| entry.series == Some(selected));
                    }
                    category.visible = category.members.iter().any(|member| member.visible);
                }
                CategoryKind::Chart | CategoryKind::Diagram => {
                    category.visible = true;
                    set_all_members(category, true);
                }
            }
        }
    }
}

fn set_all_members(category: &mut Category, visible: bool) {
    for member in &mut category.members {
        member.visible = visible;
    }
}
