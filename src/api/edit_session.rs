use std::collections::HashMap;

use tracing::{debug, warn};

use crate::core::{ChartControl, PropertyValue, ValueKind};
use crate::error::{ChartError, ChartResult};

use super::validation::{ValidationError, validate_staged};
use super::{Accessor, Catalog, CatalogEntry, EntryId, RawInput, coerce};

/// Editor widget a property sheet should use for an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    Boolean,
    Enumeration,
    Text,
}

/// A catalog entry with its pending edit.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedEntry {
    entry: CatalogEntry,
    staged: RawInput,
}

impl StagedEntry {
    fn new(entry: CatalogEntry) -> Self {
        let staged = RawInput::Value(entry.value.clone());
        Self { entry, staged }
    }

    #[must_use]
    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    #[must_use]
    pub fn staged(&self) -> &RawInput {
        &self.staged
    }

    #[must_use]
    pub fn editor_kind(&self) -> EditorKind {
        match self.entry.declared.kind {
            ValueKind::Boolean => EditorKind::Boolean,
            ValueKind::Enumeration(_) => EditorKind::Enumeration,
            _ => EditorKind::Text,
        }
    }

    /// Choices offered by an enumeration editor, in declaration order.
    #[must_use]
    pub fn choices(&self) -> &'static [&'static str] {
        match self.entry.declared.kind {
            ValueKind::Enumeration(spec) => spec.variants,
            _ => &[],
        }
    }

    /// `true` when the staged edit differs from the current value.
    ///
    /// Text that parses to the current value counts as unchanged; text that
    /// does not parse at all always counts as changed.
    #[must_use]
    pub fn has_changed(&self) -> bool {
        if let RawInput::Value(value) = &self.staged {
            if *value == self.entry.value {
                return false;
            }
        }
        match coerce(&self.staged, self.entry.declared) {
            Ok(value) => value != self.entry.value,
            Err(_) => true,
        }
    }

    pub fn validate(&self, max_bin_count: u32) -> Result<(), ValidationError> {
        validate_staged(self.entry.role, &self.staged, max_bin_count)
    }
}

/// Why an entry was left out of a commit.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    Validation(ValidationError),
    Coercion(ChartError),
    Write(ChartError),
    /// Another entry backed by the same field was committed earlier in
    /// the batch.
    SharedField { committed: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedEntry {
    pub id: EntryId,
    pub name: String,
    pub reason: SkipReason,
}

/// Result of writing staged edits back to the configuration graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitOutcome {
    pub applied: usize,
    pub skipped: Vec<SkippedEntry>,
}

/// Holds editable copies of catalog values until they are committed.
///
/// Edits are stored uninterpreted; coercion and validation happen on
/// commit. Dropping the session discards every pending edit.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    entries: Vec<StagedEntry>,
    max_bin_count: u32,
}

impl EditSession {
    #[must_use]
    pub fn new(catalog: Catalog, max_bin_count: u32) -> Self {
        Self {
            entries: catalog
                .into_entries()
                .into_iter()
                .map(StagedEntry::new)
                .collect(),
            max_bin_count,
        }
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
    pub fn get(&self, id: EntryId) -> Option<&StagedEntry> {
        self.entries.get(id.0)
    }

    #[must_use]
    pub fn entry(&self, id: EntryId) -> Option<&CatalogEntry> {
        self.get(id).map(StagedEntry::entry)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &StagedEntry)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, staged)| (EntryId(index), staged))
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.entries
            .iter()
            .position(|staged| staged.entry.name == name)
            .map(EntryId)
    }

    /// Stores a raw edit for `id` without interpreting it.
    pub fn set_staged(&mut self, id: EntryId, raw: impl Into<RawInput>) -> ChartResult<()> {
        let staged = self
            .entries
            .get_mut(id.0)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown catalog entry {}", id.0)))?;
        staged.staged = raw.into();
        Ok(())
    }

    #[must_use]
    pub fn has_changed(&self, id: EntryId) -> bool {
        self.get(id).is_some_and(StagedEntry::has_changed)
    }

    /// `None` for unknown ids; otherwise the entry's rule outcome.
    #[must_use]
    pub fn validate(&self, id: EntryId) -> Option<Result<(), ValidationError>> {
        self.get(id).map(|staged| staged.validate(self.max_bin_count))
    }

    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.entries.iter().filter(|staged| staged.has_changed()).count()
    }

    /// Resets every staged value to its entry's current value.
    pub fn discard(&mut self) {
        for staged in &mut self.entries {
            staged.staged = RawInput::Value(staged.entry.value.clone());
        }
    }

    /// Re-reads current values from the graph. Entries sharing a backing
    /// field pick up each other's commits; pending edits are kept.
    pub fn sync_values(&mut self, chart: &ChartControl) {
        for staged in &mut self.entries {
            let Ok(value) = staged.entry.target.accessor().read(chart) else {
                continue;
            };
            if value == staged.entry.value || !staged.entry.declared.accepts(value.as_ref()) {
                continue;
            }
            let pending = staged.has_changed();
            staged.entry.value = value.clone();
            if !pending {
                staged.staged = RawInput::Value(value);
            }
        }
    }

    /// Writes every changed and valid entry back through its accessor.
    ///
    /// Each entry is written completely or not at all. A failing entry is
    /// recorded and skipped; the remaining entries are still committed.
    /// When two changed entries share a backing field, the first one in
    /// catalog order is written and the other is skipped. Cached values are
    /// re-read afterwards so twin entries reflect the write.
    pub fn commit_all(&mut self, chart: &mut ChartControl) -> CommitOutcome {
        let mut outcome = CommitOutcome::default();
        let mut written: HashMap<Accessor, String> = HashMap::new();
        for (index, staged) in self.entries.iter_mut().enumerate() {
            if !staged.has_changed() {
                continue;
            }
            let id = EntryId(index);
            let backing = staged.entry.target.accessor();
            let reason = if let Some(committed) = written.get(backing) {
                SkipReason::SharedField {
                    committed: committed.clone(),
                }
            } else {
                match commit_entry(staged, chart, self.max_bin_count) {
                    Ok(()) => {
                        written.insert(
                            staged.entry.target.accessor().clone(),
                            staged.entry.name.clone(),
                        );
                        outcome.applied += 1;
                        continue;
                    }
                    Err(reason) => reason,
                }
            };
            warn!(entry = %staged.entry.name, reason = ?reason, "skipping staged edit");
            outcome.skipped.push(SkippedEntry {
                id,
                name: staged.entry.name.clone(),
                reason,
            });
        }
        if outcome.applied > 0 {
            self.sync_values(chart);
        }
        debug!(
            applied = outcome.applied,
            skipped = outcome.skipped.len(),
            "committed staged edits"
        );
        outcome
    }
}

fn commit_entry(
    staged: &mut StagedEntry,
    chart: &mut ChartControl,
    max_bin_count: u32,
) -> Result<(), SkipReason> {
    staged
        .validate(max_bin_count)
        .map_err(SkipReason::Validation)?;
    let value: Option<PropertyValue> =
        coerce(&staged.staged, staged.entry.declared).map_err(SkipReason::Coercion)?;
    staged
        .entry
        .target
        .write(chart, value.clone())
        .map_err(SkipReason::Write)?;
    staged.entry.value = value.clone();
    staged.staged = RawInput::Value(value);
    Ok(())
}

