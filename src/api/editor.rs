use std::path::Path;

use tracing::{debug, warn};

use crate::core::{ChartControl, Series};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartService;

use super::{
    CategoryIndex, EditSession, EditorConfig, EntryId, RawInput, SeriesSelection, SkippedEntry,
    StagedEntry, build_catalog, remove_series_with_axis,
};

/// Outcome of one apply: commit counts plus the refresh result.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyReport {
    pub applied: usize,
    pub skipped: Vec<SkippedEntry>,
    pub refresh_error: Option<ChartError>,
}

impl ApplyReport {
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Applied {} property changes successfully.", self.applied)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.refresh_error.is_none()
    }
}

/// Property-sheet controller over one chart configuration graph.
///
/// Owns the graph, the current catalog (as an edit session), its category
/// index and the series focus. Every series-set change rebuilds the
/// catalog and re-applies the focus.
pub struct ChartPropertiesEditor<S: ChartService> {
    service: S,
    chart: ChartControl,
    config: EditorConfig,
    session: EditSession,
    index: CategoryIndex,
    selection: SeriesSelection,
}

impl<S: ChartService> ChartPropertiesEditor<S> {
    pub fn new(service: S, chart: ChartControl, config: EditorConfig) -> ChartResult<Self> {
        config.validate()?;
        let session = EditSession::new(Default::default(), config.max_bin_count);
        let mut editor = Self {
            service,
            chart,
            config,
            session,
            index: CategoryIndex::default(),
            selection: SeriesSelection::All,
        };
        editor.rebuild();
        Ok(editor)
    }

    /// Rebuilds the catalog from the graph. Pending edits are discarded.
    pub fn rebuild(&mut self) {
        let catalog = build_catalog(&mut self.chart, &self.config);
        self.index = CategoryIndex::build(
            catalog
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| (EntryId(index), entry)),
        );
        self.session = EditSession::new(catalog, self.config.max_bin_count);
        if let SeriesSelection::Series(index) = self.selection {
            if index >= self.chart.series_count() {
                self.selection = SeriesSelection::All;
            }
        }
        self.apply_visibility();
        debug!(
            entries = self.session.len(),
            categories = self.index.categories().len(),
            selection = self.selection.to_index(),
            "rebuilt property editor"
        );
    }

    pub fn select_series(&mut self, selection: SeriesSelection) -> ChartResult<()> {
        if let SeriesSelection::Series(index) = selection {
            let count = self.chart.series_count();
            if index >= count {
                return Err(ChartError::InvalidData(format!(
                    "series index {index} is out of range for {count} series"
                )));
            }
        }
        self.selection = selection;
        self.apply_visibility();
        Ok(())
    }

    fn apply_visibility(&mut self) {
        let session = &self.session;
        self.index
            .apply_selection(self.selection, |id| session.entry(id));
    }

    pub fn stage(&mut self, id: EntryId, raw: impl Into<RawInput>) -> ChartResult<()> {
        self.session.set_staged(id, raw)
    }

    /// Stages an edit for the entry with the given full display name.
    pub fn stage_by_name(&mut self, name: &str, raw: impl Into<RawInput>) -> ChartResult<()> {
        let id = self
            .session
            .find(name)
            .ok_or_else(|| ChartError::InvalidData(format!("no catalog entry named `{name}`")))?;
        self.session.set_staged(id, raw)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<EntryId> {
        self.session.find(name)
    }

    /// Commits every changed, valid edit and asks the service to refresh.
    ///
    /// A failing refresh does not undo the commit; it is reported alongside
    /// the commit counts.
    pub fn apply(&mut self) -> ApplyReport {
        let outcome = self.session.commit_all(&mut self.chart);
        let refresh_error = match self.service.refresh(&self.chart) {
            Ok(()) => None,
            Err(err) => {
                warn!(error = %err, "chart refresh failed after apply");
                Some(err)
            }
        };
        let report = ApplyReport {
            applied: outcome.applied,
            skipped: outcome.skipped,
            refresh_error,
        };
        debug!(
            applied = report.applied,
            skipped = report.skipped.len(),
            refreshed = report.refresh_error.is_none(),
            "{}",
            report.summary()
        );
        report
    }

    pub fn discard_changes(&mut self) {
        self.session.discard();
    }

    /// Appends a series and returns its index.
    pub fn add_series(&mut self, series: Series) -> usize {
        let diagram = self.chart.ensure_diagram();
        diagram.series.push(series);
        let index = diagram.series.len() - 1;
        self.rebuild();
        index
    }

    pub fn remove_series(&mut self, series_index: usize) -> ChartResult<Series> {
        let diagram = self
            .chart
            .diagram
            .as_mut()
            .ok_or_else(|| ChartError::UnknownNode("diagram".to_owned()))?;
        let removed = remove_series_with_axis(diagram, series_index, &self.config)?;
        self.selection = match self.selection {
            SeriesSelection::Series(index) if index == series_index => SeriesSelection::All,
            SeriesSelection::Series(index) if index > series_index => {
                SeriesSelection::Series(index - 1)
            }
            other => other,
        };
        self.rebuild();
        Ok(removed)
    }

    /// Replaces the graph with a stored layout and rebuilds the catalog.
    pub fn load_layout(&mut self, path: &Path) -> ChartResult<()> {
        self.chart = self.service.load_layout(path)?;
        self.rebuild();
        Ok(())
    }

    /// Saves the committed graph; staged edits are not included.
    pub fn save_layout(&mut self, path: &Path) -> ChartResult<()> {
        self.service.save_layout(&self.chart, path)
    }

    /// Staged entries visible under the current series focus, in category
    /// then name order.
    pub fn visible_entries(&self) -> impl Iterator<Item = (EntryId, &StagedEntry)> + '_ {
        self.index
            .categories()
            .iter()
            .filter(|category| category.visible)
            .flat_map(|category| category.visible_members())
            .filter_map(|id| self.session.get(id).map(|staged| (id, staged)))
    }

    #[must_use]
    pub fn chart(&self) -> &ChartControl {
        &self.chart
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn session(&self) -> &EditSession {
        &self.session
    }

    #[must_use]
    pub fn index(&self) -> &CategoryIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut CategoryIndex {
        &mut self.index
    }

    #[must_use]
    pub fn selection(&self) -> SeriesSelection {
        self.selection
    }

    #[must_use]
    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn service_mut(&mut self) -> &mut S {
        &mut self.service
    }

    #[must_use]
    pub fn into_parts(self) -> (S, ChartControl) {
        (self.service, self.chart)
    }
}
