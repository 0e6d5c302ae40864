use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{ChartControl, SeriesBins, compute_diagram_bins};
use crate::error::{ChartError, ChartResult};
use crate::render::ChartService;

/// Headless chart service used by tests and hosts without a widget.
///
/// `refresh` still derives the histogram bins of every series so tests can
/// observe what a real backend would draw. Layouts live in memory as JSON
/// documents keyed by path.
#[derive(Debug, Default)]
pub struct NullChartService {
    pub refresh_count: usize,
    pub last_bins: Vec<SeriesBins>,
    layouts: HashMap<PathBuf, String>,
}

impl NullChartService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored JSON document for `path`, if any.
    #[must_use]
    pub fn layout_json(&self, path: &Path) -> Option<&str> {
        self.layouts.get(path).map(String::as_str)
    }

    pub fn insert_layout_json(&mut self, path: impl Into<PathBuf>, json: impl Into<String>) {
        self.layouts.insert(path.into(), json.into());
    }
}

impl ChartService for NullChartService {
    /// Series whose axis cannot be binned are left out of `last_bins`; the
    /// first such failure is returned once every other series is binned.
    fn refresh(&mut self, chart: &ChartControl) -> ChartResult<()> {
        let results = chart
            .diagram
            .as_ref()
            .map(compute_diagram_bins)
            .unwrap_or_default();
        let mut bins = Vec::with_capacity(results.len());
        let mut first_error = None;
        for result in results {
            match result {
                Ok(series_bins) => bins.push(series_bins),
                Err(err) => {
                    warn!(error = %err, "skipping series bins");
                    first_error.get_or_insert(err);
                }
            }
        }
        self.refresh_count += 1;
        debug!(
            refresh_count = self.refresh_count,
            binned_series = bins.len(),
            "refreshed headless chart"
        );
        self.last_bins = bins;
        first_error.map_or(Ok(()), Err)
    }

    fn load_layout(&mut self, path: &Path) -> ChartResult<ChartControl> {
        let json = self
            .layouts
            .get(path)
            .ok_or_else(|| ChartError::Layout(format!("no layout stored at {}", path.display())))?;
        ChartControl::from_layout_json_str(json)
    }

    fn save_layout(&mut self, chart: &ChartControl, path: &Path) -> ChartResult<()> {
        let json = chart.to_layout_json_pretty()?;
        self.layouts.insert(path.to_path_buf(), json);
        Ok(())
    }
}
