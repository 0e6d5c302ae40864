mod layout_contract;
mod null_service;

pub use layout_contract::{CHART_LAYOUT_JSON_SCHEMA_V1, ChartLayoutJsonContractV1};
pub use null_service::NullChartService;

use std::path::Path;

use crate::core::ChartControl;
use crate::error::ChartResult;

/// Contract implemented by the charting backend hosting the edited graph.
///
/// The editor never draws and never touches storage itself; it hands the
/// graph to the service after a commit and delegates layout persistence.
pub trait ChartService {
    /// Recomputes rendering state from the current configuration.
    fn refresh(&mut self, chart: &ChartControl) -> ChartResult<()>;

    fn load_layout(&mut self, path: &Path) -> ChartResult<ChartControl>;

    fn save_layout(&mut self, chart: &ChartControl, path: &Path) -> ChartResult<()>;
}
