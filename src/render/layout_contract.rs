use serde::{Deserialize, Serialize};

use crate::core::ChartControl;
use crate::error::{ChartError, ChartResult};

pub const CHART_LAYOUT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartLayoutJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartControl,
}

impl ChartControl {
    pub fn to_layout_json_pretty(&self) -> ChartResult<String> {
        let payload = ChartLayoutJsonContractV1 {
            schema_version: CHART_LAYOUT_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| ChartError::Layout(format!("failed to serialize layout contract v1: {e}")))
    }

    /// Accepts both the versioned contract and a bare serialized chart.
    pub fn from_layout_json_str(input: &str) -> ChartResult<Self> {
        if let Ok(chart) = serde_json::from_str::<ChartControl>(input) {
            return Ok(chart);
        }
        let payload: ChartLayoutJsonContractV1 = serde_json::from_str(input)
            .map_err(|e| ChartError::Layout(format!("failed to parse layout json payload: {e}")))?;
        if payload.schema_version != CHART_LAYOUT_JSON_SCHEMA_V1 {
            return Err(ChartError::Layout(format!(
                "unsupported layout schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}
