use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Tunables for catalog building and edit validation.
///
/// Serializable so hosts can keep editor preferences next to their own
/// settings; missing fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Upper bound accepted for a bin count. A performance guard, not a
    /// platform limit.
    #[serde(default = "default_max_bin_count")]
    pub max_bin_count: u32,
    /// Default bin count when the first series has no points yet.
    #[serde(default = "default_fallback_bin_count")]
    pub fallback_bin_count: u32,
    /// Bin count shown for count-interval scales whose count is unset.
    #[serde(default = "default_displayed_bin_count_fallback")]
    pub displayed_bin_count_fallback: u32,
    /// Prefix of the deterministic secondary-axis name; the series index is appended.
    #[serde(default = "default_secondary_axis_prefix")]
    pub secondary_axis_prefix: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_bin_count: default_max_bin_count(),
            fallback_bin_count: default_fallback_bin_count(),
            displayed_bin_count_fallback: default_displayed_bin_count_fallback(),
            secondary_axis_prefix: default_secondary_axis_prefix(),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_bin_count(mut self, max_bin_count: u32) -> Self {
        self.max_bin_count = max_bin_count;
        self
    }

    #[must_use]
    pub fn with_fallback_bin_count(mut self, fallback_bin_count: u32) -> Self {
        self.fallback_bin_count = fallback_bin_count;
        self
    }

    #[must_use]
    pub fn with_displayed_bin_count_fallback(mut self, count: u32) -> Self {
        self.displayed_bin_count_fallback = count;
        self
    }

    #[must_use]
    pub fn with_secondary_axis_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.secondary_axis_prefix = prefix.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.max_bin_count == 0 || self.max_bin_count > i32::MAX as u32 {
            return Err(ChartError::InvalidConfig(
                "max_bin_count must be within [1, i32::MAX]".to_owned(),
            ));
        }
        for (name, value) in [
            ("fallback_bin_count", self.fallback_bin_count),
            (
                "displayed_bin_count_fallback",
                self.displayed_bin_count_fallback,
            ),
        ] {
            if value == 0 || value > self.max_bin_count {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be within [1, max_bin_count]"
                )));
            }
        }
        if self.secondary_axis_prefix.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "secondary_axis_prefix must not be empty".to_owned(),
            ));
        }
        Ok(())
    }

    /// Deterministic name of the secondary axis dedicated to `series_index`.
    #[must_use]
    pub fn secondary_axis_name(&self, series_index: usize) -> String {
        format!("{}{series_index}", self.secondary_axis_prefix)
    }

    pub(crate) fn fallback_bin_count_i32(&self) -> i32 {
        i32::try_from(self.fallback_bin_count).unwrap_or(i32::MAX)
    }

    pub(crate) fn displayed_bin_count_fallback_i32(&self) -> i32 {
        i32::try_from(self.displayed_bin_count_fallback).unwrap_or(i32::MAX)
    }
}

fn default_max_bin_count() -> u32 {
    1000
}

fn default_fallback_bin_count() -> u32 {
    10
}

fn default_displayed_bin_count_fallback() -> u32 {
    15
}

fn default_secondary_axis_prefix() -> String {
    "HistAxisX_Series".to_owned()
}

#[cfg(test)]
mod tests {
    use super::EditorConfig;

    #[test]
    fn defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_bin_count, 1000);
        assert_eq!(config.secondary_axis_name(3), "HistAxisX_Series3");
    }

    #[test]
    fn fallback_above_max_is_rejected() {
        let config = EditorConfig::default()
            .with_max_bin_count(5)
            .with_displayed_bin_count_fallback(5);
        let err = config.validate().expect_err("fallback 10 > max 5");
        assert!(format!("{err}").contains("fallback_bin_count"));
    }

    #[test]
    fn empty_prefix_is_rejected() {
        let config = EditorConfig::default().with_secondary_axis_prefix("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"max_bin_count": 250}"#).expect("parse config");
        assert_eq!(config.max_bin_count, 250);
        assert_eq!(config.fallback_bin_count, 10);
        assert_eq!(config.secondary_axis_prefix, "HistAxisX_Series");
    }
}
