// crates/regionmap-core/src/config.rs

//! # Engine Configuration

use crate::labels::DEFAULT_MIN_SEPARATION;
use serde::{Deserialize, Serialize};

/// Property key most village-level boundary files use for the display name.
pub const DEFAULT_LABEL_FIELD: &str = "NAMOBJ";

/// Padding, in pixels, kept around the data when fitting the viewport.
pub const DEFAULT_FIT_PADDING: [u32; 2] = [20, 20];

/// Engine-wide settings. Per-dataset settings live in [`DatasetSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Minimum distance between two label anchors, in coordinate degrees.
    pub min_label_separation: f64,
    pub fit_padding: [u32; 2],
    /// Quiet period before a burst of resize notifications is acted on.
    pub resize_debounce_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_label_separation: DEFAULT_MIN_SEPARATION,
            fit_padding: DEFAULT_FIT_PADDING,
            resize_debounce_ms: 200,
        }
    }
}

/// Which dataset to show, and how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSpec {
    /// Opaque identifier; transports turn it into a path or URL.
    pub dataset: String,
    /// Property whose value is a feature's display name.
    #[serde(default = "default_label_field")]
    pub label_field: String,
    /// True for the top administrative level, false for drill-down levels.
    #[serde(default)]
    pub boundary_level: bool,
}

fn default_label_field() -> String {
    DEFAULT_LABEL_FIELD.to_string()
}

impl DatasetSpec {
    pub fn new(dataset: impl Into<String>, label_field: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            label_field: label_field.into(),
            boundary_level: false,
        }
    }

    pub fn boundary(mut self, boundary_level: bool) -> Self {
        self.boundary_level = boundary_level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{ "minLabelSeparation": 0.05 }"#).unwrap();
        assert_eq!(cfg.min_label_separation, 0.05);
        assert_eq!(cfg.fit_padding, [20, 20]);
        assert_eq!(cfg.resize_debounce_ms, 200);
    }

    #[test]
    fn dataset_spec_defaults_label_field() {
        let spec: DatasetSpec = serde_json::from_str(r#"{ "dataset": "KEL MUARA.geojson" }"#).unwrap();
        assert_eq!(spec.label_field, "NAMOBJ");
        assert!(!spec.boundary_level);
    }
}
