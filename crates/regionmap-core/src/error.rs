// crates/regionmap-core/src/error.rs

//! # Error Types
//!
//! Fetch-level and payload-level failures. Per-feature geometry problems are
//! never errors: they show up as `None` from
//! [`representative_point`](crate::geometry::representative_point).

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MapError>;

#[derive(Debug, Error)]
pub enum MapError {
    /// The dataset resource does not exist (file transport).
    #[error("dataset not found: {0}")]
    NotFound(String),

    /// A dataset id that would resolve outside the source root.
    #[error("invalid dataset id: {0}")]
    InvalidDatasetId(String),

    /// The transport answered, but not with a success status.
    #[error("fetching `{dataset}` failed with status {status}")]
    Status { dataset: String, status: u16 },

    /// Network or transport level failure.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A GeoJSON object that does not follow the format.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Valid JSON that is neither a Feature nor a FeatureCollection.
    #[error("invalid boundary data: {0}")]
    InvalidData(String),

    #[error("invalid layer catalog: {0}")]
    Catalog(String),
}

impl MapError {
    /// True for the errors that abort a load before any payload was read.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            MapError::NotFound(_)
                | MapError::InvalidDatasetId(_)
                | MapError::Status { .. }
                | MapError::Transport(_)
                | MapError::Io(_)
        )
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for MapError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => MapError::Status {
                dataset: e.url().map(|u| u.to_string()).unwrap_or_default(),
                status: status.as_u16(),
            },
            None => MapError::Transport(e.to_string()),
        }
    }
}
