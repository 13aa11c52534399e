// crates/regionmap-core/src/loader/source.rs

//! Transports that turn a dataset identifier into raw bytes.

use super::common_io;
use crate::error::{MapError, Result};
use std::collections::HashMap;
use std::path::PathBuf;

/// Fetches the raw payload of a boundary dataset.
pub trait BoundarySource {
    fn fetch(&self, dataset: &str) -> Result<Vec<u8>>;
}

impl<F> BoundarySource for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, dataset: &str) -> Result<Vec<u8>> {
        self(dataset)
    }
}

/// Dataset ids are paths below the source root. Leading slashes are
/// dropped; ids that could leave the root are rejected.
fn relative_id(dataset: &str) -> Result<&str> {
    let id = dataset.trim_start_matches('/');
    let escapes = id.is_empty()
        || id.contains(|c: char| c == '\\' || c == ':')
        || id.split('/').any(|part| part == "..");
    if escapes {
        return Err(MapError::InvalidDatasetId(dataset.to_string()));
    }
    Ok(id)
}

/// Reads `<root>/<dataset>` from disk. `*.gz` files are decompressed when
/// the `compact` feature is enabled.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl BoundarySource for FileSource {
    fn fetch(&self, dataset: &str) -> Result<Vec<u8>> {
        common_io::read_all(&self.root.join(relative_id(dataset)?))
    }
}

/// Fixed in-memory datasets, keyed by identifier.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    datasets: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dataset: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        self.insert(dataset, payload);
        self
    }

    pub fn insert(&mut self, dataset: impl Into<String>, payload: impl Into<Vec<u8>>) {
        self.datasets.insert(dataset.into(), payload.into());
    }
}

impl BoundarySource for MemorySource {
    fn fetch(&self, dataset: &str) -> Result<Vec<u8>> {
        self.datasets
            .get(dataset)
            .cloned()
            .ok_or_else(|| MapError::NotFound(format!("Dataset not found: {dataset}")))
    }
}

/// Fetches `<base_url>/<dataset>` over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct HttpSource {
    base: reqwest::Url,
    client: reqwest::blocking::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        // A trailing slash makes `join` append instead of replacing the last segment.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = reqwest::Url::parse(&normalized)
            .map_err(|e| MapError::Transport(format!("invalid base URL {base_url}: {e}")))?;
        Ok(Self {
            base,
            client: reqwest::blocking::Client::new(),
        })
    }

    pub fn url_for(&self, dataset: &str) -> Result<reqwest::Url> {
        self.base
            .join(relative_id(dataset)?)
            .map_err(|e| MapError::Transport(format!("invalid dataset id {dataset}: {e}")))
    }
}

#[cfg(feature = "http")]
impl BoundarySource for HttpSource {
    fn fetch(&self, dataset: &str) -> Result<Vec<u8>> {
        let url = self.url_for(dataset)?;
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(MapError::Status {
                dataset: dataset.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}
