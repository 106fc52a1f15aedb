use crate::catalog::traits::ListingSource;
use crate::models::{Listing, ListingDocument};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads the listing dataset from a JSON file on disk
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<Listing>> {
        info!("Reading listings from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read dataset {}", self.path.display()))?;

        debug!("Read {} bytes of JSON", raw.len());

        let document: ListingDocument = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse dataset {}", self.path.display()))?;

        Ok(document.properties)
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}
