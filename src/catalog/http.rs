use crate::catalog::traits::ListingSource;
use crate::models::{Listing, ListingDocument};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Fetches the listing dataset from a static JSON endpoint
pub struct HttpSource {
    client: Client,
    url: String,
}

impl HttpSource {
    /// Create a new HTTP source for the given dataset URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("housing-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, url))
    }

    /// Create an HTTP source around an already configured client
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ListingSource for HttpSource {
    async fn load(&self) -> Result<Vec<Listing>> {
        info!("Fetching listings from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("Failed to fetch listing dataset")?;

        if !response.status().is_success() {
            warn!("Dataset endpoint returned status: {}", response.status());
            anyhow::bail!("Failed to fetch listing dataset: {}", response.status());
        }

        let document: ListingDocument = response
            .json()
            .await
            .context("Failed to decode listing dataset")?;

        debug!("Decoded {} listings", document.properties.len());

        Ok(document.properties)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
