use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::ListingRecord;
use crate::storage::traits::SeedSource;

/// Seed document served over HTTP(S)
pub struct HttpSeedSource {
    client: Client,
    url: String,
}

impl HttpSeedSource {
    /// Create a seed source with a 30 second timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Seed(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl SeedSource for HttpSeedSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        debug!("Fetching seed listings from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StoreError::Seed(format!("Failed to fetch {}: {e}", self.url)))?;

        if !response.status().is_success() {
            warn!("Seed source returned status: {}", response.status());
            return Err(StoreError::Seed(format!(
                "Seed source {} returned {}",
                self.url,
                response.status()
            )));
        }

        let records: Vec<ListingRecord> = response
            .json()
            .await
            .map_err(|e| StoreError::Seed(format!("Invalid seed document: {e}")))?;

        info!("Fetched {} seed listings", records.len());
        Ok(records)
    }

    fn source_name(&self) -> String {
        self.url.clone()
    }
}

/// Seed document read from the local filesystem
pub struct FileSeedSource {
    path: PathBuf,
}

impl FileSeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SeedSource for FileSeedSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StoreError::Seed(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        let records: Vec<ListingRecord> = serde_json::from_str(&contents)
            .map_err(|e| StoreError::Seed(format!("Invalid seed document: {e}")))?;

        debug!("Read {} seed listings from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn source_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Bundled in-memory seed collection
#[derive(Debug, Clone, Default)]
pub struct StaticSeedSource {
    records: Vec<ListingRecord>,
}

impl StaticSeedSource {
    pub fn new(records: Vec<ListingRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl SeedSource for StaticSeedSource {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        Ok(self.records.clone())
    }

    fn source_name(&self) -> String {
        "static".to_string()
    }
}
