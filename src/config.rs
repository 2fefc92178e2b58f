use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::storage::{FileSeedSource, HttpSeedSource, SeedSource};

/// Where the seed document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedLocation {
    Url(String),
    Path(PathBuf),
}

impl SeedLocation {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            SeedLocation::Url(raw.to_string())
        } else {
            SeedLocation::Path(PathBuf::from(raw))
        }
    }
}

/// Catalog configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub seed: SeedLocation,
    /// Directory holding the persisted JSON blobs
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl CatalogConfig {
    /// Load configuration from the environment (and `.env`, if present).
    ///
    /// | Env Var                     | Default              |
    /// |-----------------------------|----------------------|
    /// | `CATALOG_SEED`              | `data/listings.json` |
    /// | `CATALOG_DATA_DIR`          | `.catalog`           |
    /// | `CATALOG_HTTP_TIMEOUT_SECS` | `30`                 |
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let seed = std::env::var("CATALOG_SEED").unwrap_or_else(|_| "data/listings.json".into());
        let data_dir = std::env::var("CATALOG_DATA_DIR").unwrap_or_else(|_| ".catalog".into());
        let http_timeout_secs: u64 = std::env::var("CATALOG_HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .context("CATALOG_HTTP_TIMEOUT_SECS must be a valid u64")?;

        Ok(Self {
            seed: SeedLocation::parse(&seed),
            data_dir: PathBuf::from(data_dir),
            http_timeout_secs,
        })
    }

    /// Build the seed source this configuration points at
    pub fn seed_source(&self) -> Result<Arc<dyn SeedSource>> {
        let source: Arc<dyn SeedSource> = match &self.seed {
            SeedLocation::Url(url) => Arc::new(
                HttpSeedSource::with_timeout(url.clone(), Duration::from_secs(self.http_timeout_secs))
                    .context("Failed to create seed client")?,
            ) as Arc<dyn SeedSource>,
            SeedLocation::Path(path) => Arc::new(FileSeedSource::new(path.clone())),
        };
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_location_by_scheme() {
        assert_eq!(
            SeedLocation::parse("https://example.com/data/models.json"),
            SeedLocation::Url("https://example.com/data/models.json".into())
        );
        assert_eq!(
            SeedLocation::parse("data/listings.json"),
            SeedLocation::Path(PathBuf::from("data/listings.json"))
        );
    }

    #[test]
    fn file_seed_source_reports_its_path() {
        let config = CatalogConfig {
            seed: SeedLocation::Path(PathBuf::from("seed.json")),
            data_dir: PathBuf::from(".catalog"),
            http_timeout_secs: 30,
        };
        assert_eq!(config.seed_source().unwrap().source_name(), "seed.json");
    }
}
