use crate::error::Result;
use crate::models::ListingRecord;
use async_trait::async_trait;

/// Whole-document key-value medium backing the stores
///
/// Each call is atomic per key. There is no coordination between callers,
/// so concurrent writers to one key are last-writer-wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `key`, `None` if absent
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the blob stored under `key`
    fn save(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`; deleting a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// Static dataset used to populate an empty catalog
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the full ordered seed collection
    async fn fetch(&self) -> Result<Vec<ListingRecord>>;

    /// Human-readable origin, for logs
    fn source_name(&self) -> String;
}
