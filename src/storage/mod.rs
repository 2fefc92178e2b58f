pub mod file;
pub mod memory;
pub mod seed;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use seed::{FileSeedSource, HttpSeedSource, StaticSeedSource};
pub use traits::{KeyValueStore, SeedSource};

/// Persisted listing collection
pub const LISTINGS_KEY: &str = "catalog.listings";
/// Persisted settings override
pub const SETTINGS_KEY: &str = "catalog.settings";
/// Persisted admin grant
pub const ADMIN_ACCESS_KEY: &str = "catalog.admin_access";
