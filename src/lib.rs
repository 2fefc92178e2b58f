pub mod config;
pub mod error;
pub mod events;
pub mod gate;
pub mod models;
pub mod query;
pub mod settings;
pub mod storage;
pub mod store;

pub use error::{Result, StoreError};
pub use gate::{AccessDecision, AccessGate};
pub use models::{ListingPatch, ListingRecord, SettingsPatch, SiteSettings};
pub use settings::SettingsStore;
pub use store::ListingStore;
