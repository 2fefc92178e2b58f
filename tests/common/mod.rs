#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use listing_catalog::models::ListingRecord;
use listing_catalog::storage::{KeyValueStore, MemoryStore, SeedSource, StaticSeedSource};
use listing_catalog::{ListingStore, Result, StoreError};

pub fn seed_records() -> Vec<ListingRecord> {
    vec![
        ListingRecord {
            id: 1,
            name: "Анна".into(),
            age: 25,
            location: "Москва".into(),
            price: 8000,
            ..Default::default()
        },
        ListingRecord {
            id: 2,
            name: "Вика".into(),
            age: 23,
            location: "Казань".into(),
            price: 6000,
            ..Default::default()
        },
        ListingRecord {
            id: 3,
            name: "Ева".into(),
            age: 27,
            location: "Москва".into(),
            price: 12000,
            ..Default::default()
        },
    ]
}

pub fn ids(records: &[ListingRecord]) -> Vec<u64> {
    records.iter().map(|r| r.id).collect()
}

/// A seed source that counts fetches and can be told to fail
#[derive(Default)]
pub struct CountingSeed {
    pub fetches: AtomicUsize,
    pub fail: bool,
}

impl CountingSeed {
    pub fn failing() -> Self {
        Self {
            fetches: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedSource for CountingSeed {
    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(StoreError::Seed("unreachable".into()));
        }
        Ok(seed_records())
    }

    fn source_name(&self) -> String {
        "counting".to_string()
    }
}

pub fn memory_store() -> (Arc<MemoryStore>, ListingStore) {
    let storage = Arc::new(MemoryStore::new());
    let store = ListingStore::new(
        storage.clone(),
        Arc::new(StaticSeedSource::new(seed_records())),
    );
    (storage, store)
}

/// Memory-backed storage whose next `load` can be made to fail
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_next_load: AtomicBool,
}

impl FlakyStore {
    pub fn fail_next_load(&self) {
        self.fail_next_load.store(true, Ordering::SeqCst);
    }
}

impl KeyValueStore for FlakyStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        if self.fail_next_load.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Io {
                key: key.to_string(),
                source: std::io::Error::other("disk unavailable"),
            });
        }
        self.inner.load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        self.inner.save(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.inner.remove(key)
    }
}

pub fn flaky_store() -> (Arc<FlakyStore>, ListingStore) {
    let storage = Arc::new(FlakyStore::default());
    let store = ListingStore::new(
        storage.clone(),
        Arc::new(StaticSeedSource::new(seed_records())),
    );
    (storage, store)
}
