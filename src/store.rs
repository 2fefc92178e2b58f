use std::sync::Arc;

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::events::{ListingsEvent, Observers, SubscriptionId};
use crate::models::{ListingPatch, ListingRecord};
use crate::query::tags;
use crate::storage::{KeyValueStore, SeedSource, LISTINGS_KEY};

/// Single source of truth for the listing collection
///
/// Reads go through the persisted copy every time, so two stores sharing one
/// [`KeyValueStore`] see each other's writes on their next read.
pub struct ListingStore {
    storage: Arc<dyn KeyValueStore>,
    seed: Arc<dyn SeedSource>,
    observers: Observers<ListingsEvent>,
}

impl ListingStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, seed: Arc<dyn SeedSource>) -> Self {
        Self {
            storage,
            seed,
            observers: Observers::new(),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ListingsEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Persisted collection. `Ok(None)` when absent or malformed; a read
    /// failure is an error so callers never overwrite data they could not see.
    fn cached(&self) -> Result<Option<Vec<ListingRecord>>> {
        let Some(raw) = self.storage.load(LISTINGS_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(records) => Ok(Some(records)),
            Err(e) => {
                warn!("Cached listings are malformed, re-seeding: {}", e);
                Ok(None)
            }
        }
    }

    /// Cached collection, or the seed when nothing usable is cached.
    ///
    /// Storage read errors propagate. A seed failure yields an empty collection.
    async fn load(&self) -> Result<Vec<ListingRecord>> {
        if let Some(records) = self.cached()? {
            return Ok(records);
        }

        info!("Seeding listings from {}", self.seed.source_name());
        let records = match self.seed.fetch().await {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading seed listings: {}", e);
                return Ok(Vec::new());
            }
        };

        if let Err(e) = self.persist(&records) {
            warn!("Failed to cache seed listings: {}", e);
        }
        Ok(records)
    }

    /// Full ordered collection, seeding the cache on first use.
    ///
    /// A seed failure or an unreadable cache is logged and yields an empty
    /// collection; nothing is written in the latter case.
    pub async fn get_all(&self) -> Vec<ListingRecord> {
        self.load().await.unwrap_or_else(|e| {
            error!("Failed to read cached listings: {}", e);
            Vec::new()
        })
    }

    /// Look up one record by id
    pub async fn get(&self, id: u64) -> Option<ListingRecord> {
        self.get_all().await.into_iter().find(|record| record.id == id)
    }

    fn persist(&self, records: &[ListingRecord]) -> Result<()> {
        let json = serde_json::to_string(records)?;
        self.storage.save(LISTINGS_KEY, &json)
    }

    /// Overwrite the whole collection, then notify subscribers.
    pub fn save_all(&self, records: &[ListingRecord]) -> Result<()> {
        self.persist(records)?;
        debug!("Saved {} listings", records.len());
        self.observers.notify(&ListingsEvent::Saved {
            count: records.len(),
        });
        Ok(())
    }

    /// Create a listing from `draft` and append it.
    ///
    /// The new record gets `max(id) + 1`, the draft merged over the field
    /// defaults, then the fixed status flags. Tags are always derived.
    pub async fn add(&self, draft: ListingPatch) -> Result<ListingRecord> {
        let mut records = self.load().await?;
        let id = next_id(&records);

        let mut record = new_listing(id);
        draft.apply_to(&mut record);
        apply_creation_flags(&mut record);
        record.sync_price();
        if record.unique_id.as_deref().map_or(true, str::is_empty) {
            record.unique_id = Some(tags::unique_id(&record.name, &record.location, record.age));
        }
        record.tags = tags::derive_tags(&record);

        records.push(record.clone());
        self.save_all(&records)?;
        info!("Added listing {} ({})", record.id, record.name);
        Ok(record)
    }

    /// Merge `patch` over the record with `id`.
    ///
    /// Returns `false` without writing anything if no such record exists.
    pub async fn update(&self, id: u64, patch: ListingPatch) -> Result<bool> {
        let mut records = self.load().await?;
        let Some(record) = records.iter_mut().find(|record| record.id == id) else {
            debug!("Update skipped, no listing with id {}", id);
            return Ok(false);
        };

        let reprice = patch.touches_prices();
        patch.apply_to(record);
        if reprice {
            record.sync_price();
        }

        self.save_all(&records)?;
        info!("Updated listing {}", id);
        Ok(true)
    }

    /// Drop the record with `id`. Persists and notifies even if nothing matched.
    pub async fn remove(&self, id: u64) -> Result<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|record| record.id != id);
        let removed = records.len() != before;

        self.save_all(&records)?;
        if removed {
            info!("Removed listing {}", id);
        } else {
            debug!("Remove found no listing with id {}", id);
        }
        Ok(removed)
    }

    /// Discard the cached collection; the next read re-seeds.
    pub fn reset(&self) -> Result<()> {
        self.storage.remove(LISTINGS_KEY)?;
        warn!("Listing cache cleared, all local changes discarded");
        self.observers.notify(&ListingsEvent::Reset);
        Ok(())
    }
}

fn next_id(records: &[ListingRecord]) -> u64 {
    records.iter().map(|record| record.id).max().unwrap_or(0) + 1
}

/// Field defaults the draft may override
fn new_listing(id: u64) -> ListingRecord {
    ListingRecord {
        id,
        age: 18,
        likes: Some(0),
        added_date: Some(Local::now().format("%d.%m.%Y").to_string()),
        ..Default::default()
    }
}

/// Status every new listing starts with, whatever the draft says
fn apply_creation_flags(record: &mut ListingRecord) {
    record.available = true;
    record.verified = false;
    record.vip = false;
    record.online = false;
    record.new_this_week = true;
    record.with_video = false;
    record.views = Some(0);
}
