use std::sync::Arc;

use tracing::{info, warn};

use crate::error::Result;
use crate::events::{Observers, SettingsEvent, SubscriptionId};
use crate::models::{SettingKey, SettingsPatch, SiteSettings};
use crate::storage::{KeyValueStore, SETTINGS_KEY};

/// Site settings with defaults and a persisted override
///
/// Values are not validated; an empty admin code is stored as given.
pub struct SettingsStore {
    storage: Arc<dyn KeyValueStore>,
    observers: Observers<SettingsEvent>,
}

impl SettingsStore {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            observers: Observers::new(),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&SettingsEvent) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn stored_override(&self) -> SettingsPatch {
        let raw = match self.storage.load(SETTINGS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SettingsPatch::default(),
            Err(e) => {
                warn!("Failed to read settings: {}", e);
                return SettingsPatch::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!("Error parsing settings, using defaults: {}", e);
            SettingsPatch::default()
        })
    }

    /// Defaults overlaid with the persisted override
    pub fn get_settings(&self) -> SiteSettings {
        SiteSettings::default().merged(self.stored_override())
    }

    pub fn get_setting(&self, key: SettingKey) -> String {
        self.get_settings().get(key).to_string()
    }

    /// Merge `patch` into the current settings and persist the whole object.
    pub fn save_settings(&self, patch: SettingsPatch) -> Result<SiteSettings> {
        let updated = self.get_settings().merged(patch);
        let json = serde_json::to_string(&updated)?;
        self.storage.save(SETTINGS_KEY, &json)?;

        info!("Settings saved");
        self.observers.notify(&SettingsEvent::Saved(updated.clone()));
        Ok(updated)
    }

    /// Drop the override; subsequent reads return pure defaults.
    pub fn reset_settings(&self) -> Result<()> {
        self.storage.remove(SETTINGS_KEY)?;
        info!("Settings reset to defaults");
        self.observers.notify(&SettingsEvent::Reset);
        Ok(())
    }
}
