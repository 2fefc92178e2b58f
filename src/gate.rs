//! Shared-secret admin gate.
//!
//! A matching code stores a grant timestamp. The grant stays valid for
//! [`ACCESS_WINDOW_HOURS`] and is cleared the first time a check finds it
//! stale. This is a convenience lock for the admin screens, not a credential
//! system.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;
use crate::models::SiteSettings;
use crate::storage::{KeyValueStore, ADMIN_ACCESS_KEY};

pub const ACCESS_WINDOW_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Granted,
    Denied,
    Expired,
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct AccessGrant {
    granted_at: DateTime<Utc>,
}

/// Compare free-text input against the configured admin code. Blank input
/// never matches, even when the code itself is empty.
pub fn verify_code(settings: &SiteSettings, input: &str) -> bool {
    let input = input.trim();
    !input.is_empty() && input == settings.admin_code
}

pub struct AccessGate {
    storage: Arc<dyn KeyValueStore>,
    window: Duration,
}

impl AccessGate {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            storage,
            window: Duration::hours(ACCESS_WINDOW_HOURS),
        }
    }

    pub fn unlock(&self, input: &str, settings: &SiteSettings) -> Result<AccessDecision> {
        self.unlock_at(input, settings, Utc::now())
    }

    /// Record a grant at `now` if `input` matches the admin code.
    pub fn unlock_at(
        &self,
        input: &str,
        settings: &SiteSettings,
        now: DateTime<Utc>,
    ) -> Result<AccessDecision> {
        if !verify_code(settings, input) {
            warn!("Admin code rejected");
            return Ok(AccessDecision::Denied);
        }

        let grant = AccessGrant { granted_at: now };
        self.storage
            .save(ADMIN_ACCESS_KEY, &serde_json::to_string(&grant)?)?;
        info!("Admin access granted until {}", now + self.window);
        Ok(AccessDecision::Granted)
    }

    pub fn check(&self) -> Result<AccessDecision> {
        self.check_at(Utc::now())
    }

    /// Evaluate the stored grant at `now`, clearing it once expired.
    pub fn check_at(&self, now: DateTime<Utc>) -> Result<AccessDecision> {
        let Some(raw) = self.storage.load(ADMIN_ACCESS_KEY)? else {
            return Ok(AccessDecision::Denied);
        };

        let grant: AccessGrant = match serde_json::from_str(&raw) {
            Ok(grant) => grant,
            Err(e) => {
                warn!("Discarding unreadable admin grant: {}", e);
                self.storage.remove(ADMIN_ACCESS_KEY)?;
                return Ok(AccessDecision::Denied);
            }
        };

        if now - grant.granted_at > self.window {
            info!("Admin access expired");
            self.storage.remove(ADMIN_ACCESS_KEY)?;
            return Ok(AccessDecision::Expired);
        }
        Ok(AccessDecision::Granted)
    }

    /// Log out
    pub fn revoke(&self) -> Result<()> {
        self.storage.remove(ADMIN_ACCESS_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use assert_matches::assert_matches;
    use chrono::TimeZone;

    fn gate() -> (Arc<MemoryStore>, AccessGate) {
        let storage = Arc::new(MemoryStore::new());
        (storage.clone(), AccessGate::new(storage))
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    #[test]
    fn wrong_code_is_denied_and_stores_nothing() {
        let (storage, gate) = gate();
        let decision = gate
            .unlock_at("guess", &SiteSettings::default(), noon())
            .unwrap();
        assert_matches!(decision, AccessDecision::Denied);
        assert!(!storage.contains(ADMIN_ACCESS_KEY));
    }

    #[test]
    fn input_is_trimmed() {
        assert!(verify_code(&SiteSettings::default(), "  admin1236\n"));
    }

    #[test]
    fn blank_input_never_unlocks() {
        let (storage, gate) = gate();
        let settings = SiteSettings {
            admin_code: String::new(),
            ..Default::default()
        };
        assert!(!verify_code(&settings, ""));
        assert_matches!(
            gate.unlock_at("   ", &settings, noon()).unwrap(),
            AccessDecision::Denied
        );
        assert!(!storage.contains(ADMIN_ACCESS_KEY));
    }

    #[test]
    fn grant_lasts_a_day() {
        let (_, gate) = gate();
        let settings = SiteSettings::default();
        assert_matches!(gate.check_at(noon()).unwrap(), AccessDecision::Denied);

        assert_matches!(
            gate.unlock_at("admin1236", &settings, noon()).unwrap(),
            AccessDecision::Granted
        );
        assert_matches!(
            gate.check_at(noon() + Duration::hours(24)).unwrap(),
            AccessDecision::Granted
        );
    }

    #[test]
    fn stale_grant_expires_once() {
        let (storage, gate) = gate();
        gate.unlock_at("admin1236", &SiteSettings::default(), noon())
            .unwrap();

        let later = noon() + Duration::hours(24) + Duration::seconds(1);
        assert_matches!(gate.check_at(later).unwrap(), AccessDecision::Expired);
        assert!(!storage.contains(ADMIN_ACCESS_KEY));
        assert_matches!(gate.check_at(later).unwrap(), AccessDecision::Denied);
    }

    #[test]
    fn revoke_logs_out() {
        let (_, gate) = gate();
        gate.unlock_at("admin1236", &SiteSettings::default(), noon())
            .unwrap();
        gate.revoke().unwrap();
        assert_matches!(gate.check_at(noon()).unwrap(), AccessDecision::Denied);
    }

    #[test]
    fn corrupt_grant_is_discarded() {
        let (storage, gate) = gate();
        storage.save(ADMIN_ACCESS_KEY, "true").unwrap();
        assert_matches!(gate.check_at(noon()).unwrap(), AccessDecision::Denied);
        assert!(!storage.contains(ADMIN_ACCESS_KEY));
    }
}
