use serde::{Deserialize, Serialize};

pub const DEFAULT_SITE_NAME: &str = "ONENIGHT";
pub const DEFAULT_SUPPORT_EMAIL: &str = "admin@onenight.com";
pub const DEFAULT_SUPPORT_TELEGRAM: &str = "@AndreyyyyyyyPer";
pub const DEFAULT_ADMIN_CODE: &str = "admin1236";

/// Site-wide settings singleton
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub site_name: String,
    pub support_email: String,
    pub support_telegram: String,
    /// Plaintext shared secret for the admin gate
    pub admin_code: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: DEFAULT_SITE_NAME.to_string(),
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
            support_telegram: DEFAULT_SUPPORT_TELEGRAM.to_string(),
            admin_code: DEFAULT_ADMIN_CODE.to_string(),
        }
    }
}

impl SiteSettings {
    /// Overlay `patch`; keys present in the patch win.
    pub fn merged(mut self, patch: SettingsPatch) -> Self {
        if let Some(site_name) = patch.site_name {
            self.site_name = site_name;
        }
        if let Some(support_email) = patch.support_email {
            self.support_email = support_email;
        }
        if let Some(support_telegram) = patch.support_telegram {
            self.support_telegram = support_telegram;
        }
        if let Some(admin_code) = patch.admin_code {
            self.admin_code = admin_code;
        }
        self
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::SiteName => &self.site_name,
            SettingKey::SupportEmail => &self.support_email,
            SettingKey::SupportTelegram => &self.support_telegram,
            SettingKey::AdminCode => &self.admin_code,
        }
    }
}

/// Partial settings; also the shape of the persisted override
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_telegram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    SiteName,
    SupportEmail,
    SupportTelegram,
    AdminCode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_keeps_unpatched_defaults() {
        let merged = SiteSettings::default().merged(SettingsPatch {
            admin_code: Some("xyz".into()),
            ..Default::default()
        });
        assert_eq!(merged.admin_code, "xyz");
        assert_eq!(merged.site_name, DEFAULT_SITE_NAME);
        assert_eq!(merged.get(SettingKey::SupportEmail), DEFAULT_SUPPORT_EMAIL);
    }

    #[test]
    fn partial_override_deserializes() {
        let patch: SettingsPatch = serde_json::from_str(r#"{"siteName":"Demo"}"#).unwrap();
        assert_eq!(patch.site_name.as_deref(), Some("Demo"));
        assert!(patch.admin_code.is_none());
    }
}
