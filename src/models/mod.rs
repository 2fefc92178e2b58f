use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

mod patch;
mod settings;

pub use patch::ListingPatch;
pub use settings::{SettingKey, SettingsPatch, SiteSettings, DEFAULT_ADMIN_CODE};

/// Price tiers for one meeting category
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceTiers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_hours: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night: Option<i64>,
    /// Outcall surcharge tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anal: Option<i64>,
}

/// Nested price schedule: on-site and outcall tiers
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PriceSchedule {
    /// Stored as `apartment` in the seed document
    #[serde(rename = "apartment", default, skip_serializing_if = "Option::is_none")]
    pub on_site: Option<PriceTiers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcall: Option<PriceTiers>,
}

impl PriceSchedule {
    /// On-site one hour tier, if set to a positive value
    pub fn on_site_one_hour(&self) -> Option<i64> {
        self.on_site
            .as_ref()
            .and_then(|tiers| tiers.one_hour)
            .filter(|price| *price > 0)
    }
}

/// Categorised service breakdown
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetailedServices {
    pub sex: Vec<String>,
    pub toys: bool,
    pub striptease: Vec<String>,
    pub massage: Vec<String>,
    pub sado_maso: bool,
    pub mistress: bool,
    pub slave: bool,
    pub games: bool,
    pub light_domination: bool,
    pub roleplay: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Reviews {
    pub rating: f64,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SocialMedia {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram: Option<String>,
}

/// Core listing data model
///
/// Field names follow the camelCase layout of the seed document so a cached
/// collection and the seed are interchangeable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub age: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub description: String,
    /// Display order; the first entry is the cover image
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub available: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bust: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eyes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nationality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub smoking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alcohol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<PriceSchedule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detailed_services: Option<DetailedServices>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// Free-text date, usually `dd.mm.yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,

    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub vip: bool,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub new_this_week: bool,
    #[serde(default)]
    pub with_video: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Reviews>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Keys this model does not know, carried through the cache untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListingRecord {
    /// Primary image shown on cards
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }

    /// Mirror the on-site one hour tier into the top-level price.
    ///
    /// Only applies when that tier holds a positive value.
    pub fn sync_price(&mut self) {
        if let Some(price) = self.prices.as_ref().and_then(PriceSchedule::on_site_one_hour) {
            self.price = price;
        }
    }
}
