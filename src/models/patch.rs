use serde::{Deserialize, Serialize};

use super::{DetailedServices, ListingRecord, PriceSchedule, Reviews, SocialMedia};

/// Partial listing used both for updates and as the draft for new listings
///
/// Every field is optional. `Some` replaces the record's value, `None` keeps it.
/// Nested structures (`prices`, `detailed_services`, ...) are replaced whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub location: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub photos: Option<Vec<String>>,
    pub services: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub available: Option<bool>,

    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub bust: Option<u32>,
    pub hair: Option<String>,
    pub eyes: Option<String>,
    pub nationality: Option<String>,
    pub orientation: Option<String>,
    pub meeting_place: Option<String>,
    pub smoking: Option<String>,
    pub alcohol: Option<String>,
    pub additional_info: Option<String>,

    pub prices: Option<PriceSchedule>,
    pub detailed_services: Option<DetailedServices>,

    pub views: Option<u64>,
    pub likes: Option<u64>,
    pub added_date: Option<String>,

    pub verified: Option<bool>,
    pub vip: Option<bool>,
    pub online: Option<bool>,
    pub new_this_week: Option<bool>,
    pub with_video: Option<bool>,

    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub social_media: Option<SocialMedia>,

    pub reviews: Option<Reviews>,
    pub unique_id: Option<String>,
    pub tags: Option<Vec<String>>,
}

fn replace<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn replace_opt<T>(target: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *target = value;
    }
}

impl ListingPatch {
    /// Merge this patch over `record`. The record id is never touched.
    pub fn apply_to(self, record: &mut ListingRecord) {
        replace(&mut record.name, self.name);
        replace(&mut record.age, self.age);
        replace(&mut record.location, self.location);
        replace(&mut record.price, self.price);
        replace(&mut record.description, self.description);
        replace(&mut record.photos, self.photos);
        replace(&mut record.services, self.services);
        replace(&mut record.languages, self.languages);
        replace(&mut record.available, self.available);

        replace_opt(&mut record.height, self.height);
        replace_opt(&mut record.weight, self.weight);
        replace_opt(&mut record.bust, self.bust);
        replace_opt(&mut record.hair, self.hair);
        replace_opt(&mut record.eyes, self.eyes);
        replace_opt(&mut record.nationality, self.nationality);
        replace_opt(&mut record.orientation, self.orientation);
        replace_opt(&mut record.meeting_place, self.meeting_place);
        replace_opt(&mut record.smoking, self.smoking);
        replace_opt(&mut record.alcohol, self.alcohol);
        replace_opt(&mut record.additional_info, self.additional_info);

        replace_opt(&mut record.prices, self.prices);
        replace_opt(&mut record.detailed_services, self.detailed_services);

        replace_opt(&mut record.views, self.views);
        replace_opt(&mut record.likes, self.likes);
        replace_opt(&mut record.added_date, self.added_date);

        replace(&mut record.verified, self.verified);
        replace(&mut record.vip, self.vip);
        replace(&mut record.online, self.online);
        replace(&mut record.new_this_week, self.new_this_week);
        replace(&mut record.with_video, self.with_video);

        replace_opt(&mut record.phone, self.phone);
        replace_opt(&mut record.whatsapp, self.whatsapp);
        replace_opt(&mut record.social_media, self.social_media);

        replace_opt(&mut record.reviews, self.reviews);
        replace_opt(&mut record.unique_id, self.unique_id);
        replace(&mut record.tags, self.tags);
    }

    /// Whether the patch writes the nested price schedule
    pub fn touches_prices(&self) -> bool {
        self.prices.is_some()
    }
}
