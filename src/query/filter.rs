use serde::{Deserialize, Serialize};

use crate::models::ListingRecord;

/// Inclusive numeric bounds; either side may be open
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NumericRange<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T: PartialOrd + Copy> NumericRange<T> {
    pub fn new(from: Option<T>, to: Option<T>) -> Self {
        Self { from, to }
    }

    /// `from > to` can never be satisfied
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    pub fn contains(&self, value: T) -> bool {
        self.from.map_or(true, |from| value >= from) && self.to.map_or(true, |to| value <= to)
    }

    /// Range check for an optional field: a missing value passes.
    fn admits(&self, value: Option<T>) -> bool {
        !self.is_inverted() && value.map_or(true, |value| self.contains(value))
    }
}

/// Catalog filter criteria
///
/// Every field is optional. Unset fields impose no constraint, so
/// `FilterCriteria::default()` matches every record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// `true` requires the flag; `false` imposes nothing
    pub verified: bool,
    pub vip: bool,
    pub online: bool,
    pub new_this_week: bool,
    pub with_video: bool,

    pub height: NumericRange<u32>,
    pub age: NumericRange<u32>,
    pub weight: NumericRange<u32>,
    pub bust: NumericRange<u32>,
    pub price: NumericRange<i64>,

    pub nationality: Option<String>,
    pub hair: Option<String>,
    pub eyes: Option<String>,
    pub location: Option<String>,
    /// Must appear in the record's languages
    pub language: Option<String>,
    /// Every selected label must appear in the record's services
    pub services: Vec<String>,
    pub available: Option<bool>,
}

fn flag_ok(required: bool, actual: bool) -> bool {
    !required || actual
}

fn exact_ok(wanted: &Option<String>, actual: Option<&str>) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(wanted) => actual == Some(wanted),
    }
}

/// Whether `record` satisfies every criterion that is set
pub fn matches(record: &ListingRecord, criteria: &FilterCriteria) -> bool {
    flag_ok(criteria.verified, record.verified)
        && flag_ok(criteria.vip, record.vip)
        && flag_ok(criteria.online, record.online)
        && flag_ok(criteria.new_this_week, record.new_this_week)
        && flag_ok(criteria.with_video, record.with_video)
        && criteria.height.admits(record.height)
        && criteria.age.admits(Some(record.age))
        && criteria.weight.admits(record.weight)
        && criteria.bust.admits(record.bust)
        && criteria.price.admits(Some(record.price))
        && exact_ok(&criteria.nationality, record.nationality.as_deref())
        && exact_ok(&criteria.hair, record.hair.as_deref())
        && exact_ok(&criteria.eyes, record.eyes.as_deref())
        && exact_ok(&criteria.location, Some(record.location.as_str()))
        && criteria
            .language
            .as_deref()
            .filter(|language| !language.is_empty())
            .map_or(true, |language| record.languages.iter().any(|l| l == language))
        && criteria
            .services
            .iter()
            .all(|wanted| record.services.iter().any(|s| s == wanted))
        && criteria
            .available
            .map_or(true, |available| record.available == available)
}

/// Records matching `criteria`, in input order
pub fn apply_filters(records: &[ListingRecord], criteria: &FilterCriteria) -> Vec<ListingRecord> {
    records
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}
