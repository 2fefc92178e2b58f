use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::ListingRecord;

/// Ordering choices offered by the catalog
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Popularity,
    Date,
    PriceAsc,
    PriceDesc,
}

/// `views + 2 * likes + 10 * rating`
pub fn popularity_score(record: &ListingRecord) -> f64 {
    let views = record.views.unwrap_or(0) as f64;
    let likes = record.likes.unwrap_or(0) as f64;
    let rating = record.reviews.as_ref().map_or(0.0, |r| r.rating);
    views + 2.0 * likes + 10.0 * rating
}

/// Parse a stored `addedDate` into a timestamp in milliseconds.
///
/// Accepts RFC 3339, `yyyy-mm-dd` and the ru-RU `dd.mm.yyyy` form.
/// Anything else counts as the epoch.
pub fn added_timestamp(record: &ListingRecord) -> i64 {
    record
        .added_date
        .as_deref()
        .map(str::trim)
        .and_then(parse_date_millis)
        .unwrap_or(0)
}

fn parse_date_millis(raw: &str) -> Option<i64> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(parsed.and_utc().timestamp_millis());
    }
    ["%Y-%m-%d", "%d.%m.%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().timestamp_millis())
}

/// Most popular first; ties keep their input order
pub fn by_popularity(records: &[ListingRecord]) -> Vec<ListingRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| popularity_score(b).total_cmp(&popularity_score(a)));
    sorted
}

/// Newest first; undated records sink to the end
pub fn by_date(records: &[ListingRecord]) -> Vec<ListingRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by_key(|record| std::cmp::Reverse(added_timestamp(record)));
    sorted
}

pub fn by_price(records: &[ListingRecord], ascending: bool) -> Vec<ListingRecord> {
    let mut sorted = records.to_vec();
    if ascending {
        sorted.sort_by_key(|record| record.price);
    } else {
        sorted.sort_by_key(|record| std::cmp::Reverse(record.price));
    }
    sorted
}

pub fn sort(records: &[ListingRecord], key: SortKey) -> Vec<ListingRecord> {
    match key {
        SortKey::Popularity => by_popularity(records),
        SortKey::Date => by_date(records),
        SortKey::PriceAsc => by_price(records, true),
        SortKey::PriceDesc => by_price(records, false),
    }
}
