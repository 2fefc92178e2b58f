use indexmap::{IndexMap, IndexSet};

use crate::models::ListingRecord;

/// Text-valued listing fields that can feed a filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Location,
    Hair,
    Eyes,
    Nationality,
    Orientation,
    MeetingPlace,
    Smoking,
    Alcohol,
}

impl TextField {
    pub fn value<'a>(&self, record: &'a ListingRecord) -> Option<&'a str> {
        match self {
            TextField::Name => Some(record.name.as_str()),
            TextField::Location => Some(record.location.as_str()),
            TextField::Hair => record.hair.as_deref(),
            TextField::Eyes => record.eyes.as_deref(),
            TextField::Nationality => record.nationality.as_deref(),
            TextField::Orientation => record.orientation.as_deref(),
            TextField::MeetingPlace => record.meeting_place.as_deref(),
            TextField::Smoking => record.smoking.as_deref(),
            TextField::Alcohol => record.alcohol.as_deref(),
        }
    }
}

/// Partition by `location`. Groups appear in first-occurrence order and keep
/// the input order inside each group.
pub fn group_by_location(records: &[ListingRecord]) -> IndexMap<String, Vec<ListingRecord>> {
    let mut groups: IndexMap<String, Vec<ListingRecord>> = IndexMap::new();
    for record in records {
        groups
            .entry(record.location.clone())
            .or_default()
            .push(record.clone());
    }
    groups
}

/// Distinct non-empty values of `field`, in first-occurrence order
pub fn unique_values(records: &[ListingRecord], field: TextField) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| field.value(record))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
