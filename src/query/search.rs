use crate::models::ListingRecord;

fn contains_term(text: &str, term: &str) -> bool {
    text.to_lowercase().contains(term)
}

/// Whether any searchable field of `record` contains the lowercased `term`
fn record_matches(record: &ListingRecord, term: &str) -> bool {
    contains_term(&record.name, term)
        || contains_term(&record.location, term)
        || contains_term(&record.description, term)
        || record.services.iter().any(|s| contains_term(s, term))
        || record.tags.iter().any(|t| contains_term(t, term))
}

/// Case-insensitive free-text search over name, location, description,
/// services and tags.
///
/// A blank query returns the input unchanged. Otherwise the query is matched
/// as given, surrounding whitespace included.
pub fn search(records: &[ListingRecord], query: &str) -> Vec<ListingRecord> {
    if query.trim().is_empty() {
        return records.to_vec();
    }

    let term = query.to_lowercase();
    records
        .iter()
        .filter(|record| record_matches(record, &term))
        .cloned()
        .collect()
}
