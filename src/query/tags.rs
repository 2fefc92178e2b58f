//! Best-effort labels derived from a listing's other fields.

use crate::models::ListingRecord;

const ANAL_SERVICE: &str = "Секс анальный";

/// Lowercased `additionalInfo` fragment and the tag it implies
const INFO_KEYWORDS: &[(&str, &str)] = &[
    ("крипт", "крипта"),
    ("студент", "студентка"),
    ("образован", "образованная"),
];

fn push_unique(tags: &mut Vec<String>, tag: impl Into<String>) {
    let tag = tag.into();
    if !tags.contains(&tag) {
        tags.push(tag);
    }
}

/// Derive the tag list for `record`, deduplicated in first-occurrence order.
pub fn derive_tags(record: &ListingRecord) -> Vec<String> {
    let mut tags = Vec::new();

    for attribute in [&record.hair, &record.eyes, &record.nationality]
        .into_iter()
        .flatten()
        .filter(|value| !value.is_empty())
    {
        push_unique(&mut tags, attribute.to_lowercase());
    }

    if let Some(detailed) = &record.detailed_services {
        let flags = [
            (detailed.sex.iter().any(|s| s == ANAL_SERVICE), "анальный"),
            (detailed.toys, "игрушки"),
            (!detailed.massage.is_empty(), "массаж"),
            (detailed.sado_maso, "садо-мазо"),
            (detailed.mistress, "госпожа"),
            (detailed.slave, "рабыня"),
            (detailed.light_domination, "доминация"),
        ];
        for (_, tag) in flags.into_iter().filter(|(set, _)| *set) {
            push_unique(&mut tags, tag);
        }
    }

    let statuses = [
        (record.verified, "проверенная"),
        (record.vip, "vip"),
        (record.online, "онлайн"),
        (record.new_this_week, "новая"),
        (record.with_video, "видео"),
    ];
    for (_, tag) in statuses.into_iter().filter(|(set, _)| *set) {
        push_unique(&mut tags, tag);
    }

    if let Some(info) = &record.additional_info {
        let info = info.to_lowercase();
        for (keyword, tag) in INFO_KEYWORDS {
            if info.contains(keyword) {
                push_unique(&mut tags, *tag);
            }
        }
    }

    tags
}

/// Copy of `record` with its tags recomputed
pub fn with_derived_tags(record: &ListingRecord) -> ListingRecord {
    ListingRecord {
        tags: derive_tags(record),
        ..record.clone()
    }
}

fn slug(part: &str) -> Option<String> {
    let slug = part
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");
    (!slug.is_empty()).then_some(slug)
}

/// `name-location-age` slug, with `unknown` standing in for blank parts
pub fn unique_id(name: &str, location: &str, age: u32) -> String {
    let name = slug(name).unwrap_or_else(|| "unknown".to_string());
    let location = slug(location).unwrap_or_else(|| "unknown".to_string());
    format!("{name}-{location}-{age}")
}
