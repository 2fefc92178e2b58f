mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use common::{ids, seed_records};
use listing_catalog::gate::verify_code;
use listing_catalog::query::{self, FilterCriteria};
use listing_catalog::storage::{FileSeedSource, FileStore, KeyValueStore};
use listing_catalog::{
    AccessDecision, AccessGate, ListingPatch, ListingStore, SettingsPatch, SettingsStore,
};

fn write_seed(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("listings.json");
    std::fs::write(&path, serde_json::to_string_pretty(&seed_records()).unwrap()).unwrap();
    path
}

#[test]
fn changed_admin_code_replaces_default() {
    let storage: Arc<dyn KeyValueStore> = Arc::new(listing_catalog::storage::MemoryStore::new());
    let settings = SettingsStore::new(storage.clone());
    let gate = AccessGate::new(storage);

    assert!(verify_code(&settings.get_settings(), "admin1236"));

    settings
        .save_settings(SettingsPatch {
            admin_code: Some("xyz".into()),
            ..Default::default()
        })
        .unwrap();

    let current = settings.get_settings();
    assert!(!verify_code(&current, "admin1236"));
    assert!(verify_code(&current, "xyz"));
    assert_matches!(
        gate.unlock("admin1236", &current).unwrap(),
        AccessDecision::Denied
    );
    assert_matches!(gate.unlock("xyz", &current).unwrap(), AccessDecision::Granted);
    assert_matches!(gate.check().unwrap(), AccessDecision::Granted);
}

#[tokio::test]
async fn file_backed_catalog_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let seed_path = write_seed(dir.path());
    let data_dir = dir.path().join("state");

    {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&data_dir).unwrap());
        let store = ListingStore::new(storage, Arc::new(FileSeedSource::new(&seed_path)));
        let created = store
            .add(ListingPatch {
                name: Some("Соня".into()),
                location: Some("Сочи".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        store
            .update(
                created.id,
                ListingPatch {
                    vip: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        store.remove(1).await.unwrap();
    }

    // The seed file changing afterwards has no effect while a cache exists.
    std::fs::write(&seed_path, "[]").unwrap();

    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&data_dir).unwrap());
    let store = ListingStore::new(storage, Arc::new(FileSeedSource::new(&seed_path)));
    let all = store.get_all().await;
    assert_eq!(ids(&all), vec![2, 3, 4]);

    let vips = query::apply_filters(
        &all,
        &FilterCriteria {
            vip: true,
            ..Default::default()
        },
    );
    assert_eq!(ids(&vips), vec![4]);

    store.reset().unwrap();
    assert!(store.get_all().await.is_empty());
}

#[tokio::test]
async fn catalog_view_pipeline() {
    let (_, store) = common::memory_store();
    store
        .update(
            3,
            ListingPatch {
                hair: Some("Блондинка".into()),
                views: Some(500),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let all: Vec<_> = store
        .get_all()
        .await
        .iter()
        .map(query::with_derived_tags)
        .collect();

    let moscow = query::search(&all, "москва");
    assert_eq!(ids(&query::by_popularity(&moscow)), vec![3, 1]);
    assert_eq!(ids(&query::search(&all, "БЛОНДИНКА")), vec![3]);

    let groups = query::group_by_location(&all);
    assert_eq!(groups.len(), 2);
    assert_eq!(ids(&groups["Казань"]), vec![2]);
}
