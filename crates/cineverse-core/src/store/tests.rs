use super::*;
use crate::error::StorageError;
use crate::storage::{JsonFileStorage, MemoryStorage};
use cineverse_models::{MaturityRating, MediaType};
use serde_json::Value;

fn store() -> WatchStateStore<MemoryStorage> {
    WatchStateStore::new(MemoryStorage::new())
}

fn watching(key: MediaKey) -> ContinueWatchingEntry {
    ContinueWatchingEntry::new(key).with_title(format!("Title {}", key.id))
}

/// Storage whose writes always fail, as when the state directory is read-only.
#[derive(Default)]
struct ReadOnlyStorage {
    inner: MemoryStorage,
}

impl KeyValueStorage for ReadOnlyStorage {
    fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    fn set(&mut self, _key: &str, _value: Value) -> Result<(), StorageError> {
        Err(StorageError::Io {
            path: "/read-only/watch_state.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        })
    }
}

#[test]
fn test_add_to_list_is_idempotent() {
    let mut store = store();
    let key = MediaKey::movie(550);

    assert!(store.add_to_list(WatchListEntry::new(key).with_title("Fight Club")).unwrap());
    for _ in 0..5 {
        assert!(!store.add_to_list(WatchListEntry::new(key)).unwrap());
    }

    let list = store.list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].title.as_deref(), Some("Fight Club"));
}

#[test]
fn test_list_key_includes_media_type() {
    let mut store = store();
    store.add_to_list(WatchListEntry::new(MediaKey::movie(42))).unwrap();
    store.add_to_list(WatchListEntry::new(MediaKey::tv(42))).unwrap();

    assert_eq!(store.list().unwrap().len(), 2);
    assert!(store.is_in_list(MediaKey::tv(42)).unwrap());

    assert!(store.remove_from_list(MediaKey::movie(42)).unwrap());
    assert!(!store.is_in_list(MediaKey::movie(42)).unwrap());
    assert!(store.is_in_list(MediaKey::tv(42)).unwrap());
}

#[test]
fn test_remove_from_list_absent_is_noop() {
    let mut store = store();
    assert!(!store.remove_from_list(MediaKey::movie(1)).unwrap());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_continue_watching_most_recent_first() {
    let mut store = store();
    store.upsert_continue_watching(watching(MediaKey::movie(1)), 10).unwrap();
    store.upsert_continue_watching(watching(MediaKey::tv(2)), 20).unwrap();
    store.upsert_continue_watching(watching(MediaKey::movie(3)), 30).unwrap();

    // Re-upserting an existing key moves it to the front without duplicating it
    store
        .upsert_continue_watching(watching(MediaKey::movie(1)), 55)
        .unwrap();

    let entries = store.continue_watching().unwrap();
    let keys: Vec<MediaKey> = entries.iter().map(|e| e.key()).collect();
    assert_eq!(keys, vec![MediaKey::movie(1), MediaKey::movie(3), MediaKey::tv(2)]);
    assert_eq!(entries[0].progress, 55);
}

#[test]
fn test_continue_watching_capped_at_twenty() {
    let mut store = store();
    for id in 0..35u64 {
        store.upsert_continue_watching(watching(MediaKey::movie(id)), 5).unwrap();
        let entries = store.continue_watching().unwrap();
        assert!(entries.len() <= 20);
        assert_eq!(entries[0].key(), MediaKey::movie(id));
    }

    let entries = store.continue_watching().unwrap();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries.last().unwrap().id, 15);
    assert!(entries.iter().all(|e| e.id >= 15));
}

#[test]
fn test_continue_watching_respects_configured_limit() {
    let storage_config = StorageConfig {
        continue_watching_limit: 3,
        ..StorageConfig::default()
    };
    let mut store = WatchStateStore::from_config(MemoryStorage::new(), &storage_config, &RegionConfig::default());
    for id in 0..5u64 {
        store.upsert_continue_watching(watching(MediaKey::tv(id)), 5).unwrap();
    }
    assert_eq!(store.continue_watching().unwrap().len(), 3);
}

#[test]
fn test_continue_watching_keeps_episode_and_clamps_progress() {
    let mut store = store();
    let entry = watching(MediaKey::tv(1399)).at_episode(3, 9);
    store.upsert_continue_watching(entry, 250).unwrap();

    let entries = store.continue_watching().unwrap();
    assert_eq!(entries[0].progress, 100);
    assert_eq!(entries[0].season, Some(3));
    assert_eq!(entries[0].episode, Some(9));
    assert_eq!(entries[0].media_type, MediaType::Tv);
}

#[test]
fn test_remove_continue_watching() {
    let mut store = store();
    store.upsert_continue_watching(watching(MediaKey::movie(7)), 5).unwrap();
    assert!(!store.remove_continue_watching(MediaKey::tv(7)).unwrap());
    assert!(store.remove_continue_watching(MediaKey::movie(7)).unwrap());
    assert!(store.continue_watching().unwrap().is_empty());
}

#[test]
fn test_rating_toggle() {
    let mut store = store();
    let key = MediaKey::tv(1399);

    assert_eq!(store.set_rating(key, Thumb::Up).unwrap(), Some(Thumb::Up));
    assert_eq!(store.set_rating(key, Thumb::Up).unwrap(), None);
    assert_eq!(store.get_rating(key).unwrap(), None);
    assert_eq!(store.set_rating(key, Thumb::Up).unwrap(), Some(Thumb::Up));
    assert_eq!(store.get_rating(key).unwrap(), Some(Thumb::Up));
}

#[test]
fn test_rating_switch_direction() {
    let mut store = store();
    let key = MediaKey::movie(550);

    store.set_rating(key, Thumb::Up).unwrap();
    assert_eq!(store.set_rating(key, Thumb::Down).unwrap(), Some(Thumb::Down));
    assert_eq!(store.get_rating(MediaKey::tv(550)).unwrap(), None);

    let ratings = store.ratings().unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings["movie_550"].rating, Thumb::Down);
}

#[test]
fn test_default_profile_synthesized_and_persisted() {
    let mut store = store();
    assert!(store.storage().get("profiles").is_none());

    let current = store.current_profile().unwrap();
    assert_eq!(current.id, "main");
    assert_eq!(current.name, "Profil Principal");
    assert!(!current.is_kids);
    assert!(store.storage().get("profiles").is_some());
    assert_eq!(store.profiles().unwrap().len(), 1);
}

#[test]
fn test_profile_limit_and_selection() {
    let mut store = store();
    let kids = store.create_profile("Enfants", true, None).unwrap();
    assert_eq!(kids.settings.maturity_rating, MaturityRating::Kids);
    assert_eq!(kids.avatar, "https://i.pravatar.cc/150?u=Enfants");

    for name in ["B", "C", "D"] {
        store.create_profile(name, false, None).unwrap();
    }
    assert_eq!(store.profiles().unwrap().len(), 5);
    assert!(matches!(
        store.create_profile("F", false, None),
        Err(StoreError::ProfileLimitReached(5))
    ));

    store.set_current_profile(&kids.id).unwrap();
    assert_eq!(store.current_profile().unwrap().id, kids.id);

    assert!(matches!(
        store.set_current_profile("ghost"),
        Err(StoreError::UnknownProfile(_))
    ));
    assert_eq!(store.current_profile().unwrap().id, kids.id);
}

#[test]
fn test_profile_ids_unique() {
    let mut store = store();
    let a = store.create_profile("A", false, None).unwrap();
    let b = store.create_profile("B", false, None).unwrap();
    assert_ne!(a.id, b.id);
    assert!(matches!(store.create_profile("   ", false, None), Err(StoreError::EmptyProfileName)));
}

#[test]
fn test_profile_id_skips_every_taken_suffix() {
    let existing: Vec<Profile> = ["1700000000000", "1700000000000-1", "1700000000000-2"]
        .into_iter()
        .map(|id| Profile {
            id: id.to_string(),
            ..Profile::default_main()
        })
        .collect();

    assert_eq!(unique_profile_id("1700000000000", &existing), "1700000000000-3");
    assert_eq!(unique_profile_id("1700000000001", &existing), "1700000000001");
}

#[test]
fn test_region_default_and_persist() {
    let mut store = store();
    assert_eq!(store.region().unwrap(), "FR");
    store.set_region("").unwrap();
    assert_eq!(store.region().unwrap(), "");
    store.set_region("KR").unwrap();
    assert_eq!(store.region().unwrap(), "KR");
}

#[test]
fn test_persistence_failure_surfaces_to_caller() {
    let mut store = WatchStateStore::new(ReadOnlyStorage::default());
    let result = store.add_to_list(WatchListEntry::new(MediaKey::movie(1)));
    assert!(matches!(result, Err(StoreError::Storage(StorageError::Io { .. }))));
    assert!(store.list().unwrap().is_empty());

    assert!(store.set_rating(MediaKey::movie(1), Thumb::Up).is_err());
    assert!(store.current_profile().is_err());
}

#[test]
fn test_file_backed_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watch_state.json");

    {
        let mut store = WatchStateStore::new(JsonFileStorage::open(&path).unwrap());
        store.add_to_list(WatchListEntry::new(MediaKey::tv(66732))).unwrap();
        store
            .upsert_continue_watching(watching(MediaKey::tv(66732)).at_episode(1, 3), 40)
            .unwrap();
        store.set_rating(MediaKey::tv(66732), Thumb::Down).unwrap();
        store.set_region("US").unwrap();
    }

    let store = WatchStateStore::new(JsonFileStorage::open(&path).unwrap());
    assert!(store.is_in_list(MediaKey::tv(66732)).unwrap());
    assert_eq!(store.continue_watching().unwrap()[0].episode, Some(3));
    assert_eq!(store.get_rating(MediaKey::tv(66732)).unwrap(), Some(Thumb::Down));
    assert_eq!(store.region().unwrap(), "US");
}
