use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Process-wide key-value namespace the watch-state store persists into.
///
/// Reads come from memory; every write is durable before it returns.
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Option<&Value>;

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError>;

    fn get_json<T>(&self, key: &str) -> Result<Option<T>, StorageError>
    where
        Self: Sized,
        T: DeserializeOwned,
    {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|source| StorageError::Decode {
                    key: key.to_string(),
                    source,
                }),
        }
    }

    fn set_json<T>(&mut self, key: &str, value: &T) -> Result<(), StorageError>
    where
        Self: Sized,
        T: Serialize,
    {
        let value = serde_json::to_value(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set(key, value)
    }
}

/// Volatile storage for tests and one-off sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, Value>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// All keys in one pretty-printed JSON object on disk.
pub struct JsonFileStorage {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStorage {
    /// Open (or lazily create) the state file.
    ///
    /// An unreadable file is an error. A file that reads but does not parse is
    /// copied to `*.json.bak` and the store starts empty; if that copy fails the
    /// open fails too, since the next write would replace the only copy.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if !path.exists() {
            debug!("State file {:?} does not exist, starting empty", path);
            return Ok(Self {
                path,
                values: BTreeMap::new(),
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        let values = match serde_json::from_str::<BTreeMap<String, Value>>(&content) {
            Ok(values) => values,
            Err(e) => {
                let backup_path = path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::copy(&path, &backup_path) {
                    warn!(
                        "State file {:?} is corrupted ({}) and could not be backed up to {:?}: {}",
                        path, e, backup_path, backup_err
                    );
                    return Err(StorageError::Io {
                        path: backup_path,
                        source: backup_err,
                    });
                }
                info!(
                    "State file {:?} is corrupted ({}). Backed up to {:?} and starting empty.",
                    path, e, backup_path
                );
                BTreeMap::new()
            }
        };

        debug!("Loaded {} keys from state file {:?}", values.len(), path);
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(&self.values).map_err(|source| StorageError::Encode {
            key: "*".to_string(),
            source,
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json).map_err(|e| self.io_error(e))?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(self.io_error(e));
        }
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StorageError> {
        let previous = self.values.insert(key.to_string(), value);
        if let Err(e) = self.flush() {
            warn!("Failed to persist key '{}': {}", key, e);
            // Keep memory consistent with disk
            match previous {
                Some(previous) => self.values.insert(key.to_string(), previous),
                None => self.values.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_storage_typed_round_trip() {
        let mut storage = MemoryStorage::new();
        let region: Option<String> = storage.get_json("region").unwrap();
        assert_eq!(region, None);

        storage.set_json("region", &"DE").unwrap();
        let region: Option<String> = storage.get_json("region").unwrap();
        assert_eq!(region.as_deref(), Some("DE"));
    }

    #[test]
    fn test_get_json_type_mismatch_is_error() {
        let mut storage = MemoryStorage::new();
        storage.set("my_list", json!({"not": "a list"})).unwrap();
        let result: Result<Option<Vec<u32>>, _> = storage.get_json("my_list");
        assert!(matches!(result, Err(StorageError::Decode { .. })));
    }

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("watch_state.json");

        let mut storage = JsonFileStorage::open(&path).unwrap();
        storage.set("region", json!("JP")).unwrap();
        storage.set("ratings", json!({"movie_550": {"rating": "up"}})).unwrap();

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("region"), Some(&json!("JP")));
        assert_eq!(reopened.get("ratings"), Some(&json!({"movie_550": {"rating": "up"}})));
        assert_eq!(reopened.get("profiles"), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_corrupted_file_is_backed_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watch_state.json");
        std::fs::write(&path, "{not json").unwrap();

        let storage = JsonFileStorage::open(&path).unwrap();
        assert!(storage.get("region").is_none());
        assert!(path.with_extension("json.bak").exists());
    }

    #[test]
    fn test_file_storage_corrupted_file_without_backup_refuses_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watch_state.json");
        let original = r#"{"my_list": [{"id": 550, "media_type": "movie"}], oops"#;
        std::fs::write(&path, original).unwrap();
        // A directory where the backup file would go makes the copy fail
        std::fs::create_dir(path.with_extension("json.bak")).unwrap();

        let result = JsonFileStorage::open(&path);
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_file_storage_failed_rename_cleans_up_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watch_state.json");
        let mut storage = JsonFileStorage::open(&path).unwrap();

        // A non-empty directory at the target path cannot be replaced by a file
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "").unwrap();

        let result = storage.set("region", json!("FR"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(storage.get("region").is_none());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_unwritable_location_keeps_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the parent directory should be
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();

        let mut storage = JsonFileStorage::open(blocker.join("watch_state.json")).unwrap();
        let result = storage.set("region", json!("FR"));
        assert!(matches!(result, Err(StorageError::Io { .. })));
        assert!(storage.get("region").is_none());
    }
}
