//! Watch-state store: "my list", continue-watching, ratings, profiles and region.
//!
//! The store is the only writer of these records. Construct it once and hand it
//! to whatever needs it; tests inject a [`MemoryStorage`](crate::MemoryStorage).

use crate::error::StoreError;
use crate::storage::KeyValueStorage;
use cineverse_config::{RegionConfig, StorageConfig};
use cineverse_models::{
    ContinueWatchingEntry, MediaKey, Profile, ProfileSettings, RatingEntry, Thumb, WatchListEntry,
};
use chrono::Utc;
use std::collections::BTreeMap;
use tracing::{debug, info};

const MY_LIST_KEY: &str = "my_list";
const CONTINUE_WATCHING_KEY: &str = "continue_watching";
const RATINGS_KEY: &str = "ratings";
const PROFILES_KEY: &str = "profiles";
const CURRENT_PROFILE_KEY: &str = "current_profile_id";
const REGION_KEY: &str = "region";

pub struct WatchStateStore<S: KeyValueStorage> {
    storage: S,
    continue_watching_limit: usize,
    max_profiles: usize,
    default_region: String,
}

impl<S: KeyValueStorage> WatchStateStore<S> {
    pub fn new(storage: S) -> Self {
        Self::from_config(storage, &StorageConfig::default(), &RegionConfig::default())
    }

    pub fn from_config(storage: S, storage_config: &StorageConfig, region_config: &RegionConfig) -> Self {
        Self {
            storage,
            continue_watching_limit: storage_config.continue_watching_limit,
            max_profiles: storage_config.max_profiles,
            default_region: region_config.default_country.clone(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ---- continue watching ----

    pub fn continue_watching(&self) -> Result<Vec<ContinueWatchingEntry>, StoreError> {
        Ok(self.storage.get_json(CONTINUE_WATCHING_KEY)?.unwrap_or_default())
    }

    /// Insert or replace the entry for its key and move it to the front.
    ///
    /// `progress` is clamped to 100 and `last_watched` is stamped now. The
    /// collection is truncated to the configured limit, dropping the oldest writes.
    pub fn upsert_continue_watching(&mut self, mut entry: ContinueWatchingEntry, progress: u8) -> Result<(), StoreError> {
        entry.progress = progress.min(100);
        entry.last_watched = Utc::now();
        let key = entry.key();

        let mut entries = self.continue_watching()?;
        entries.retain(|e| e.key() != key);
        entries.insert(0, entry);

        if entries.len() > self.continue_watching_limit {
            let evicted = entries.len() - self.continue_watching_limit;
            entries.truncate(self.continue_watching_limit);
            debug!("Continue watching over limit, evicted {} oldest entries", evicted);
        }

        self.storage.set_json(CONTINUE_WATCHING_KEY, &entries)?;
        debug!("Continue watching updated for {} ({}%)", key, progress.min(100));
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub fn remove_continue_watching(&mut self, key: MediaKey) -> Result<bool, StoreError> {
        let mut entries = self.continue_watching()?;
        let before = entries.len();
        entries.retain(|e| e.key() != key);
        if entries.len() == before {
            return Ok(false);
        }
        self.storage.set_json(CONTINUE_WATCHING_KEY, &entries)?;
        debug!("Removed {} from continue watching", key);
        Ok(true)
    }

    // ---- my list ----

    pub fn list(&self) -> Result<Vec<WatchListEntry>, StoreError> {
        Ok(self.storage.get_json(MY_LIST_KEY)?.unwrap_or_default())
    }

    /// Append unless the key is already listed. Returns whether it was inserted.
    pub fn add_to_list(&mut self, entry: WatchListEntry) -> Result<bool, StoreError> {
        let mut entries = self.list()?;
        let key = entry.key();
        if entries.iter().any(|e| e.key() == key) {
            debug!("{} already in my list", key);
            return Ok(false);
        }
        entries.push(WatchListEntry {
            added_date: Utc::now(),
            ..entry
        });
        self.storage.set_json(MY_LIST_KEY, &entries)?;
        debug!("Added {} to my list", key);
        Ok(true)
    }

    /// Returns whether an entry was removed.
    pub fn remove_from_list(&mut self, key: MediaKey) -> Result<bool, StoreError> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|e| e.key() != key);
        if entries.len() == before {
            return Ok(false);
        }
        self.storage.set_json(MY_LIST_KEY, &entries)?;
        debug!("Removed {} from my list", key);
        Ok(true)
    }

    pub fn is_in_list(&self, key: MediaKey) -> Result<bool, StoreError> {
        Ok(self.list()?.iter().any(|e| e.key() == key))
    }

    // ---- ratings ----

    pub fn ratings(&self) -> Result<BTreeMap<String, RatingEntry>, StoreError> {
        Ok(self.storage.get_json(RATINGS_KEY)?.unwrap_or_default())
    }

    pub fn get_rating(&self, key: MediaKey) -> Result<Option<Thumb>, StoreError> {
        Ok(self.ratings()?.get(&key.storage_key()).map(|r| r.rating))
    }

    /// Set `value`, or clear the rating if it already equals `value`.
    ///
    /// Returns the rating now in effect.
    pub fn set_rating(&mut self, key: MediaKey, value: Thumb) -> Result<Option<Thumb>, StoreError> {
        let mut ratings = self.ratings()?;
        let storage_key = key.storage_key();

        let result = if ratings.get(&storage_key).map(|r| r.rating) == Some(value) {
            ratings.remove(&storage_key);
            None
        } else {
            ratings.insert(
                storage_key,
                RatingEntry {
                    rating: value,
                    date: Utc::now(),
                },
            );
            Some(value)
        };

        self.storage.set_json(RATINGS_KEY, &ratings)?;
        debug!(
            "Rating for {} is now {}",
            key,
            result.map(|t| t.to_string()).unwrap_or_else(|| "none".to_string())
        );
        Ok(result)
    }

    // ---- profiles ----

    /// All profiles. The default profile is created and persisted if none exist.
    pub fn profiles(&mut self) -> Result<Vec<Profile>, StoreError> {
        let profiles: Vec<Profile> = self.storage.get_json(PROFILES_KEY)?.unwrap_or_default();
        if !profiles.is_empty() {
            return Ok(profiles);
        }

        let profiles = vec![Profile::default_main()];
        self.storage.set_json(PROFILES_KEY, &profiles)?;
        info!("Created default profile '{}'", Profile::DEFAULT_ID);
        Ok(profiles)
    }

    pub fn create_profile(&mut self, name: &str, is_kids: bool, avatar: Option<String>) -> Result<Profile, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyProfileName);
        }

        let mut profiles = self.profiles()?;
        if profiles.len() >= self.max_profiles {
            return Err(StoreError::ProfileLimitReached(self.max_profiles));
        }

        let now = Utc::now();
        let profile = Profile {
            id: unique_profile_id(&now.timestamp_millis().to_string(), &profiles),
            name: name.to_string(),
            is_kids,
            avatar: avatar.unwrap_or_else(|| Profile::default_avatar(name)),
            created_date: now,
            settings: ProfileSettings::for_kids(is_kids),
        };
        profiles.push(profile.clone());
        self.storage.set_json(PROFILES_KEY, &profiles)?;
        info!("Created profile '{}' ({})", profile.name, profile.id);
        Ok(profile)
    }

    /// The selected profile, or the first one if the selection no longer exists.
    pub fn current_profile(&mut self) -> Result<Profile, StoreError> {
        let current_id: String = self
            .storage
            .get_json(CURRENT_PROFILE_KEY)?
            .unwrap_or_else(|| Profile::DEFAULT_ID.to_string());
        let mut profiles = self.profiles()?;

        match profiles.iter().position(|p| p.id == current_id) {
            Some(index) => Ok(profiles.swap_remove(index)),
            None => Ok(profiles.swap_remove(0)),
        }
    }

    pub fn set_current_profile(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.profiles()?.iter().any(|p| p.id == id) {
            return Err(StoreError::UnknownProfile(id.to_string()));
        }
        self.storage.set_json(CURRENT_PROFILE_KEY, &id)?;
        debug!("Current profile set to {}", id);
        Ok(())
    }

    // ---- region ----

    /// Persisted country code, or the configured default. Empty means "all countries".
    pub fn region(&self) -> Result<String, StoreError> {
        Ok(self
            .storage
            .get_json(REGION_KEY)?
            .unwrap_or_else(|| self.default_region.clone()))
    }

    pub fn set_region(&mut self, country_code: &str) -> Result<(), StoreError> {
        self.storage.set_json(REGION_KEY, &country_code)?;
        Ok(())
    }
}

/// `base`, or `base-1`, `base-2`, ... for the first one not already taken.
fn unique_profile_id(base: &str, profiles: &[Profile]) -> String {
    let taken = |id: &str| profiles.iter().any(|p| p.id == id);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|suffix| format!("{}-{}", base, suffix))
        .find(|id| !taken(id))
        .unwrap_or_else(|| format!("{}-{}", base, profiles.len() + 1))
}

#[cfg(test)]
mod tests;
