pub mod callouts;
pub mod config;
pub mod continue_watching;
pub mod episode;
pub mod list;
pub mod play;
pub mod profile;
pub mod prompts;
pub mod rating;
pub mod region;

use cineverse_config::{Config, CredentialStore, PathManager};
use cineverse_core::{JsonFileStorage, RegionSettings, WatchStateStore};
use cineverse_sources::TmdbClient;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use tracing::debug;

/// Everything a command needs: paths, validated config and the opened state store.
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub store: WatchStateStore<JsonFileStorage>,
}

impl AppContext {
    pub fn load(paths: PathManager) -> Result<Self> {
        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

        let state_file = config.storage.state_file.clone().unwrap_or_else(|| paths.state_file());
        let storage = JsonFileStorage::open(&state_file)
            .wrap_err_with(|| format!("Failed to open state file {}", state_file.display()))?;

        let store = WatchStateStore::from_config(storage, &config.storage, &config.region);
        debug!("Using state file {}", store.storage().path().display());
        Ok(Self { paths, config, store })
    }

    /// Metadata client whose locale follows the persisted region.
    pub fn metadata_client(&self) -> Result<TmdbClient> {
        let token = load_credentials(&self.paths)?.resolve_tmdb_api_token();
        let client = TmdbClient::new(&self.config.metadata, token);
        let region = RegionSettings::load(&self.store)?;
        client.set_locale(region.language(), region.country());
        Ok(client)
    }
}

pub fn load_credentials(paths: &PathManager) -> Result<CredentialStore> {
    let credentials_file = paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(store)
}

/// Optional text column for tables.
pub(crate) fn or_dash(value: Option<&str>) -> String {
    value.filter(|v| !v.is_empty()).unwrap_or("-").to_string()
}
