use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub region: RegionConfig,
    #[serde(default)]
    pub player: PlayerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Where and how the metadata provider is reached
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MetadataConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RegionConfig {
    /// Country used when nothing has been persisted yet. Empty means "all countries".
    #[serde(default = "default_country")]
    pub default_country: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StreamServer {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerConfig {
    #[serde(default = "default_stream_servers")]
    pub servers: Vec<StreamServer>,
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,
    #[serde(default = "default_icon_color")]
    pub icon_color: String,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default = "default_true")]
    pub next_button: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_continue_watching_limit")]
    pub continue_watching_limit: usize,
    #[serde(default = "default_max_profiles")]
    pub max_profiles: usize,
    /// Overrides the platform state file location
    #[serde(default)]
    pub state_file: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

fn default_language() -> String {
    "fr-FR".to_string()
}

fn default_country() -> String {
    "FR".to_string()
}

pub fn default_stream_servers() -> Vec<StreamServer> {
    vec![StreamServer {
        name: "VidLink.pro".to_string(),
        url: "https://vidlink.pro".to_string(),
    }]
}

fn default_primary_color() -> String {
    "c92222".to_string()
}

fn default_secondary_color() -> String {
    "a2a2a2".to_string()
}

fn default_icon_color() -> String {
    "eefdec".to_string()
}

fn default_continue_watching_limit() -> usize {
    20
}

fn default_max_profiles() -> usize {
    5
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            default_language: default_language(),
        }
    }
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            default_country: default_country(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            servers: default_stream_servers(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            icon_color: default_icon_color(),
            autoplay: false,
            next_button: default_true(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            continue_watching_limit: default_continue_watching_limit(),
            max_profiles: default_max_profiles(),
            state_file: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.metadata.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("metadata.base_url cannot be empty"));
        }
        if self.metadata.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("metadata.timeout_seconds must be positive"));
        }

        let country = &self.region.default_country;
        // Language lookup is case-sensitive, so "de" would silently fall back
        if !country.is_empty() && (country.len() != 2 || !country.chars().all(|c| c.is_ascii_uppercase())) {
            return Err(anyhow::anyhow!(
                "region.default_country must be an upper-case two-letter country code or empty, got '{}'",
                country
            ));
        }

        if self.player.servers.is_empty() {
            return Err(anyhow::anyhow!("player.servers must list at least one server"));
        }
        for server in &self.player.servers {
            if server.url.trim().is_empty() {
                return Err(anyhow::anyhow!("Server '{}' has an empty url", server.name));
            }
        }

        if self.storage.continue_watching_limit == 0 {
            return Err(anyhow::anyhow!("storage.continue_watching_limit must be positive"));
        }
        if self.storage.max_profiles == 0 {
            return Err(anyhow::anyhow!("storage.max_profiles must be positive"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.region.default_country = "DE".to_string();
        config.player.autoplay = true;
        config.storage.continue_watching_limit = 10;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.region.default_country, "DE");
        assert!(loaded.player.autoplay);
        assert_eq!(loaded.storage.continue_watching_limit, 10);
        assert_eq!(loaded.player.servers, default_stream_servers());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[region]\ndefault_country = \"US\"\n").unwrap();
        assert_eq!(config.region.default_country, "US");
        assert_eq!(config.metadata.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.storage.continue_watching_limit, 20);
        assert_eq!(config.storage.max_profiles, 5);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.region.default_country, "FR");
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.region.default_country = String::new();
        assert!(config.validate().is_ok());

        config.region.default_country = "FRA".to_string();
        assert!(config.validate().is_err());
        config.region.default_country = "de".to_string();
        assert!(config.validate().is_err());
        config.region.default_country = "FR".to_string();

        config.player.servers.clear();
        assert!(config.validate().is_err());
        config.player.servers = default_stream_servers();

        config.storage.continue_watching_limit = 0;
        assert!(config.validate().is_err());
    }
}
