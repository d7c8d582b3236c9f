use cineverse_sources::SourceError;
use std::path::PathBuf;
use thiserror::Error;

/// The persistence layer could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to access state file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode value for key '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored value for key '{key}' is not valid: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Profile limit of {0} reached")]
    ProfileLimitReached(usize),

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Profile name cannot be empty")]
    EmptyProfileName,
}

/// Why a navigation step was abandoned. The navigator's position is unchanged in every case.
#[derive(Debug, Error)]
pub enum NavigationError {
    #[error("Failed to fetch season {season} of series {series_id}: {source}")]
    Fetch {
        series_id: u64,
        season: u32,
        #[source]
        source: SourceError,
    },

    #[error("Season {season} of series {series_id} has no episodes")]
    EmptySeason { series_id: u64, season: u32 },

    #[error("Season {0} is not part of this series")]
    UnknownSeason(u32),

    #[error("Episode {episode} is not listed in season {season}")]
    UnknownEpisode { season: u32, episode: u32 },
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("No streaming servers are configured")]
    NoServers,

    #[error("Server '{name}' has an invalid url '{url}': {source}")]
    InvalidServerUrl {
        name: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}
