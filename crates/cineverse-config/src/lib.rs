pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, MetadataConfig, PlayerConfig, RegionConfig, StorageConfig, StreamServer, default_stream_servers};
pub use credentials::{CredentialStore, TMDB_TOKEN_ENV};
pub use paths::{PathManager, container_base_path};
