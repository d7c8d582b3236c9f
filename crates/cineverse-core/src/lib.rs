pub mod callouts;
pub mod error;
pub mod navigation;
pub mod player;
pub mod region;
pub mod storage;
pub mod store;

pub use callouts::{contextual_callouts, CalloutInput};
pub use error::{NavigationError, PlayerError, StorageError, StoreError};
pub use navigation::{Availability, EpisodeNavigator};
pub use player::{PlaybackTarget, PlayerEmbed};
pub use region::{country_display_name, normalize_country_code, resolve_language, sort_countries, RegionChange, RegionSettings, SubscriptionId, DEFAULT_LANGUAGE};
pub use storage::{JsonFileStorage, KeyValueStorage, MemoryStorage};
pub use store::WatchStateStore;
