use async_trait::async_trait;
use cineverse_models::{Country, Season, SeasonDetails};
use crate::error::SourceError;

/// Language and region sent with every metadata request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    pub language: String,
    pub region: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "fr-FR".to_string(),
            region: "FR".to_string(),
        }
    }
}

/// The slice of the metadata REST API the watch-state core depends on.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Episode list of one season, in provider order.
    async fn fetch_season_episodes(&self, series_id: u64, season_number: u32) -> Result<SeasonDetails, SourceError>;

    /// Seasons listed on the series record, specials included.
    async fn fetch_tv_seasons(&self, series_id: u64) -> Result<Vec<Season>, SourceError>;

    /// Country table used to populate region pickers.
    async fn fetch_country_table(&self) -> Result<Vec<Country>, SourceError>;
}
