use crate::error::SourceError;
use crate::tmdb::api::{self, TmdbCountry, TmdbSeasonResponse, TmdbTvDetails};
use crate::traits::{Locale, MetadataProvider};
use async_trait::async_trait;
use cineverse_config::MetadataConfig;
use cineverse_models::{Country, Season, SeasonDetails};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, warn};

pub fn create_tmdb_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("cineverse/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_token: Option<String>,
    locale: Arc<RwLock<Locale>>,
}

impl TmdbClient {
    pub fn new(config: &MetadataConfig, api_token: Option<String>) -> Self {
        Self {
            client: Arc::new(create_tmdb_client(Duration::from_secs(config.timeout_seconds))),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token,
            locale: Arc::new(RwLock::new(Locale {
                language: config.default_language.clone(),
                ..Locale::default()
            })),
        }
    }

    /// Update the language/region sent with subsequent requests.
    ///
    /// Clones share the locale, so a region change reaches every holder.
    pub fn set_locale(&self, language: &str, region: &str) {
        let mut locale = self.locale.write().unwrap_or_else(|e| e.into_inner());
        locale.language = language.to_string();
        locale.region = region.to_string();
        debug!("Metadata locale set to language={} region={}", language, region);
    }

    pub fn locale(&self) -> Locale {
        self.locale.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SourceError> {
        let token = self.api_token.as_deref().ok_or(SourceError::MissingToken)?;
        let url = format!("{}{}", self.base_url, path);
        let locale = self.locale();

        let mut query = vec![("language", locale.language.as_str())];
        // Empty region is the "all countries" sentinel and must not be sent
        if !locale.region.is_empty() {
            query.push(("region", locale.region.as_str()));
        }

        debug!("GET {} (language={}, region={})", url, locale.language, locale.region);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await
            .map_err(|source| SourceError::Transport { url: url.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Metadata API returned {} for {}", status, url);
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| SourceError::Transport { url: url.clone(), source })?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_season_episodes(&self, series_id: u64, season_number: u32) -> Result<SeasonDetails, SourceError> {
        let response: TmdbSeasonResponse = self.get_json(&api::season_path(series_id, season_number)).await?;
        Ok(response.into())
    }

    async fn fetch_tv_seasons(&self, series_id: u64) -> Result<Vec<Season>, SourceError> {
        let details: TmdbTvDetails = self.get_json(&api::tv_details_path(series_id)).await?;
        debug!(
            "Series {} ({}) lists {} seasons",
            details.id,
            details.name.as_deref().unwrap_or("untitled"),
            details.seasons.len()
        );
        Ok(details.seasons.into_iter().map(Season::from).collect())
    }

    async fn fetch_country_table(&self) -> Result<Vec<Country>, SourceError> {
        let rows: Vec<TmdbCountry> = self.get_json(api::COUNTRIES_PATH).await?;
        Ok(rows.into_iter().map(Country::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_token_fails_before_any_request() {
        let client = TmdbClient::new(&MetadataConfig::default(), None);
        let err = client.fetch_season_episodes(1399, 1).await.unwrap_err();
        assert!(matches!(err, SourceError::MissingToken));
    }

    #[test]
    fn test_locale_is_shared_between_clones() {
        let client = TmdbClient::new(&MetadataConfig::default(), Some("token".to_string()));
        let clone = client.clone();
        client.set_locale("de-DE", "DE");
        assert_eq!(
            clone.locale(),
            Locale {
                language: "de-DE".to_string(),
                region: "DE".to_string()
            }
        );
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let mut config = MetadataConfig::default();
        config.base_url = "https://api.example.org/3/".to_string();
        let client = TmdbClient::new(&config, None);
        assert_eq!(client.base_url, "https://api.example.org/3");
    }
}
