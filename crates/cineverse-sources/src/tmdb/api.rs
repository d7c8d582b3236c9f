use cineverse_models::{Country, Episode, Season, SeasonDetails};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TmdbEpisode {
    pub id: u64,
    pub episode_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub air_date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TmdbSeasonResponse {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<TmdbEpisode>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TmdbSeasonSummary {
    pub id: u64,
    pub season_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TmdbTvDetails {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub seasons: Vec<TmdbSeasonSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct TmdbCountry {
    pub iso_3166_1: String,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub native_name: Option<String>,
}

impl From<TmdbSeasonResponse> for SeasonDetails {
    fn from(response: TmdbSeasonResponse) -> Self {
        SeasonDetails {
            season_number: response.season_number,
            // Provider order is kept; navigation relies on it
            episodes: response
                .episodes
                .into_iter()
                .map(|ep| Episode {
                    episode_number: ep.episode_number,
                    id: ep.id,
                    name: ep.name,
                })
                .collect(),
        }
    }
}

impl From<TmdbSeasonSummary> for Season {
    fn from(summary: TmdbSeasonSummary) -> Self {
        Season {
            season_number: summary.season_number,
            id: summary.id,
            name: summary.name,
            episode_count: summary.episode_count,
        }
    }
}

impl From<TmdbCountry> for Country {
    fn from(country: TmdbCountry) -> Self {
        // Some rows ship without a native name; fall back to English, then the code
        let native_name = country
            .native_name
            .filter(|n| !n.is_empty())
            .or_else(|| country.english_name.clone())
            .unwrap_or_else(|| country.iso_3166_1.clone());
        Country {
            code: country.iso_3166_1,
            english_name: country.english_name,
            native_name,
        }
    }
}

pub fn season_path(series_id: u64, season_number: u32) -> String {
    format!("/tv/{}/season/{}", series_id, season_number)
}

pub fn tv_details_path(series_id: u64) -> String {
    format!("/tv/{}", series_id)
}

pub const COUNTRIES_PATH: &str = "/configuration/countries";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_response_keeps_provider_order() {
        let json = r#"{
            "season_number": 2,
            "episodes": [
                {"id": 20, "episode_number": 0, "name": "Prologue"},
                {"id": 21, "episode_number": 1, "name": "Pilot"},
                {"id": 22, "episode_number": 2}
            ]
        }"#;
        let response: TmdbSeasonResponse = serde_json::from_str(json).unwrap();
        let details: SeasonDetails = response.into();
        assert_eq!(details.season_number, 2);
        let numbers: Vec<u32> = details.episodes.iter().map(|e| e.episode_number).collect();
        assert_eq!(numbers, vec![0, 1, 2]);
        assert_eq!(details.episodes[2].name, None);
    }

    #[test]
    fn test_tv_details_seasons() {
        let json = r#"{
            "id": 1399,
            "name": "Game of Thrones",
            "seasons": [
                {"id": 3627, "season_number": 0, "name": "Specials", "episode_count": 15},
                {"id": 3624, "season_number": 1, "name": "Season 1", "episode_count": 10}
            ]
        }"#;
        let details: TmdbTvDetails = serde_json::from_str(json).unwrap();
        let seasons: Vec<Season> = details.seasons.into_iter().map(Season::from).collect();
        assert_eq!(seasons.len(), 2);
        assert!(seasons[0].is_specials());
        assert_eq!(seasons[1].episode_count, Some(10));
    }

    #[test]
    fn test_country_native_name_fallback() {
        let json = r#"[
            {"iso_3166_1": "FR", "english_name": "France", "native_name": "France"},
            {"iso_3166_1": "XK", "english_name": "Kosovo", "native_name": ""},
            {"iso_3166_1": "ZZ"}
        ]"#;
        let rows: Vec<TmdbCountry> = serde_json::from_str(json).unwrap();
        let countries: Vec<Country> = rows.into_iter().map(Country::from).collect();
        assert_eq!(countries[0].native_name, "France");
        assert_eq!(countries[1].native_name, "Kosovo");
        assert_eq!(countries[2].native_name, "ZZ");
    }
}
