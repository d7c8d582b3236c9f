use serde::{Deserialize, Serialize};
use std::fmt;

/// A season as listed on a series' detail record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Season {
    pub season_number: u32,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub episode_count: Option<u32>,
}

impl Season {
    /// Season 0 holds specials and is never navigated into.
    pub fn is_specials(&self) -> bool {
        self.season_number == 0
    }

    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Saison {}", self.season_number),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    pub episode_number: u32,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

/// Episode listing of one season, in provider order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SeasonDetails {
    #[serde(default)]
    pub season_number: u32,
    #[serde(default)]
    pub episodes: Vec<Episode>,
}

/// A `(season, episode)` position within a series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EpisodePosition {
    pub season: u32,
    pub episode: u32,
}

impl EpisodePosition {
    pub fn new(season: u32, episode: u32) -> Self {
        Self { season, episode }
    }
}

impl fmt::Display for EpisodePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}E{:02}", self.season, self.episode)
    }
}
