use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::media::{MediaKey, MediaType};

/// A partially consumed title. At most one per key; `last_watched` moves on every upsert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinueWatchingEntry {
    pub id: u64,
    #[serde(default)]
    pub media_type: MediaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    /// Percentage in `0..=100`.
    pub progress: u8,
    pub last_watched: DateTime<Utc>,
    // Only meaningful for tv
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub episode_name: Option<String>,
}

impl ContinueWatchingEntry {
    pub fn new(key: MediaKey) -> Self {
        Self {
            id: key.id,
            media_type: key.media_type,
            title: None,
            poster_path: None,
            progress: 0,
            last_watched: Utc::now(),
            season: None,
            episode: None,
            episode_name: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Attach a season/episode position. Ignored for movies.
    pub fn at_episode(mut self, season: u32, episode: u32) -> Self {
        if self.media_type == MediaType::Tv {
            self.season = Some(season);
            self.episode = Some(episode);
        }
        self
    }

    pub fn key(&self) -> MediaKey {
        MediaKey::new(self.id, self.media_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_ignores_episode_position() {
        let entry = ContinueWatchingEntry::new(MediaKey::movie(550)).at_episode(1, 2);
        assert_eq!(entry.season, None);
        assert_eq!(entry.episode, None);
    }

    #[test]
    fn test_tv_keeps_episode_position() {
        let entry = ContinueWatchingEntry::new(MediaKey::tv(1399)).at_episode(2, 5);
        assert_eq!(entry.season, Some(2));
        assert_eq!(entry.episode, Some(5));
    }
}
