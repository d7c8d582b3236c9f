use crate::error::PlayerError;
use cineverse_config::{PlayerConfig, StreamServer};
use cineverse_models::{EpisodePosition, MediaKey};
use tracing::debug;
use url::Url;

/// What the embedded player should open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackTarget {
    Movie { id: u64 },
    /// Without a position the player opens the series landing view.
    Tv { id: u64, position: Option<EpisodePosition> },
}

impl PlaybackTarget {
    pub fn key(&self) -> MediaKey {
        match self {
            PlaybackTarget::Movie { id } => MediaKey::movie(*id),
            PlaybackTarget::Tv { id, .. } => MediaKey::tv(*id),
        }
    }
}

/// Builds embed URLs for the configured streaming servers.
#[derive(Debug, Clone)]
pub struct PlayerEmbed {
    config: PlayerConfig,
}

impl PlayerEmbed {
    pub fn new(config: PlayerConfig) -> Self {
        Self { config }
    }

    pub fn servers(&self) -> &[StreamServer] {
        &self.config.servers
    }

    /// Server at `index`, wrapping around so callers can keep incrementing.
    pub fn server(&self, index: usize) -> Result<&StreamServer, PlayerError> {
        let servers = &self.config.servers;
        if servers.is_empty() {
            return Err(PlayerError::NoServers);
        }
        Ok(&servers[index % servers.len()])
    }

    pub fn url(&self, server_index: usize, target: &PlaybackTarget) -> Result<Url, PlayerError> {
        let server = self.server(server_index)?;
        let invalid = |source| PlayerError::InvalidServerUrl {
            name: server.name.clone(),
            url: server.url.clone(),
            source,
        };

        let path = match target {
            PlaybackTarget::Movie { id } => format!("movie/{}", id),
            PlaybackTarget::Tv { id, position: Some(p) } => format!("tv/{}/{}/{}", id, p.season, p.episode),
            PlaybackTarget::Tv { id, position: None } => format!("tv/{}", id),
        };

        // Joining against a base without a trailing slash would drop its last segment
        let base = Url::parse(&format!("{}/", server.url.trim_end_matches('/'))).map_err(invalid)?;
        let mut url = base.join(&path).map_err(invalid)?;

        url.query_pairs_mut()
            .append_pair("primaryColor", &self.config.primary_color)
            .append_pair("secondaryColor", &self.config.secondary_color)
            .append_pair("iconColor", &self.config.icon_color)
            .append_pair("icons", "default")
            .append_pair("player", "default")
            .append_pair("title", "true")
            .append_pair("poster", "true")
            .append_pair("autoplay", bool_param(self.config.autoplay))
            .append_pair("nextbutton", bool_param(self.config.next_button));

        debug!("Embed url for {} on {}: {}", target.key(), server.name, url);
        Ok(url)
    }
}

fn bool_param(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed() -> PlayerEmbed {
        PlayerEmbed::new(PlayerConfig::default())
    }

    #[test]
    fn test_movie_url_with_default_query() {
        let url = embed().url(0, &PlaybackTarget::Movie { id: 550 }).unwrap();
        assert_eq!(
            url.as_str(),
            "https://vidlink.pro/movie/550?primaryColor=c92222&secondaryColor=a2a2a2&iconColor=eefdec\
             &icons=default&player=default&title=true&poster=true&autoplay=false&nextbutton=true"
        );
    }

    #[test]
    fn test_tv_url_with_and_without_position() {
        let embed = embed();
        let episode = PlaybackTarget::Tv {
            id: 1399,
            position: Some(EpisodePosition::new(2, 5)),
        };
        assert_eq!(embed.url(0, &episode).unwrap().path(), "/tv/1399/2/5");

        let landing = PlaybackTarget::Tv { id: 1399, position: None };
        assert_eq!(embed.url(0, &landing).unwrap().path(), "/tv/1399");
    }

    #[test]
    fn test_server_cycles_and_keeps_base_path() {
        let mut config = PlayerConfig::default();
        config.servers.push(StreamServer {
            name: "Mirror".to_string(),
            url: "https://mirror.example/embed/".to_string(),
        });
        config.autoplay = true;
        let embed = PlayerEmbed::new(config);

        assert_eq!(embed.server(0).unwrap().name, "VidLink.pro");
        assert_eq!(embed.server(1).unwrap().name, "Mirror");
        assert_eq!(embed.server(2).unwrap().name, "VidLink.pro");

        let url = embed.url(1, &PlaybackTarget::Movie { id: 7 }).unwrap();
        assert_eq!(url.path(), "/embed/movie/7");
        assert!(url.query_pairs().any(|(k, v)| k == "autoplay" && v == "true"));
    }

    #[test]
    fn test_no_servers_and_bad_url() {
        let mut config = PlayerConfig::default();
        config.servers.clear();
        let target = PlaybackTarget::Movie { id: 1 };
        assert!(matches!(PlayerEmbed::new(config.clone()).url(0, &target), Err(PlayerError::NoServers)));

        config.servers.push(StreamServer {
            name: "Broken".to_string(),
            url: "not a url".to_string(),
        });
        assert!(matches!(
            PlayerEmbed::new(config).url(0, &target),
            Err(PlayerError::InvalidServerUrl { .. })
        ));
    }
}
