//! Previous/next episode resolution across season boundaries.
//!
//! Only the current season's episode list is held. Crossing into an adjacent
//! season fetches that season on demand, and the navigator's state is only
//! touched once the fetch has succeeded. Dropping a pending `next`/`previous`
//! future therefore leaves the position as it was.
//!
//! Navigation methods take `&mut self`, so a second navigation cannot start
//! while a boundary fetch is still outstanding.

use crate::error::NavigationError;
use cineverse_models::{Episode, EpisodePosition, Season};
use cineverse_sources::MetadataProvider;
use tracing::{debug, warn};

/// Whether the previous/next controls should be enabled.
///
/// Computed from the loaded episode list and the season bounds only. An
/// adjacent season counts as available before anyone has checked it has episodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub prev: bool,
    pub next: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Within(EpisodePosition),
    IntoSeason(u32),
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct EpisodeNavigator {
    series_id: u64,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    position: EpisodePosition,
}

impl EpisodeNavigator {
    /// Build from already-fetched data. Specials are dropped and seasons sorted ascending.
    pub fn new(series_id: u64, seasons: Vec<Season>, position: EpisodePosition, episodes: Vec<Episode>) -> Self {
        let mut seasons: Vec<Season> = seasons.into_iter().filter(|s| !s.is_specials()).collect();
        seasons.sort_by_key(|s| s.season_number);
        Self {
            series_id,
            seasons,
            episodes,
            position,
        }
    }

    /// Fetch the episode list for `position.season` and build the navigator.
    pub async fn load<P>(
        provider: &P,
        series_id: u64,
        seasons: Vec<Season>,
        position: EpisodePosition,
    ) -> Result<Self, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        let episodes = fetch_episodes(provider, series_id, position.season).await?;
        Ok(Self::new(series_id, seasons, position, episodes))
    }

    /// Fetch the season list too, for callers that only know the series id.
    pub async fn load_series<P>(provider: &P, series_id: u64, position: EpisodePosition) -> Result<Self, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        let seasons = provider
            .fetch_tv_seasons(series_id)
            .await
            .map_err(|source| NavigationError::Fetch {
                series_id,
                season: position.season,
                source,
            })?;
        Self::load(provider, series_id, seasons, position).await
    }

    pub fn series_id(&self) -> u64 {
        self.series_id
    }

    pub fn position(&self) -> EpisodePosition {
        self.position
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn current_episode(&self) -> Option<&Episode> {
        self.episode_index().map(|i| &self.episodes[i])
    }

    fn episode_index(&self) -> Option<usize> {
        self.episodes
            .iter()
            .position(|e| e.episode_number == self.position.episode)
    }

    fn season_index(&self) -> Option<usize> {
        self.seasons
            .iter()
            .position(|s| s.season_number == self.position.season)
    }

    // An unlisted current episode behaves as if it sat just before the first
    // one, and an unlisted season as if it sat just before the first season.
    fn plan(&self, direction: Direction) -> Step {
        let episode_index = self.episode_index();
        let season_index = self.season_index();

        match direction {
            Direction::Next => {
                let next_episode = match episode_index {
                    Some(i) => self.episodes.get(i + 1),
                    None => self.episodes.first(),
                };
                if let Some(episode) = next_episode {
                    return Step::Within(EpisodePosition::new(self.position.season, episode.episode_number));
                }
                let next_season = match season_index {
                    Some(i) => self.seasons.get(i + 1),
                    None => self.seasons.first(),
                };
                match next_season {
                    Some(season) => Step::IntoSeason(season.season_number),
                    None => Step::Unavailable,
                }
            }
            Direction::Previous => {
                if let Some(i) = episode_index.filter(|i| *i > 0) {
                    let episode = &self.episodes[i - 1];
                    return Step::Within(EpisodePosition::new(self.position.season, episode.episode_number));
                }
                match season_index.filter(|i| *i > 0) {
                    Some(i) => Step::IntoSeason(self.seasons[i - 1].season_number),
                    None => Step::Unavailable,
                }
            }
        }
    }

    pub fn availability(&self) -> Availability {
        Availability {
            prev: self.plan(Direction::Previous) != Step::Unavailable,
            next: self.plan(Direction::Next) != Step::Unavailable,
        }
    }

    pub fn prev_available(&self) -> bool {
        self.availability().prev
    }

    pub fn next_available(&self) -> bool {
        self.availability().next
    }

    /// Step forward. `Ok(None)` at the last episode of the last season.
    pub async fn next<P>(&mut self, provider: &P) -> Result<Option<EpisodePosition>, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        self.step(provider, Direction::Next).await
    }

    /// Step back. `Ok(None)` at the first episode of the first season.
    pub async fn previous<P>(&mut self, provider: &P) -> Result<Option<EpisodePosition>, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        self.step(provider, Direction::Previous).await
    }

    async fn step<P>(&mut self, provider: &P, direction: Direction) -> Result<Option<EpisodePosition>, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        match self.plan(direction) {
            Step::Unavailable => {
                debug!("No {:?} episode from {} of series {}", direction, self.position, self.series_id);
                Ok(None)
            }
            Step::Within(target) => {
                self.position = target;
                Ok(Some(target))
            }
            Step::IntoSeason(season) => {
                let episodes = match fetch_episodes(provider, self.series_id, season).await {
                    Ok(episodes) => episodes,
                    Err(e) => {
                        warn!("Episode navigation abandoned, staying at {}: {}", self.position, e);
                        return Err(e);
                    }
                };

                // Provider order decides; episode numbers are not assumed to start at 1
                let edge = match direction {
                    Direction::Next => episodes.first(),
                    Direction::Previous => episodes.last(),
                };
                let Some(edge) = edge else {
                    warn!(
                        "Season {} of series {} has no episodes, staying at {}",
                        season, self.series_id, self.position
                    );
                    return Err(NavigationError::EmptySeason {
                        series_id: self.series_id,
                        season,
                    });
                };

                let target = EpisodePosition::new(season, edge.episode_number);
                debug!("Crossed season boundary {} -> {}", self.position, target);
                self.position = target;
                self.episodes = episodes;
                Ok(Some(target))
            }
        }
    }

    /// Jump to the first listed episode of another season, fetching its list.
    pub async fn select_season<P>(&mut self, provider: &P, season_number: u32) -> Result<EpisodePosition, NavigationError>
    where
        P: MetadataProvider + ?Sized,
    {
        if !self.seasons.iter().any(|s| s.season_number == season_number) {
            return Err(NavigationError::UnknownSeason(season_number));
        }
        let episodes = fetch_episodes(provider, self.series_id, season_number).await?;
        let Some(first) = episodes.first() else {
            return Err(NavigationError::EmptySeason {
                series_id: self.series_id,
                season: season_number,
            });
        };
        self.position = EpisodePosition::new(season_number, first.episode_number);
        self.episodes = episodes;
        Ok(self.position)
    }

    /// Move within the loaded season.
    pub fn select_episode(&mut self, episode_number: u32) -> Result<EpisodePosition, NavigationError> {
        if !self.episodes.iter().any(|e| e.episode_number == episode_number) {
            return Err(NavigationError::UnknownEpisode {
                season: self.position.season,
                episode: episode_number,
            });
        }
        self.position.episode = episode_number;
        Ok(self.position)
    }
}

async fn fetch_episodes<P>(provider: &P, series_id: u64, season: u32) -> Result<Vec<Episode>, NavigationError>
where
    P: MetadataProvider + ?Sized,
{
    debug!("Fetching season {} of series {} from {}", season, series_id, provider.provider_name());
    provider
        .fetch_season_episodes(series_id, season)
        .await
        .map(|details| details.episodes)
        .map_err(|source| NavigationError::Fetch {
            series_id,
            season,
            source,
        })
}
