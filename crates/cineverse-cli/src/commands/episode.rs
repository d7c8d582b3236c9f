use super::AppContext;
use crate::output::Output;
use crate::{EpisodeArgs, EpisodeCommands};
use cineverse_core::{EpisodeNavigator, NavigationError};
use cineverse_models::EpisodePosition;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;

pub async fn run_episode(cmd: EpisodeCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    let client = ctx.metadata_client()?;

    let (args, step) = match cmd {
        EpisodeCommands::Next(args) => (args, Some(true)),
        EpisodeCommands::Prev(args) => (args, Some(false)),
        EpisodeCommands::Status(args) => (args, None),
    };
    let EpisodeArgs { series, season, episode } = args;
    let start = EpisodePosition::new(season, episode);

    let mut navigator = EpisodeNavigator::load_series(&client, series, start)
        .await
        .map_err(|e| eyre!("Failed to load series {}: {}", series, e))?;

    let Some(forward) = step else {
        let availability = navigator.availability();
        if output.is_human() {
            let title = navigator
                .current_episode()
                .and_then(|e| e.name.clone())
                .unwrap_or_default();
            output.info(format!("{} {}", start, title).trim_end());
            output.info(format!("Previous: {}", if availability.prev { "available" } else { "none" }));
            output.info(format!("Next: {}", if availability.next { "available" } else { "none" }));
            let rows = navigator
                .seasons()
                .iter()
                .map(|s| {
                    let marker = if s.season_number == start.season { " *" } else { "" };
                    vec![
                        format!("{}{}", s.display_name(), marker),
                        s.episode_count.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            output.table("Seasons", &["Season", "Episodes"], rows);
        } else {
            output.data(&json!({
                "series": navigator.series_id(),
                "episodes_in_season": navigator.episodes().len(),
                "season": start.season,
                "episode": start.episode,
                "prev_available": availability.prev,
                "next_available": availability.next,
            }));
        }
        return Ok(());
    };

    let result = if forward {
        navigator.next(&client).await
    } else {
        navigator.previous(&client).await
    };

    match result {
        Ok(Some(position)) => {
            if output.is_human() {
                let name = navigator.current_episode().and_then(|e| e.name.clone());
                match name {
                    Some(name) => output.success(format!("{} {}", position, name)),
                    None => output.success(position.to_string()),
                }
            } else {
                output.data(&json!({
                    "series": series,
                    "season": position.season,
                    "episode": position.episode,
                }));
            }
            Ok(())
        }
        Ok(None) => {
            let edge = if forward { "last" } else { "first" };
            output.info(format!("{} is the {} episode of the series", start, edge));
            Ok(())
        }
        Err(NavigationError::EmptySeason { season, .. }) => {
            output.warn(format!("Season {} has no episodes yet, staying at {}", season, start));
            Ok(())
        }
        Err(NavigationError::Fetch { season, source, .. }) if source.is_not_found() => Err(eyre!(
            "Season {} of series {} is not available from the metadata API, staying at {}",
            season,
            series,
            navigator.position()
        )),
        Err(e) => Err(eyre!("Could not move from {}: {}", navigator.position(), e)),
    }
}
