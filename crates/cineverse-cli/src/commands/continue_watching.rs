use super::{or_dash, AppContext};
use crate::output::Output;
use crate::ContinueCommands;
use cineverse_models::{ContinueWatchingEntry, EpisodePosition, MediaKey};
use color_eyre::Result;

pub fn run_continue(cmd: ContinueCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    match cmd {
        ContinueCommands::Upsert {
            id,
            media_type,
            progress,
            title,
            season,
            episode,
        } => {
            let key = MediaKey::new(id, media_type);
            let mut entry = ContinueWatchingEntry::new(key);
            if let Some(title) = title {
                entry = entry.with_title(title);
            }
            if let (Some(season), Some(episode)) = (season, episode) {
                entry = entry.at_episode(season, episode);
            }

            ctx.store.upsert_continue_watching(entry, progress)?;
            output.success(format!("Saved progress for {} ({}%)", key, progress.min(100)));
            Ok(())
        }
        ContinueCommands::Remove { id, media_type } => {
            let key = MediaKey::new(id, media_type);
            if ctx.store.remove_continue_watching(key)? {
                output.success(format!("Removed {} from continue watching", key));
            } else {
                output.info(format!("{} was not in continue watching", key));
            }
            Ok(())
        }
        ContinueCommands::Show => {
            let entries = ctx.store.continue_watching()?;
            if !output.is_human() {
                output.data(&entries);
                return Ok(());
            }
            let rows = entries
                .iter()
                .map(|e| {
                    let episode = match (e.season, e.episode) {
                        (Some(s), Some(ep)) => EpisodePosition::new(s, ep).to_string(),
                        _ => "-".to_string(),
                    };
                    vec![
                        e.id.to_string(),
                        e.media_type.to_string(),
                        or_dash(e.title.as_deref()),
                        episode,
                        format!("{}%", e.progress),
                        e.last_watched.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                })
                .collect();
            output.table(
                "Continue watching",
                &["ID", "Type", "Title", "Episode", "Progress", "Last watched"],
                rows,
            );
            Ok(())
        }
    }
}
