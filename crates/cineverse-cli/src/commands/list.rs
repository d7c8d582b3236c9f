use super::{or_dash, AppContext};
use crate::output::Output;
use crate::ListCommands;
use cineverse_models::{MediaKey, WatchListEntry};
use color_eyre::Result;
use serde_json::json;

pub fn run_list(cmd: ListCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    match cmd {
        ListCommands::Add { id, media_type, title, poster } => {
            let key = MediaKey::new(id, media_type);
            let mut entry = WatchListEntry::new(key);
            if let Some(title) = title {
                entry = entry.with_title(title);
            }
            if let Some(poster) = poster {
                entry = entry.with_poster(poster);
            }

            if ctx.store.add_to_list(entry)? {
                output.success(format!("Added {} to my list", key));
            } else {
                output.info(format!("{} is already in my list", key));
            }
            Ok(())
        }
        ListCommands::Remove { id, media_type } => {
            let key = MediaKey::new(id, media_type);
            if ctx.store.remove_from_list(key)? {
                output.success(format!("Removed {} from my list", key));
            } else {
                output.info(format!("{} was not in my list", key));
            }
            Ok(())
        }
        ListCommands::Show => {
            let entries = ctx.store.list()?;
            if !output.is_human() {
                output.data(&entries);
                return Ok(());
            }
            let rows = entries
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.media_type.to_string(),
                        or_dash(e.title.as_deref()),
                        e.added_date.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                })
                .collect();
            output.table("My list", &["ID", "Type", "Title", "Added"], rows);
            Ok(())
        }
        ListCommands::Contains { id, media_type } => {
            let key = MediaKey::new(id, media_type);
            let listed = ctx.store.is_in_list(key)?;
            if output.is_human() {
                output.info(if listed { "yes" } else { "no" });
            } else {
                output.data(&json!({ "key": key.storage_key(), "in_list": listed }));
            }
            Ok(())
        }
    }
}
