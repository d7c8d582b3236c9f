use super::AppContext;
use crate::output::Output;
use cineverse_models::{MediaKey, MediaType, Thumb};
use color_eyre::Result;
use serde_json::json;

pub fn run_rate(id: u64, media_type: MediaType, thumb: Thumb, ctx: &mut AppContext, output: &Output) -> Result<()> {
    let key = MediaKey::new(id, media_type);
    match ctx.store.set_rating(key, thumb)? {
        Some(rating) => output.success(format!("Rated {} thumbs {}", key, rating)),
        None => output.success(format!("Cleared rating for {}", key)),
    }
    Ok(())
}

pub fn run_show_rating(id: u64, media_type: MediaType, ctx: &AppContext, output: &Output) -> Result<()> {
    let key = MediaKey::new(id, media_type);
    let rating = ctx.store.get_rating(key)?;
    if output.is_human() {
        match rating {
            Some(rating) => output.info(format!("{}: thumbs {}", key, rating)),
            None => output.info(format!("{}: not rated", key)),
        }
    } else {
        output.data(&json!({ "key": key.storage_key(), "rating": rating }));
    }
    Ok(())
}
