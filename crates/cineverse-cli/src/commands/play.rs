use super::AppContext;
use crate::output::Output;
use crate::PlayCommands;
use cineverse_core::{PlaybackTarget, PlayerEmbed};
use cineverse_models::EpisodePosition;
use color_eyre::Result;
use serde_json::json;

pub fn run_play(cmd: PlayCommands, ctx: &AppContext, output: &Output) -> Result<()> {
    let (target, server_index) = match cmd {
        PlayCommands::Movie { id, server } => (PlaybackTarget::Movie { id }, server),
        PlayCommands::Tv {
            id,
            season,
            episode,
            server,
        } => {
            let position = season.zip(episode).map(|(s, e)| EpisodePosition::new(s, e));
            (PlaybackTarget::Tv { id, position }, server)
        }
    };

    let embed = PlayerEmbed::new(ctx.config.player.clone());
    let server = embed.server(server_index)?;
    let url = embed.url(server_index, &target)?;

    if output.is_human() {
        let servers = embed.servers();
        // Non-empty, `server` succeeded
        let active = server_index % servers.len();
        for (i, s) in servers.iter().enumerate() {
            let marker = if i == active { "*" } else { " " };
            output.info(format!("{} [{}] {}", marker, i, s.name));
        }
        output.info(url.as_str());
    } else {
        output.data(&json!({ "server": server.name, "url": url.as_str() }));
    }
    Ok(())
}
