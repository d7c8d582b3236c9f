use super::{load_credentials, prompts};
use crate::output::Output;
use crate::ConfigCommands;
use cineverse_config::{Config, PathManager, TMDB_TOKEN_ENV};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: ConfigCommands, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, paths, output),
        ConfigCommands::Init { force } => init_config(force, paths, output),
        ConfigCommands::Token { value } => configure_token(value, paths, output),
    }
}

fn show_config(full: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let exists = config_file.exists();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let credentials = load_credentials(paths)?;
    let token = credentials.resolve_tmdb_api_token();
    let token_source = if std::env::var(TMDB_TOKEN_ENV).is_ok() { "environment" } else { "credentials file" };
    let token_display = match &token {
        Some(t) if full => t.clone(),
        Some(t) => mask_string(t),
        None => "<not set>".to_string(),
    };
    let state_file = config.storage.state_file.clone().unwrap_or_else(|| paths.state_file());

    if !output.is_human() {
        output.data(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": exists,
            "state_file": state_file.display().to_string(),
            "api_token": token_display,
            "config": config,
        }));
        return Ok(());
    }

    if !exists {
        output.warn(format!(
            "No configuration file at {}, showing defaults. Run 'cineverse config init' to create one.",
            config_file.display()
        ));
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new("Value").fg(Color::Cyan).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec!["Config file".to_string(), config_file.display().to_string()]);
    table.add_row(vec!["State file".to_string(), state_file.display().to_string()]);
    table.add_row(vec!["API base URL".to_string(), config.metadata.base_url.clone()]);
    table.add_row(vec![
        "API token".to_string(),
        if token.is_some() {
            format!("{} ({})", token_display, token_source)
        } else {
            token_display.red().to_string()
        },
    ]);
    table.add_row(vec!["Default country".to_string(), config.region.default_country.clone()]);
    table.add_row(vec![
        "Servers".to_string(),
        config
            .player
            .servers
            .iter()
            .map(|s| format!("{} ({})", s.name, s.url))
            .collect::<Vec<_>>()
            .join("\n"),
    ]);
    table.add_row(vec!["Autoplay".to_string(), config.player.autoplay.to_string()]);
    table.add_row(vec![
        "Continue watching limit".to_string(),
        config.storage.continue_watching_limit.to_string(),
    ]);
    table.add_row(vec!["Max profiles".to_string(), config.storage.max_profiles.to_string()]);
    println!("{}", table);

    if let Err(e) = config.validate() {
        output.warn(format!("Configuration is invalid: {}", e));
    }
    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        let overwrite = output.is_human()
            && prompts::prompt_yes_no(
                &format!("{} already exists. Overwrite with defaults?", config_file.display()),
                false,
            )?;
        if !overwrite {
            output.info("Keeping existing configuration");
            return Ok(());
        }
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write {}: {}", config_file.display(), e))?;
    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn configure_token(value: Option<String>, paths: &PathManager, output: &Output) -> Result<()> {
    let token = match value {
        Some(value) => value,
        None => prompts::prompt_password("Metadata API bearer token")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(eyre!("Token cannot be empty"));
    }

    let mut credentials = load_credentials(paths)?;
    credentials.set_tmdb_api_token(token);
    credentials
        .save()
        .map_err(|e| eyre!("Failed to save credentials: {}", e))?;
    output.success(format!("Token saved to {}", paths.credentials_file().display()));

    if std::env::var(TMDB_TOKEN_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored token", TMDB_TOKEN_ENV));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("short"), "*****");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh***load");
    }
}
