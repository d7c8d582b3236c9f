use super::AppContext;
use crate::output::Output;
use crate::RegionCommands;
use cineverse_core::{country_display_name, normalize_country_code, resolve_language, sort_countries, RegionSettings};
use cineverse_sources::MetadataProvider;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde_json::json;
use tracing::debug;

pub async fn run_region(cmd: RegionCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    match cmd {
        RegionCommands::Show => {
            let settings = RegionSettings::load(&ctx.store)?;
            if output.is_human() {
                let country = if settings.country().is_empty() {
                    country_display_name("", &[])
                } else {
                    settings.country().to_string()
                };
                output.info(format!("Country: {}", country));
                output.info(format!("Language: {}", settings.language()));
            } else {
                output.data(&json!({ "country": settings.country(), "language": settings.language() }));
            }
            Ok(())
        }
        RegionCommands::Set { country } => {
            let country =
                normalize_country_code(&country).ok_or_else(|| eyre!("'{}' is not a two-letter country code", country))?;

            let client = ctx.metadata_client()?;
            let change = {
                let mut settings = RegionSettings::load(&ctx.store)?;
                let listener_client = client.clone();
                settings.subscribe(move |change| listener_client.set_locale(&change.language, &change.country));
                settings.change_country(&mut ctx.store, &country)?
            };

            // The client now asks for names in the new language
            let shown = if change.country.is_empty() {
                country_display_name("", &[])
            } else {
                match client.fetch_country_table().await {
                    Ok(countries) => country_display_name(&change.country, &countries),
                    Err(e) => {
                        debug!("Country names unavailable: {}", e);
                        change.country.clone()
                    }
                }
            };

            if output.is_human() {
                output.success(format!("Country set to {} (language {})", shown, change.language));
            } else {
                output.data(&json!({
                    "country": change.country,
                    "name": shown,
                    "language": change.language,
                }));
            }
            Ok(())
        }
        RegionCommands::Countries => {
            let client = ctx.metadata_client()?;
            let mut countries = client
                .fetch_country_table()
                .await
                .map_err(|e| eyre!("Failed to fetch countries: {}", e))?;
            sort_countries(&mut countries);

            if !output.is_human() {
                output.data(&countries);
                return Ok(());
            }
            let current = ctx.store.region()?;
            let rows = countries
                .iter()
                .map(|c| {
                    let marker = if c.code == current { " *" } else { "" };
                    vec![
                        c.code.clone(),
                        format!("{}{}", c.native_name, marker),
                        resolve_language(&c.code).to_string(),
                    ]
                })
                .collect();
            output.table("Countries (* = active)", &["Code", "Name", "Language"], rows);
            Ok(())
        }
        RegionCommands::Language { country } => {
            let country =
                normalize_country_code(&country).ok_or_else(|| eyre!("'{}' is not a two-letter country code", country))?;
            let language = resolve_language(&country);
            if output.is_human() {
                output.info(language);
            } else {
                output.data(&json!({ "country": country, "language": language }));
            }
            Ok(())
        }
    }
}
