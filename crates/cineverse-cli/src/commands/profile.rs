use super::AppContext;
use crate::output::Output;
use crate::ProfileCommands;
use cineverse_models::Profile;
use color_eyre::Result;

pub fn run_profile(cmd: ProfileCommands, ctx: &mut AppContext, output: &Output) -> Result<()> {
    match cmd {
        ProfileCommands::Show => {
            let profile = ctx.store.current_profile()?;
            if output.is_human() {
                output.table("Current profile", &["ID", "Name", "Kids", "Language"], vec![row(&profile)]);
            } else {
                output.data(&profile);
            }
            Ok(())
        }
        ProfileCommands::List => {
            let current = ctx.store.current_profile()?.id;
            let profiles = ctx.store.profiles()?;
            if !output.is_human() {
                output.data(&profiles);
                return Ok(());
            }
            let rows = profiles
                .iter()
                .map(|p| {
                    let mut cells = row(p);
                    if p.id == current {
                        cells[1] = format!("{} *", cells[1]);
                    }
                    cells
                })
                .collect();
            output.table("Profiles (* = active)", &["ID", "Name", "Kids", "Language"], rows);
            Ok(())
        }
        ProfileCommands::Create { name, kids, avatar } => {
            let profile = ctx.store.create_profile(&name, kids, avatar)?;
            output.success(format!("Created profile '{}' with id {}", profile.name, profile.id));
            Ok(())
        }
        ProfileCommands::Use { id } => {
            ctx.store.set_current_profile(&id)?;
            output.success(format!("Switched to profile {}", id));
            Ok(())
        }
    }
}

fn row(profile: &Profile) -> Vec<String> {
    vec![
        profile.id.clone(),
        profile.name.clone(),
        if profile.is_kids { "yes" } else { "no" }.to_string(),
        profile.settings.language.clone(),
    ]
}
