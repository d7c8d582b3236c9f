use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use cineverse_models::{MediaType, Thumb};
use commands::{callouts, config, continue_watching, episode, list, play, profile, rating, region, AppContext};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "cineverse")]
#[command(about = "Cineverse - watch list, progress and episode navigation for your streaming catalogue")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to the rolling log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_to_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage "my list"
    List {
        #[command(subcommand)]
        cmd: ListCommands,
    },
    /// Manage the continue-watching row
    #[command(name = "continue")]
    Continue {
        #[command(subcommand)]
        cmd: ContinueCommands,
    },
    /// Give a title a thumbs up or down (rating it again with the same value clears it)
    Rate {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
        thumb: Thumb,
    },
    /// Show the rating of a title
    Rating {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
    },
    /// Manage viewer profiles
    Profile {
        #[command(subcommand)]
        cmd: ProfileCommands,
    },
    /// Show or change the active country and its display language
    Region {
        #[command(subcommand)]
        cmd: RegionCommands,
    },
    /// Step through a series' episodes across season boundaries
    #[command(long_about = "Resolve the previous or next episode of a series from a given position. Crossing a season boundary fetches the adjacent season from the metadata API; the position is left unchanged if that fails.")]
    Episode {
        #[command(subcommand)]
        cmd: EpisodeCommands,
    },
    /// Print the player embed URL for a movie or an episode
    Play {
        #[command(subcommand)]
        cmd: PlayCommands,
    },
    /// Show the badges ("Tendance", "Nouveau", ...) a title earns from its metadata
    Callouts {
        #[arg(long, default_value_t = 0.0)]
        vote_average: f64,
        #[arg(long, default_value_t = 0.0)]
        popularity: f64,
        #[arg(long, default_value_t = 0)]
        vote_count: u64,
        /// Release date as YYYY-MM-DD
        #[arg(long)]
        release_date: Option<NaiveDate>,
        /// Original language code, e.g. "en" or "ko"
        #[arg(long)]
        language: Option<String>,
    },
    /// Manage configuration and credentials
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum ListCommands {
    /// Add a title (no-op if already listed)
    Add {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        poster: Option<String>,
    },
    /// Remove a title
    Remove {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
    },
    /// Show the list in insertion order
    Show,
    /// Check whether a title is listed
    Contains {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
    },
}

#[derive(Subcommand)]
pub enum ContinueCommands {
    /// Record progress for a title and move it to the front
    Upsert {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
        /// Percentage watched, clamped to 100
        #[arg(long, default_value_t = 0)]
        progress: u8,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, requires = "episode")]
        season: Option<u32>,
        #[arg(long, requires = "season")]
        episode: Option<u32>,
    },
    /// Remove a title
    Remove {
        id: u64,
        #[arg(value_name = "TYPE")]
        media_type: MediaType,
    },
    /// Show entries, most recent first
    Show,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the active profile
    Show,
    /// List all profiles
    List,
    /// Create a profile
    Create {
        name: String,
        #[arg(long, action = ArgAction::SetTrue)]
        kids: bool,
        #[arg(long)]
        avatar: Option<String>,
    },
    /// Switch the active profile
    Use { id: String },
}

#[derive(Subcommand)]
pub enum RegionCommands {
    /// Show the active country and language
    Show,
    /// Change the active country (use "" for all countries)
    Set { country: String },
    /// List the countries known to the metadata API, popular ones first
    Countries,
    /// Print the display language for a country code
    Language { country: String },
}

#[derive(clap::Args)]
pub struct EpisodeArgs {
    #[arg(long)]
    pub series: u64,
    #[arg(long)]
    pub season: u32,
    #[arg(long)]
    pub episode: u32,
}

#[derive(Subcommand)]
pub enum EpisodeCommands {
    /// Resolve the next episode
    Next(EpisodeArgs),
    /// Resolve the previous episode
    Prev(EpisodeArgs),
    /// Show whether previous/next are available
    Status(EpisodeArgs),
}

#[derive(Subcommand)]
pub enum PlayCommands {
    Movie {
        id: u64,
        /// Index into the configured servers, wrapping around
        #[arg(long, default_value_t = 0)]
        server: usize,
    },
    Tv {
        id: u64,
        #[arg(long, requires = "episode")]
        season: Option<u32>,
        #[arg(long, requires = "season")]
        episode: Option<u32>,
        #[arg(long, default_value_t = 0)]
        server: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (masks the API token)
    Show {
        /// Show the API token unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the metadata API bearer token
    Token {
        /// Token value (if not provided, will prompt)
        #[arg(long)]
        value: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = cineverse_config::PathManager::default();
    let log_file = cli.log_to_file.then(|| paths.log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    // Config commands must work even when the config file is broken
    if let Commands::Config { cmd } = cli.command {
        return config::run_config(cmd, &paths, &output).await;
    }

    let mut ctx = AppContext::load(paths)?;
    match cli.command {
        Commands::List { cmd } => list::run_list(cmd, &mut ctx, &output),
        Commands::Continue { cmd } => continue_watching::run_continue(cmd, &mut ctx, &output),
        Commands::Rate { id, media_type, thumb } => rating::run_rate(id, media_type, thumb, &mut ctx, &output),
        Commands::Rating { id, media_type } => rating::run_show_rating(id, media_type, &ctx, &output),
        Commands::Profile { cmd } => profile::run_profile(cmd, &mut ctx, &output),
        Commands::Region { cmd } => region::run_region(cmd, &mut ctx, &output).await,
        Commands::Episode { cmd } => episode::run_episode(cmd, &mut ctx, &output).await,
        Commands::Play { cmd } => play::run_play(cmd, &ctx, &output),
        Commands::Callouts {
            vote_average,
            popularity,
            vote_count,
            release_date,
            language,
        } => {
            let item = cineverse_core::CalloutInput {
                vote_average,
                popularity,
                vote_count,
                release_date,
                original_language: language,
            };
            callouts::run_callouts(&item, &output)
        }
        // Handled above
        Commands::Config { .. } => Ok(()),
    }
}
