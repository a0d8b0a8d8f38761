use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{catalog, favorites, history, reset};
use media_library_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(about = "ReelShelf - favorites and watch history for your video catalog")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Config file (defaults to config.toml in the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the bundled video catalog
    Catalog {
        #[command(subcommand)]
        cmd: Option<CatalogCommands>,
    },
    /// Manage favorites
    #[command(long_about = "List and change favorites. Favorites keep a full copy of each video, so they stay listed even after the video leaves the catalog. Running without a subcommand lists them.")]
    Favorites {
        #[command(subcommand)]
        cmd: Option<FavoritesCommands>,
    },
    /// Manage watch history
    #[command(long_about = "Record and list watched videos. History keeps the 50 most recently watched videos, newest first; watching a video again moves it to the top. Running without a subcommand lists it.")]
    History {
        #[command(subcommand)]
        cmd: Option<HistoryCommands>,
    },
    /// Delete all favorites and watch history
    Reset {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CatalogCommands {
    /// List every catalog video
    List,
    /// Show one catalog video
    Show { id: String },
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List favorites
    List,
    /// Add the video if it is not a favorite, remove it if it is
    Toggle { id: String },
    /// Add a catalog video to favorites
    Add { id: String },
    /// Remove a video from favorites
    Remove { id: String },
    /// Tell whether a video is a favorite
    Check { id: String },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List watched videos, newest first
    List,
    /// Print the raw watched ids, newest first
    Ids,
    /// Record that a video was watched
    Watch { id: String },
    /// Empty the watch history
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = Config::load_or_default(&config_path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_path.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Configuration validation failed: {}", e))?;

    logging::init_logging(cli.verbose, cli.quiet, &config.logging).map_err(|e| eyre!("{}", e))?;
    tracing::debug!("Loaded config from {}", config_path.display());

    let output = output::Output::new(cli.output, cli.quiet);
    let (static_catalog, library) = commands::open_library(&config, &paths)?;

    match cli.command {
        Commands::Catalog { cmd } => {
            catalog::run_catalog(cmd.unwrap_or(CatalogCommands::List), &static_catalog, &output)
        }
        Commands::Favorites { cmd } => {
            favorites::run_favorites(cmd.unwrap_or(FavoritesCommands::List), &library, &output).await
        }
        Commands::History { cmd } => {
            history::run_history(cmd.unwrap_or(HistoryCommands::List), &library, &output).await
        }
        Commands::Reset { yes } => reset::run_reset(yes, &library, &output).await,
    }
}
