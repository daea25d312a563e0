use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::Context;
use commands::{config, history, review, search, show, AppContext};
use reelnotes_config::{Config, PathManager};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelnotes")]
#[command(about = "ReelNotes - Look up movies on IMDb and keep your own reviews")]
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

    /// Use this config file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a movie by name (or IMDb id) and show it
    #[command(long_about = "Resolve a movie name to its IMDb title id and show the movie page with stored reviews. Input that is already a title id (tt followed by 6 to 11 digits) is used as is.")]
    Search {
        /// Movie name or IMDb title id
        #[arg(num_args = 0.., value_name = "QUERY")]
        query: Vec<String>,
    },
    /// Show details and reviews for an IMDb title id
    Show {
        /// IMDb title id, e.g. tt0111161
        id: String,
    },
    /// Save an anonymous review for an IMDb title id
    Review {
        /// IMDb title id, e.g. tt0111161
        id: String,

        /// Review text
        #[arg(num_args = 0.., value_name = "TEXT")]
        text: Vec<String>,
    },
    /// List or clear previously searched movies
    History {
        /// Forget every previous search
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },
    /// Inspect or create the configuration file
    #[command(long_about = "Manage the configuration file. Without a subcommand the effective configuration is shown.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },

    /// Print the config, data and log locations
    Path,
}

#[tokio::main]
async fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let config_file = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))
        .wrap_err_with(|| format!("Failed to load config from {}", config_file.display()))?;

    // Relative log files live in the log directory
    let mut logging_config = config.logging.clone();
    logging_config.file = logging_config.file.map(|file| {
        if file.is_absolute() {
            file
        } else {
            paths.log_dir().join(file)
        }
    });
    logging::init_logging(cli.verbose, cli.quiet, &logging_config).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    tracing::debug!(config_file = %config_file.display(), "Configuration loaded");

    let output = output::Output::new(cli.output, cli.quiet);
    let ctx = AppContext {
        config,
        config_file,
        paths,
    };

    let result = match cli.command {
        Commands::Search { query } => search::run_search(&query.join(" "), &ctx, &output).await,
        Commands::Show { id } => show::run_show(&id, &ctx, &output).await,
        Commands::Review { id, text } => review::run_review(&id, &text.join(" "), &ctx, &output).await,
        Commands::History { clear } => history::run_history(clear, &ctx, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show);
            config::run_config(cmd, &ctx, &output)
        }
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            output.error(e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}
