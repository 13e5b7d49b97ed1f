use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;

mod cmd;
mod config;
mod services;
mod utils;

use cmd::{Dispatcher, Invocation, StyleOptions};
use config::Config;
use services::Services;
use utils::{Console, LogFile, StdConsole};

/// LIRI - look up tweets, songs and movies from the terminal.
///
/// Usage:
///   liri <command> [argument words...]
///
/// Commands (case-insensitive):
///   my-tweets                     latest posts of the configured account
///   spotify-this-song <track>     track info (default: The Sign by Ace of Base)
///   movie-this <title>            movie info (default: Mr. Nobody)
///   do-what-it-says               run every `command,argument` line of the batch file
///   display-log                   print the log file
///
/// Argument words are joined with '+'. Every run is recorded in the log file.
///
/// Credentials / env:
///   TWITTER_CONSUMER_KEY, TWITTER_CONSUMER_SECRET or TWITTER_BEARER_TOKEN
///   SPOTIFY_ID, SPOTIFY_SECRET
///   OMDB_API_KEY (default "trilogy")
///   LIRI_CONFIG, LIRI_LOG_FILE, LIRI_BATCH_FILE
///
/// Examples:
///   liri movie-this Blade Runner
///   liri spotify-this-song Africa
///   liri do-what-it-says --batch-file commands.txt
#[derive(Parser, Debug)]
#[command(
    name = "liri",
    version,
    author,
    about = "LIRI - look up tweets, songs and movies from the terminal",
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Increase diagnostic verbosity on stderr (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors on stderr
    #[arg(short, long)]
    quiet: bool,

    /// YAML configuration file (or LIRI_CONFIG; ./liri.yaml if present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log file to append to
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Batch file read by do-what-it-says
    #[arg(long, value_name = "PATH")]
    batch_file: Option<PathBuf>,

    /// Command followed by its argument words. Everything from the command
    /// on is taken verbatim, including words that look like flags.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    words: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = utils::derive_level(cli.verbose, cli.quiet);
    utils::init_logging(level);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(p) = cli.log_file {
        config.log_file = p;
    }
    if let Some(p) = cli.batch_file {
        config.batch_file = p;
    }
    tracing::debug!(
        log_file = ?config.log_file,
        batch_file = ?config.batch_file,
        "configuration loaded"
    );

    let console: Arc<dyn Console> = Arc::new(StdConsole);
    let services = Services::from_config(&config).context("Failed to build HTTP client")?;
    let log = LogFile::new(&config.log_file, console.clone());
    let dispatcher = Arc::new(Dispatcher::new(
        services,
        console,
        log,
        config.batch_file.clone(),
        StyleOptions::detect(),
    ));

    let invocation = Invocation::from_args(&cli.words);
    dispatcher.log_invocation(&invocation).await;
    dispatcher.dispatch(invocation).await;

    // Command outcomes never change the exit status.
    Ok(())
}
