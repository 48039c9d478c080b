mod config;
mod error;
mod logging;
mod matching;
mod ports;
mod present;
mod services;
#[cfg(test)]
mod test_utils;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::Context};

use crate::{
    config::Config,
    logging::setup_logging,
    services::beatport::{GenreLookupService, LookupOptions},
    services::chromium::ChromiumSession,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Get a song's genre from Beatport", long_about = None)]
struct Args {
    /// Song to look up, e.g. "Artist - Title"
    song: String,

    /// Pretty print output with indentation
    #[arg(short, long)]
    pretty: bool,

    /// Seconds to wait for search results to render
    #[arg(short, long)]
    timeout: Option<u64>,

    /// The config file to use
    #[arg(short, long, env = "BEATPORT_GENRE_CONFIG")]
    config: Option<PathBuf>,

    /// Console log level (default: off)
    #[arg(long, default_value = "off", env = "LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// File log level (default: debug)
    #[arg(long, default_value = "debug")]
    log_file_level: log::LevelFilter,

    /// Path to log file
    #[arg(long, env = "BEATPORT_GENRE_LOG_FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    setup_logging(args.log_level, args.log_file.clone(), args.log_file_level)?;

    let mut config = {
        if let Some(config) = &args.config {
            Config::from_file(config)
        } else {
            Config::load()
        }
    }
    .wrap_err("Failed to load beatport-genre config")?;
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    log::debug!("Using config: {:?}", config);

    let session = ChromiumSession::launch(&config.browser)
        .await
        .wrap_err("Failed to launch browser")?;
    let genre_match = GenreLookupService::new(session, LookupOptions::from(&config))
        .lookup(&args.song)
        .await
        .wrap_err_with(|| format!("Genre lookup failed for '{}'", args.song))?;

    println!(
        "{}",
        present::render(&args.song, genre_match.as_ref(), args.pretty)?
    );

    Ok(())
}
