//! Command-line interface parsing for feedcache
//!
//! Handles the subcommands and turns parsed arguments into an `AppConfig`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use url::Url;

use crate::cache::FileFeedStore;

/// Default remote feed endpoint
pub const DEFAULT_FEED_URL: &str = "https://ile-api.essentialdeveloper.com/essential-feed/v1/feed";

/// Error types for CLI argument handling
#[derive(Debug, Error)]
pub enum CliError {
    /// The feed URL could not be parsed
    #[error("Invalid feed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// No store path was given and no cache directory could be determined
    #[error("Could not determine a cache directory; pass --store <PATH>")]
    NoStorePath,
}

/// feedcache - Image feed with a local cache and remote fallback
#[derive(Parser, Debug)]
#[command(name = "feedcache")]
#[command(about = "Load an image feed, caching it locally for seven days")]
#[command(version)]
pub struct Cli {
    /// Path of the cache store file (defaults to the XDG cache directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub store: Option<PathBuf>,

    /// Remote feed endpoint
    #[arg(long, value_name = "URL", default_value = DEFAULT_FEED_URL, global = true)]
    pub url: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What the binary should do
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Print the feed, from cache when fresh, otherwise from remote
    Load,
    /// Fetch the remote feed and replace the cache
    Refresh,
    /// Delete the cache if it is stale or unreadable
    Validate,
    /// Delete the cache
    Clear,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub command: Command,
    pub store_path: PathBuf,
    pub feed_url: Url,
    pub verbose: bool,
}

impl AppConfig {
    /// Creates an AppConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` with the store path resolved and the URL parsed
    /// * `Err(CliError)` if the URL is invalid or no store path can be found
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let feed_url = Url::parse(&cli.url).map_err(|source| CliError::InvalidUrl {
            url: cli.url.clone(),
            source,
        })?;

        let store_path = match &cli.store {
            Some(path) => path.clone(),
            None => FileFeedStore::default_path().ok_or(CliError::NoStorePath)?,
        };

        Ok(AppConfig {
            command: cli.command.unwrap_or(Command::Load),
            store_path,
            feed_url,
            verbose: cli.verbose,
        })
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "feedcache=debug"
        } else {
            "feedcache=info"
        }
    }
}
