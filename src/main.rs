//! feedcache - Load an image feed with a local seven-day cache
//!
//! Serves the feed from the local store while it is fresh and falls back to
//! the remote endpoint otherwise.

use std::io::{self, Write};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use feedcache::cache::{FileFeedStore, LocalFeedLoader};
use feedcache::cli::{AppConfig, Cli, Command};
use feedcache::composer::FeedService;
use feedcache::feed::{FeedImage, RemoteFeedLoader};

/// Installs the log subscriber, honoring `RUST_LOG` when set
fn init_logging(config: &AppConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Writes one line per image to stdout
fn print_feed(feed: &[FeedImage]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for image in feed {
        writeln!(
            stdout,
            "{}\t{}\t{}\t{}",
            image.id,
            image.url,
            image.location.as_deref().unwrap_or("-"),
            image.description.as_deref().unwrap_or("-"),
        )?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = AppConfig::from_cli(&cli)?;
    init_logging(&config);

    info!(store = %config.store_path.display(), url = %config.feed_url, "Starting feedcache");

    let store = FileFeedStore::new(config.store_path.clone());
    let local = LocalFeedLoader::with_system_clock(store);
    let remote = RemoteFeedLoader::new(config.feed_url.clone());
    let service = FeedService::new(remote, local);

    let result = match config.command {
        Command::Load => service.load().await.map(Some),
        Command::Refresh => service.refresh().await.map(Some),
        Command::Validate => service.validate_cache().await.map(|_| None),
        Command::Clear => service.clear().await.map(|_| None),
    };

    match result {
        Ok(Some(feed)) => print_feed(&feed)?,
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Command failed");
            return Err(e.into());
        }
    }

    Ok(())
}
