//! Feed composition: local cache first, remote fallback
//!
//! `FeedService` serves the cached feed while it is fresh and otherwise
//! fetches the remote feed, caching it for subsequent reads.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::cache::{FeedStore, LocalFeedError, LocalFeedLoader};
use crate::feed::{FeedImage, RemoteFeedError, RemoteFeedLoader};

/// Errors surfaced by the feed service
#[derive(Debug, Error)]
pub enum FeedServiceError {
    #[error("Local cache error: {0}")]
    Local(#[from] LocalFeedError),

    #[error("Remote feed error: {0}")]
    Remote(#[from] RemoteFeedError),
}

/// Anything that can produce a feed
#[async_trait]
pub trait FeedLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<FeedImage>, FeedServiceError>;
}

#[async_trait]
impl FeedLoader for RemoteFeedLoader {
    async fn load(&self) -> Result<Vec<FeedImage>, FeedServiceError> {
        Ok(RemoteFeedLoader::load(self).await?)
    }
}

#[async_trait]
impl<S: FeedStore> FeedLoader for LocalFeedLoader<S> {
    async fn load(&self) -> Result<Vec<FeedImage>, FeedServiceError> {
        Ok(LocalFeedLoader::load(self).await?)
    }
}

/// Combines a remote loader with the local cache
pub struct FeedService<R, S> {
    remote: R,
    local: LocalFeedLoader<S>,
}

impl<R: FeedLoader, S: FeedStore> FeedService<R, S> {
    /// Creates a new FeedService
    pub fn new(remote: R, local: LocalFeedLoader<S>) -> Self {
        Self { remote, local }
    }

    /// Loads the feed, preferring a fresh cache over the network
    ///
    /// # Behavior
    /// - Returns the cached feed if it is fresh and non-empty
    /// - Otherwise fetches from remote and caches the result
    /// - A failure to cache the remote feed is logged, not returned
    pub async fn load(&self) -> Result<Vec<FeedImage>, FeedServiceError> {
        match self.local.load().await {
            Ok(feed) if !feed.is_empty() => {
                debug!(count = feed.len(), "Serving feed from cache");
                return Ok(feed);
            }
            Ok(_) => debug!("Cache empty, falling back to remote"),
            Err(e) => warn!(error = %e, "Cache load failed, falling back to remote"),
        }

        let feed = self.remote.load().await?;
        if let Err(e) = self.local.save(&feed).await {
            warn!(error = %e, "Failed to cache remote feed");
        }
        Ok(feed)
    }

    /// Fetches the remote feed and replaces the cache with it
    pub async fn refresh(&self) -> Result<Vec<FeedImage>, FeedServiceError> {
        let feed = self.remote.load().await?;
        self.local.save(&feed).await?;
        info!(count = feed.len(), "Refreshed feed cache");
        Ok(feed)
    }

    /// Evicts the cached feed if it is stale or unreadable
    pub async fn validate_cache(&self) -> Result<(), FeedServiceError> {
        Ok(self.local.validate_cache().await?)
    }

    /// Removes any cached feed
    pub async fn clear(&self) -> Result<(), FeedServiceError> {
        self.local
            .store()
            .delete_cached_feed()
            .await
            .map_err(LocalFeedError::Deletion)?;
        info!("Cleared feed cache");
        Ok(())
    }
}
