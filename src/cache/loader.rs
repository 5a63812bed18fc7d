//! Local feed loader
//!
//! Orchestrates a [`FeedStore`], the [`CachePolicy`] and the record mapper to
//! implement the load, save and validate-cache use cases.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::mapper::{to_local, to_models};
use super::policy::CachePolicy;
use super::store::{FeedStore, StoreError};
use crate::feed::FeedImage;

/// Source of the current instant
pub type CurrentDate = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Errors surfaced by the local feed loader
///
/// Each variant carries the store's error unchanged as its source.
#[derive(Debug, Error)]
pub enum LocalFeedError {
    #[error("Retrieval failed")]
    Retrieval(#[source] StoreError),

    #[error("Deleting the cached feed failed")]
    Deletion(#[source] StoreError),

    #[error("Inserting the feed failed")]
    Insertion(#[source] StoreError),
}

/// Loads and saves the feed through a local store
pub struct LocalFeedLoader<S> {
    store: S,
    current_date: CurrentDate,
}

impl<S: FeedStore> LocalFeedLoader<S> {
    /// Creates a loader over `store`, reading the time from `current_date`
    pub fn new(store: S, current_date: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            store,
            current_date: Box::new(current_date),
        }
    }

    /// Creates a loader that reads the time from the system clock
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, Utc::now)
    }

    /// The store this loader operates on
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replaces the cached feed with `feed`, stamped with the current time
    ///
    /// Deletes first and only inserts once the delete succeeded, so a failure
    /// in between leaves the store empty rather than stale.
    pub async fn save(&self, feed: &[FeedImage]) -> Result<(), LocalFeedError> {
        self.store
            .delete_cached_feed()
            .await
            .map_err(LocalFeedError::Deletion)?;

        let timestamp = (self.current_date)();
        self.store
            .insert(to_local(feed), timestamp)
            .await
            .map_err(LocalFeedError::Insertion)?;

        info!(count = feed.len(), %timestamp, "Saved feed to cache");
        Ok(())
    }

    /// Loads the cached feed
    ///
    /// An empty or expired cache is a success with an empty feed. An expired
    /// aggregate is also deleted; a failure there is logged, not returned.
    ///
    /// The delete is not ordered against a concurrent `save`: one that
    /// completes between the retrieve and the delete is wiped, leaving the
    /// store empty.
    pub async fn load(&self) -> Result<Vec<FeedImage>, LocalFeedError> {
        let cached = self
            .store
            .retrieve()
            .await
            .map_err(LocalFeedError::Retrieval)?;

        match cached {
            Some(cache) if CachePolicy::validate(cache.timestamp, (self.current_date)()) => {
                debug!(count = cache.feed.len(), "Loaded feed from cache");
                Ok(to_models(cache.feed))
            }
            Some(cache) => {
                debug!(timestamp = %cache.timestamp, "Cached feed expired");
                if let Err(e) = self.store.delete_cached_feed().await {
                    warn!(error = %e, "Failed to delete expired cache");
                }
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }

    /// Deletes the cached feed if it cannot be retrieved or has expired
    pub async fn validate_cache(&self) -> Result<(), LocalFeedError> {
        let stale = match self.store.retrieve().await {
            Err(e) => {
                warn!(error = %e, "Cache retrieval failed during validation");
                true
            }
            Ok(Some(cache)) => !CachePolicy::validate(cache.timestamp, (self.current_date)()),
            Ok(None) => false,
        };

        if !stale {
            return Ok(());
        }

        self.store.delete_cached_feed().await.map_err(|e| {
            warn!(error = %e, "Failed to delete invalid cache");
            LocalFeedError::Deletion(e)
        })?;

        info!("Deleted invalid cache");
        Ok(())
    }
}
