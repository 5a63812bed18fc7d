//! In-memory feed store
//!
//! Holds the aggregate behind a `RwLock`: writers are applied one at a time
//! in lock acquisition order and readers clone a complete snapshot.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use super::store::{CachedFeed, FeedStore, LocalFeedImage, StoreError};

/// Feed store that keeps the aggregate in process memory
#[derive(Debug, Default)]
pub struct InMemoryFeedStore {
    cache: RwLock<Option<CachedFeed>>,
}

impl InMemoryFeedStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedStore for InMemoryFeedStore {
    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        *self.cache.write().await = None;
        debug!("Deleted in-memory feed");
        Ok(())
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let count = feed.len();
        *self.cache.write().await = Some(CachedFeed { feed, timestamp });
        debug!(count, %timestamp, "Inserted in-memory feed");
        Ok(())
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        Ok(self.cache.read().await.clone())
    }
}
