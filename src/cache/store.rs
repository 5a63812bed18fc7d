//! Persistence contract for the cached feed
//!
//! A store holds at most one [`CachedFeed`] aggregate. Every implementation
//! must apply `insert` and `delete_cached_feed` one at a time in submission
//! order, and `retrieve` must never observe a half-written aggregate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Errors raised by a feed store when the underlying engine fails
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing storage failed
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted record exists but could not be decoded or encoded
    #[error("Stored feed is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),

    /// The store's writer task has shut down
    #[error("Store writer is no longer running")]
    WriterClosed,
}

/// Persisted representation of a feed image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFeedImage {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    pub url: Url,
}

/// The single aggregate a store holds: an ordered feed plus when it was cached
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedFeed {
    pub feed: Vec<LocalFeedImage>,
    pub timestamp: DateTime<Utc>,
}

/// Capability set every feed store provides
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// Removes the cached aggregate. Succeeds when nothing is cached.
    async fn delete_cached_feed(&self) -> Result<(), StoreError>;

    /// Replaces whatever is cached with `feed` stamped at `timestamp`
    async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError>;

    /// Returns the cached aggregate, or `None` when the store is empty
    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError>;
}

#[async_trait]
impl<S: FeedStore + ?Sized> FeedStore for Arc<S> {
    async fn delete_cached_feed(&self) -> Result<(), StoreError> {
        (**self).delete_cached_feed().await
    }

    async fn insert(
        &self,
        feed: Vec<LocalFeedImage>,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        (**self).insert(feed, timestamp).await
    }

    async fn retrieve(&self) -> Result<Option<CachedFeed>, StoreError> {
        (**self).retrieve().await
    }
}
