//! Local feed cache
//!
//! The cache keeps the most recently saved feed in a [`FeedStore`] and serves
//! it back while the [`CachePolicy`] still considers it fresh. An absent or
//! expired cache loads as an empty feed, never as an error.

pub mod file_store;
pub mod loader;
pub mod mapper;
pub mod memory_store;
pub mod policy;
pub mod store;

pub use file_store::FileFeedStore;
pub use loader::{LocalFeedError, LocalFeedLoader};
pub use memory_store::InMemoryFeedStore;
pub use policy::{CachePolicy, MAX_CACHE_AGE_DAYS};
pub use store::{CachedFeed, FeedStore, LocalFeedImage, StoreError};
