//! Core data model for the image feed
//!
//! `FeedImage` is the domain entity shared by the remote loader, the local
//! cache and the composer. The wire format lives in [`remote`].

pub mod remote;

pub use remote::{FeedItemsMapper, RemoteFeedError, RemoteFeedItem, RemoteFeedLoader};

use url::Url;
use uuid::Uuid;

/// A single image in the feed
///
/// Immutable value. Two images are equal when every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedImage {
    /// Unique identifier of the image
    pub id: Uuid,
    /// Optional caption
    pub description: Option<String>,
    /// Optional place the image was taken
    pub location: Option<String>,
    /// Where the image resource can be fetched from
    pub url: Url,
}

impl FeedImage {
    /// Creates a new FeedImage
    pub fn new(
        id: Uuid,
        description: Option<String>,
        location: Option<String>,
        url: Url,
    ) -> Self {
        Self {
            id,
            description,
            location,
            url,
        }
    }
}
