//! Remote feed API client
//!
//! Fetches the feed from the remote endpoint and translates the wire-format
//! items into domain `FeedImage` values.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use super::FeedImage;

/// Errors that can occur when fetching the remote feed
#[derive(Debug, Error)]
pub enum RemoteFeedError {
    /// The request never produced a response
    #[error("Connectivity error: {0}")]
    Connectivity(#[from] reqwest::Error),

    /// The response was not a 200 or the payload did not decode
    #[error("Invalid data in remote feed response")]
    InvalidData,
}

/// Top-level shape of the remote payload
#[derive(Debug, Deserialize)]
struct Root {
    items: Vec<RemoteFeedItem>,
}

/// A feed item exactly as the remote API describes it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoteFeedItem {
    pub id: Uuid,
    pub description: Option<String>,
    pub location: Option<String>,
    /// The API calls the image URL `image`
    pub image: Url,
}

impl From<RemoteFeedItem> for FeedImage {
    fn from(item: RemoteFeedItem) -> Self {
        FeedImage {
            id: item.id,
            description: item.description,
            location: item.location,
            url: item.image,
        }
    }
}

/// Decodes a raw remote response into wire-format items
pub struct FeedItemsMapper;

impl FeedItemsMapper {
    /// Maps a response body and status into remote items
    ///
    /// # Returns
    /// * `Ok(Vec<RemoteFeedItem>)` when the status is 200 and the body decodes
    /// * `Err(RemoteFeedError::InvalidData)` otherwise
    pub fn map(data: &[u8], status: StatusCode) -> Result<Vec<RemoteFeedItem>, RemoteFeedError> {
        if status != StatusCode::OK {
            return Err(RemoteFeedError::InvalidData);
        }

        serde_json::from_slice::<Root>(data)
            .map(|root| root.items)
            .map_err(|_| RemoteFeedError::InvalidData)
    }
}

/// Client for fetching the feed from the remote API
#[derive(Debug, Clone)]
pub struct RemoteFeedLoader {
    client: Client,
    url: Url,
}

impl RemoteFeedLoader {
    /// Creates a new RemoteFeedLoader for the given endpoint
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// Creates a new RemoteFeedLoader with a custom HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url }
    }

    /// The endpoint this loader fetches from
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetches the feed and maps it into domain images, preserving order
    pub async fn load(&self) -> Result<Vec<FeedImage>, RemoteFeedError> {
        debug!(url = %self.url, "Fetching remote feed");

        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        let items = FeedItemsMapper::map(&body, status).inspect_err(|_| {
            warn!(url = %self.url, status = %status, "Remote feed response was invalid");
        })?;

        debug!(count = items.len(), "Fetched remote feed");
        Ok(items.into_iter().map(FeedImage::from).collect())
    }
}
