//! Conversions between domain images and their persisted form

use super::store::LocalFeedImage;
use crate::feed::FeedImage;

impl From<&FeedImage> for LocalFeedImage {
    fn from(image: &FeedImage) -> Self {
        LocalFeedImage {
            id: image.id,
            description: image.description.clone(),
            location: image.location.clone(),
            url: image.url.clone(),
        }
    }
}

impl From<LocalFeedImage> for FeedImage {
    fn from(local: LocalFeedImage) -> Self {
        FeedImage {
            id: local.id,
            description: local.description,
            location: local.location,
            url: local.url,
        }
    }
}

/// Maps a domain feed into its persisted form, keeping order
pub fn to_local(feed: &[FeedImage]) -> Vec<LocalFeedImage> {
    feed.iter().map(LocalFeedImage::from).collect()
}

/// Maps a persisted feed back into domain images, keeping order
pub fn to_models(local: Vec<LocalFeedImage>) -> Vec<FeedImage> {
    local.into_iter().map(FeedImage::from).collect()
}
