//! Staleness policy for cached feeds

use chrono::{DateTime, Duration, Utc};

/// Number of days a cached feed stays trustworthy
pub const MAX_CACHE_AGE_DAYS: i64 = 7;

/// Decides whether a cached timestamp is still fresh
///
/// Only the timestamp and the supplied `now` are consulted, never the feed.
pub struct CachePolicy;

impl CachePolicy {
    /// The maximum age a cached feed may reach before it is discarded
    pub fn max_age() -> Duration {
        Duration::days(MAX_CACHE_AGE_DAYS)
    }

    /// Returns true while `now - timestamp` is strictly below the max age
    pub fn validate(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - timestamp < Self::max_age()
    }
}
