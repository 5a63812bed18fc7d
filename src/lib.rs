//! feedcache library
//!
//! Exposes the feed model, the local cache engine and the composer for use by
//! the binary and by integration tests.

pub mod cache;
pub mod cli;
pub mod composer;
pub mod feed;
