//! Trait definitions for the media module.

use async_trait::async_trait;

use super::types::{Episode, MediaSourceError};

/// A source of episode metadata for tracked shows.
#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Returns the name of this media source implementation.
    fn name(&self) -> &str;

    /// Returns every episode of the show identified by `rating_key`,
    /// sorted by (season, number) ascending.
    ///
    /// A show the server knows but has no episodes for yields an empty list,
    /// not an error.
    async fn episodes(&self, rating_key: &str) -> Result<Vec<Episode>, MediaSourceError>;
}
