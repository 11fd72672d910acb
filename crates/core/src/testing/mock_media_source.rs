//! Mock media source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::media::{Episode, MediaSource, MediaSourceError};

/// Mock implementation of the [`MediaSource`] trait.
///
/// Provides controllable behavior for testing:
/// - configure episode lists per rating key
/// - inject a failure for a specific show
/// - record fetches for assertions
pub struct MockMediaSource {
    shows: Arc<RwLock<HashMap<String, Vec<Episode>>>>,
    /// Rating keys whose fetch should fail, with the error message.
    failures: Arc<RwLock<HashMap<String, String>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockMediaSource {
    pub fn new() -> Self {
        Self {
            shows: Arc::new(RwLock::new(HashMap::new())),
            failures: Arc::new(RwLock::new(HashMap::new())),
            fetched: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Sets the episodes returned for a rating key.
    pub async fn set_episodes(&self, rating_key: &str, episodes: Vec<Episode>) {
        self.shows
            .write()
            .await
            .insert(rating_key.to_string(), episodes);
    }

    /// Makes fetches for a rating key fail with `Unavailable`.
    pub async fn fail_show(&self, rating_key: &str, message: &str) {
        self.failures
            .write()
            .await
            .insert(rating_key.to_string(), message.to_string());
    }

    /// Rating keys fetched so far, in order.
    pub async fn fetched(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }
}

impl Default for MockMediaSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MediaSource for MockMediaSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn episodes(&self, rating_key: &str) -> Result<Vec<Episode>, MediaSourceError> {
        self.fetched.write().await.push(rating_key.to_string());

        if let Some(message) = self.failures.read().await.get(rating_key) {
            return Err(MediaSourceError::Unavailable(message.clone()));
        }

        Ok(self
            .shows
            .read()
            .await
            .get(rating_key)
            .cloned()
            .unwrap_or_default())
    }
}
