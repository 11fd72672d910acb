//! Plex media server client.
//!
//! Consumes exactly two Plex queries: the children of a show (its seasons)
//! and the children of a season (its episodes). Everything else about the
//! Plex API is out of scope.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::future::try_join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::PlexConfig;

use super::types::{sort_episodes, Episode, MediaSourceError};
use super::MediaSource;

/// Plex implementation of [`MediaSource`].
pub struct PlexClient {
    client: Client,
    config: PlexConfig,
}

/// Generic `MediaContainer` envelope around a metadata listing.
#[derive(Debug, Deserialize)]
struct ContainerResponse<T> {
    #[serde(rename = "MediaContainer")]
    media_container: Container<T>,
}

#[derive(Debug, Deserialize)]
struct Container<T> {
    /// Absent when the container is empty.
    #[serde(rename = "Metadata", default = "Vec::new")]
    metadata: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct SeasonDto {
    #[serde(rename = "ratingKey")]
    rating_key: String,
    index: Option<u32>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EpisodeDto {
    index: Option<u32>,
    #[serde(rename = "parentIndex")]
    parent_index: Option<u32>,
    title: Option<String>,
    #[serde(rename = "viewCount")]
    view_count: Option<u32>,
    #[serde(rename = "originallyAvailableAt")]
    originally_available_at: Option<NaiveDate>,
    #[serde(rename = "Media", default = "Vec::new")]
    media: Vec<MediaDto>,
}

#[derive(Debug, Deserialize)]
struct MediaDto {
    #[serde(rename = "Part", default = "Vec::new")]
    part: Vec<PartDto>,
}

#[derive(Debug, Deserialize)]
struct PartDto {
    file: Option<String>,
}

impl EpisodeDto {
    fn into_episode(self) -> Episode {
        let file_paths = self
            .media
            .into_iter()
            .flat_map(|m| m.part)
            .filter_map(|p| p.file)
            .map(PathBuf::from)
            .collect();

        Episode {
            season_number: self.parent_index.unwrap_or(0),
            number: self.index.unwrap_or(0),
            title: self.title.unwrap_or_default(),
            watch_count: self.view_count.unwrap_or(0),
            air_date: self.originally_available_at,
            file_paths,
        }
    }
}

impl PlexClient {
    /// Create a new Plex client.
    pub fn new(config: PlexConfig) -> Result<Self, MediaSourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .map_err(|e| MediaSourceError::Unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.hostname.trim_end_matches('/')
    }

    /// Fetches the children listing of a metadata item.
    async fn children<T: for<'de> Deserialize<'de>>(
        &self,
        rating_key: &str,
    ) -> Result<Vec<T>, MediaSourceError> {
        let url = format!("{}/library/metadata/{}/children", self.base_url(), rating_key);
        debug!("Plex query: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Plex-Token", &self.config.token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MediaSourceError::Timeout
                } else if e.is_connect() {
                    MediaSourceError::Unavailable(e.to_string())
                } else {
                    MediaSourceError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(MediaSourceError::Unauthorized);
        }
        if !status.is_success() {
            return Err(MediaSourceError::Api(format!("HTTP {}", status)));
        }

        let parsed: ContainerResponse<T> = response
            .json()
            .await
            .map_err(|e| MediaSourceError::Decode(e.to_string()))?;

        Ok(parsed.media_container.metadata)
    }
}

#[async_trait]
impl MediaSource for PlexClient {
    fn name(&self) -> &str {
        "plex"
    }

    async fn episodes(&self, rating_key: &str) -> Result<Vec<Episode>, MediaSourceError> {
        let mut seasons: Vec<SeasonDto> = self.children(rating_key).await?;
        seasons.sort_by_key(|s| s.index.unwrap_or(0));
        debug!(
            "Show {}: {} season(s): {:?}",
            rating_key,
            seasons.len(),
            seasons
                .iter()
                .map(|s| s.title.as_deref().unwrap_or("?"))
                .collect::<Vec<_>>()
        );

        // One fetch per season; classification re-sorts, so completion order
        // does not matter.
        let listings = try_join_all(
            seasons
                .iter()
                .map(|season| self.children::<EpisodeDto>(&season.rating_key)),
        )
        .await?;

        let mut episodes: Vec<Episode> = listings
            .into_iter()
            .flatten()
            .map(EpisodeDto::into_episode)
            .collect();
        sort_episodes(&mut episodes);

        Ok(episodes)
    }
}
