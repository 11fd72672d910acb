//! Types for media source operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while querying the media source.
#[derive(Debug, Error)]
pub enum MediaSourceError {
    #[error("Connection failed: {0}")]
    Unavailable(String),

    #[error("Authentication rejected by server")]
    Unauthorized,

    #[error("API error: {0}")]
    Api(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,
}

/// A single episode of a show as reported by the media source.
///
/// Read-only after fetch; classification derives everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Season the episode belongs to (0 = specials).
    pub season_number: u32,
    /// Episode number within the season.
    pub number: u32,
    /// Episode title.
    pub title: String,
    /// How many times the episode has been played (0 = unwatched).
    pub watch_count: u32,
    /// Original air date, when the server knows it.
    pub air_date: Option<NaiveDate>,
    /// Backing video files. Possibly empty, possibly more than one for
    /// multi-part episodes.
    pub file_paths: Vec<PathBuf>,
}

impl Episode {
    /// Whether the episode has been played at least once.
    pub fn is_watched(&self) -> bool {
        self.watch_count > 0
    }
}

/// Sorts episodes by (season, number) ascending, the order every downstream
/// consumer relies on. "Latest" is the last element of this order.
pub fn sort_episodes(episodes: &mut [Episode]) {
    episodes.sort_by(|a, b| {
        a.season_number
            .cmp(&b.season_number)
            .then(a.number.cmp(&b.number))
    });
}
