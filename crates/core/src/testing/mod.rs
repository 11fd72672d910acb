//! Testing utilities and mock implementations.
//!
//! Provides a mock media source so the orchestration logic can be tested
//! without a reachable Plex server.

mod mock_media_source;

pub use mock_media_source::MockMediaSource;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::config::ShowPolicy;
    use crate::media::Episode;
    use std::path::PathBuf;

    /// An episode with one backing file under the conventional layout.
    pub fn episode(show: &str, season: u32, number: u32, watch_count: u32) -> Episode {
        Episode {
            season_number: season,
            number,
            title: format!("{show} S{season:02}E{number:02}"),
            watch_count,
            air_date: None,
            file_paths: vec![PathBuf::from(format!(
                "/tv/{show}/Season {season:02}/{show} - S{season:02}E{number:02}.mkv"
            ))],
        }
    }

    /// A policy with the documented defaults (nothing is ever stale).
    pub fn show_policy(name: &str, rating_key: &str) -> ShowPolicy {
        ShowPolicy {
            name: name.to_string(),
            rating_key: rating_key.to_string(),
            title: name.to_string(),
            delete_unwatched: false,
            stale_watched: None,
            stale_unwatched: None,
        }
    }
}
