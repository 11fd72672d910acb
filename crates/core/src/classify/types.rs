//! Types for episode classification.

use serde::{Deserialize, Serialize};

use crate::media::Episode;

/// Retention decision for a single episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionState {
    /// Unwatched, kept (policy does not delete unwatched, or not old enough).
    Unwatched,
    /// Watched but still inside the grace window.
    Watched,
    /// Old enough to delete per policy.
    Stale,
    /// Pinned: latest episode or season 0.
    Keep,
}

impl RetentionState {
    /// Single-letter code used in the report output.
    pub fn letter(&self) -> char {
        match self {
            RetentionState::Unwatched => 'U',
            RetentionState::Watched => 'W',
            RetentionState::Stale => 'S',
            RetentionState::Keep => 'K',
        }
    }
}

/// An episode together with its classification outcome.
///
/// Derived once by [`classify`](super::classify) and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: Episode,
    pub state: RetentionState,
    /// True iff `state == Stale`; the episode's files join the deletion set.
    pub trash: bool,
}

impl EpisodeRecord {
    pub(crate) fn new(episode: Episode, state: RetentionState) -> Self {
        Self {
            episode,
            state,
            trash: state == RetentionState::Stale,
        }
    }
}
