//! Episode retention classification.
//!
//! A pure state machine: given a show's episodes and its retention policy,
//! assign each episode a [`RetentionState`] deciding whether its files are
//! safe to delete. No I/O happens here; the pruner acts on the result.

mod types;

pub use types::{EpisodeRecord, RetentionState};

use crate::config::ShowPolicy;
use crate::media::{sort_episodes, Episode};

/// Classifies a show's episodes against its retention policy.
///
/// Episodes are re-sorted by (season, number) before classification; the
/// caller's ordering is not trusted. The returned records keep that order.
///
/// Rules, applied per episode at position `idx` with `latest = len - 1`:
/// - the latest episode and everything in season 0 is always kept (deleting
///   the last episode breaks the on-deck pointer, and Plex drops a show whose
///   last episode disappears; specials are excluded as a safety default);
/// - a watched episode goes stale once `latest - idx >= stale_watched`;
/// - an unwatched episode goes stale only when the policy opts in via
///   `delete_unwatched` and `latest - idx >= stale_unwatched`;
/// - an unbounded threshold never fires.
pub fn classify(mut episodes: Vec<Episode>, policy: &ShowPolicy) -> Vec<EpisodeRecord> {
    sort_episodes(&mut episodes);

    if episodes.is_empty() {
        return vec![];
    }

    let latest = episodes.len() - 1;
    episodes
        .into_iter()
        .enumerate()
        .map(|(idx, episode)| {
            let state = classify_one(&episode, idx, latest, policy);
            EpisodeRecord::new(episode, state)
        })
        .collect()
}

fn classify_one(
    episode: &Episode,
    idx: usize,
    latest: usize,
    policy: &ShowPolicy,
) -> RetentionState {
    if idx == latest || episode.season_number == 0 {
        return RetentionState::Keep;
    }

    let age = latest - idx;

    if episode.is_watched() {
        match policy.stale_watched {
            Some(threshold) if age >= threshold => RetentionState::Stale,
            _ => RetentionState::Watched,
        }
    } else if policy.delete_unwatched {
        match policy.stale_unwatched {
            Some(threshold) if age >= threshold => RetentionState::Stale,
            _ => RetentionState::Unwatched,
        }
    } else {
        RetentionState::Unwatched
    }
}
