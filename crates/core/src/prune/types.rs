//! Types for filesystem pruning.

use serde::{Deserialize, Serialize};

/// Outcome of a single filesystem removal attempt.
///
/// Inspected only for logging and counting; never branches control flow
/// beyond "continue to the next target".
#[derive(Debug)]
pub enum PruneOutcome {
    /// Target removed (or would be, in dry-run mode).
    Removed,
    /// Target was already absent. Not an error: a re-run after a partial
    /// failure sees earlier deletions as Missing and keeps going.
    Missing,
    /// OS-level failure (permissions, locks). Abandoned for this target only.
    Failed(std::io::Error),
}

/// Aggregate counts for one pruning pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PruneReport {
    /// Whether this was a dry run (counts are would-haves).
    pub dry_run: bool,
    /// Files removed.
    pub files_removed: usize,
    /// Files already absent at prune time.
    pub files_missing: usize,
    /// Files that failed to delete.
    pub files_failed: usize,
    /// Emptied directories removed (season dirs plus empty show children).
    pub dirs_removed: usize,
    /// Directory removals that failed.
    pub dirs_failed: usize,
    /// Show directories absent on disk, skipped wholesale.
    pub shows_skipped: usize,
    /// Season directories absent on disk, skipped individually.
    pub seasons_skipped: usize,
}

impl PruneReport {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// True when nothing went wrong during the pass.
    pub fn is_clean(&self) -> bool {
        self.files_failed == 0 && self.dirs_failed == 0
    }
}
