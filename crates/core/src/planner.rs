//! Deletion planning.
//!
//! Groups the run's doomed file paths into the show-directory → season
//! directory → files hierarchy that drives ordered, safe removal. Grouping is
//! purely path-structural (parent and parent-of-parent); no show or season
//! metadata is consulted, so it stays correct regardless of how the files
//! were selected upstream.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Files to delete, keyed by show directory then season directory.
///
/// Built fresh each run from the trash set and discarded after pruning.
/// BTreeMap keys keep the traversal deterministic.
pub type DeletionPlan = BTreeMap<PathBuf, BTreeMap<PathBuf, Vec<PathBuf>>>;

/// Groups trashed file paths by directory hierarchy.
///
/// Paths are sorted lexicographically first so the plan is reproducible
/// run-to-run against an unchanged trash set. A file's season directory is
/// its immediate parent; its show directory is the parent of that.
pub fn plan(mut paths: Vec<PathBuf>) -> DeletionPlan {
    paths.sort();

    let mut groups = DeletionPlan::new();
    for path in paths {
        let season_dir = parent_of(&path);
        let show_dir = parent_of(&season_dir);
        groups
            .entry(show_dir)
            .or_default()
            .entry(season_dir)
            .or_default()
            .push(path);
    }
    groups
}

fn parent_of(path: &Path) -> PathBuf {
    path.parent().unwrap_or_else(|| Path::new("")).to_path_buf()
}

/// Total number of files in a plan.
pub fn file_count(plan: &DeletionPlan) -> usize {
    plan.values()
        .flat_map(|seasons| seasons.values())
        .map(|files| files.len())
        .sum()
}
