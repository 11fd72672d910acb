//! Filesystem pruning.
//!
//! Walks a [`DeletionPlan`](crate::planner::DeletionPlan) deleting files and
//! cleaning up the directories they leave empty. Missing paths are warnings,
//! not errors: the plan was derived from the media server's view of the
//! library, which may be stale, partially deleted, or mounted differently.
//! One failed target never aborts the run.

mod types;

pub use types::{PruneOutcome, PruneReport};

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::config::PruneConfig;
use crate::planner::DeletionPlan;

/// Deletes planned files and prunes resulting empty directories.
pub struct FilesystemPruner {
    config: PruneConfig,
}

impl FilesystemPruner {
    /// Creates a pruner with the given configuration.
    pub fn new(config: PruneConfig) -> Self {
        Self { config }
    }

    /// Maps a path reported by the media server onto the local mount.
    ///
    /// String concatenation, not a path join: the prefix is glued in front of
    /// the absolute path exactly as the server reported it.
    fn resolve(&self, path: &Path) -> PathBuf {
        if self.config.path_prefix.is_empty() {
            path.to_path_buf()
        } else {
            PathBuf::from(format!("{}{}", self.config.path_prefix, path.display()))
        }
    }

    /// Executes the plan. Never fails; everything that goes wrong is logged
    /// and counted in the returned report.
    pub async fn prune(&self, plan: &DeletionPlan) -> PruneReport {
        let mut report = PruneReport::new(self.config.dry_run);

        if self.config.dry_run {
            info!("Dry run: no files or directories will be removed");
        }

        for (show_dir, seasons) in plan {
            let resolved_show = self.resolve(show_dir);
            if !exists(&resolved_show).await {
                warn!("Show directory {} not found, skipping", resolved_show.display());
                report.shows_skipped += 1;
                continue;
            }

            info!("Pruning {}", resolved_show.display());
            // Season directories whose removal a dry run already projected;
            // they still exist on disk, so the sweep must not count them twice.
            let mut projected: HashSet<PathBuf> = HashSet::new();
            for (season_dir, files) in seasons {
                self.prune_season(season_dir, files, &mut report, &mut projected)
                    .await;
            }

            // Season-level cleanup leaves behind directories the plan never
            // mentioned (seasons with nothing scheduled that happen to be
            // empty already). Sweep the show's immediate children for them,
            // strictly after all season deletions for this show.
            self.sweep_empty_children(&resolved_show, &projected, &mut report)
                .await;
        }

        report
    }

    async fn prune_season(
        &self,
        season_dir: &Path,
        files: &[PathBuf],
        report: &mut PruneReport,
        projected: &mut HashSet<PathBuf>,
    ) {
        let resolved_season = self.resolve(season_dir);
        if !exists(&resolved_season).await {
            warn!(
                "Season directory {} not found, skipping",
                resolved_season.display()
            );
            report.seasons_skipped += 1;
            return;
        }

        let before = match entry_count(&resolved_season).await {
            Ok(n) => n,
            Err(e) => {
                warn!("Failed to list {}: {}", resolved_season.display(), e);
                report.seasons_skipped += 1;
                return;
            }
        };
        info!(
            "Deleting {} of {} entries in {}",
            files.len(),
            before,
            resolved_season.display()
        );

        let mut removed_here = 0usize;
        for file in files {
            let resolved = self.resolve(file);
            match self.remove_file(&resolved).await {
                PruneOutcome::Removed => {
                    report.files_removed += 1;
                    removed_here += 1;
                }
                PruneOutcome::Missing => {
                    warn!("File {} not found, skipping", resolved.display());
                    report.files_missing += 1;
                }
                PruneOutcome::Failed(e) => {
                    error!("Failed to delete {}: {}", resolved.display(), e);
                    report.files_failed += 1;
                }
            }
        }

        if self.config.dry_run {
            // Nothing was actually removed, so emptiness is projected from
            // the pre-deletion count.
            if before.saturating_sub(removed_here) == 0 {
                info!(
                    "Would delete empty directory {}",
                    resolved_season.display()
                );
                report.dirs_removed += 1;
                projected.insert(resolved_season);
            }
            return;
        }

        // Re-list only after the deletions above; a directory snapshot taken
        // earlier could call a non-empty directory empty.
        match entry_count(&resolved_season).await {
            Ok(0) => match self.remove_dir(&resolved_season).await {
                PruneOutcome::Removed => {
                    info!("Deleted empty directory {}", resolved_season.display());
                    report.dirs_removed += 1;
                }
                PruneOutcome::Missing => {}
                PruneOutcome::Failed(e) => {
                    warn!(
                        "Failed to delete empty directory {}: {}",
                        resolved_season.display(),
                        e
                    );
                    report.dirs_failed += 1;
                }
            },
            Ok(remaining) => {
                debug!(
                    "{} entries remain in {}, keeping it",
                    remaining,
                    resolved_season.display()
                );
            }
            Err(e) => warn!("Failed to re-list {}: {}", resolved_season.display(), e),
        }
    }

    /// Removes every empty directory among `show_dir`'s immediate children,
    /// skipping any a dry run already projected as removed.
    async fn sweep_empty_children(
        &self,
        show_dir: &Path,
        projected: &HashSet<PathBuf>,
        report: &mut PruneReport,
    ) {
        let mut entries = match fs::read_dir(show_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                // The show directory itself may be gone if the prefix view
                // was yanked mid-run; nothing left to sweep.
                warn!("Failed to list {}: {}", show_dir.display(), e);
                return;
            }
        };

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", show_dir.display(), e);
                    break;
                }
            };

            let is_dir = entry
                .file_type()
                .await
                .map(|t| t.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }

            let child = entry.path();
            if projected.contains(&child) {
                continue;
            }
            match entry_count(&child).await {
                Ok(0) => {
                    if self.config.dry_run {
                        info!("Would delete empty directory {}", child.display());
                        report.dirs_removed += 1;
                        continue;
                    }
                    match self.remove_dir(&child).await {
                        PruneOutcome::Removed => {
                            info!("Deleted empty directory {}", child.display());
                            report.dirs_removed += 1;
                        }
                        PruneOutcome::Missing => {}
                        PruneOutcome::Failed(e) => {
                            warn!("Failed to delete {}: {}", child.display(), e);
                            report.dirs_failed += 1;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Failed to list {}: {}", child.display(), e),
            }
        }
    }

    async fn remove_file(&self, path: &Path) -> PruneOutcome {
        if !exists(path).await {
            return PruneOutcome::Missing;
        }
        if self.config.dry_run {
            info!("Would delete {}", path.display());
            return PruneOutcome::Removed;
        }
        debug!("Deleting {}", path.display());
        match fs::remove_file(path).await {
            Ok(()) => PruneOutcome::Removed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PruneOutcome::Missing,
            Err(e) => PruneOutcome::Failed(e),
        }
    }

    async fn remove_dir(&self, path: &Path) -> PruneOutcome {
        match fs::remove_dir(path).await {
            Ok(()) => PruneOutcome::Removed,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => PruneOutcome::Missing,
            Err(e) => PruneOutcome::Failed(e),
        }
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

/// Counts the entries of a directory.
async fn entry_count(dir: &Path) -> std::io::Result<usize> {
    let mut entries = fs::read_dir(dir).await?;
    let mut count = 0;
    while entries.next_entry().await?.is_some() {
        count += 1;
    }
    Ok(count)
}
