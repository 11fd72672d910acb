//! Run orchestration.
//!
//! Drives one sweep: for each configured show, fetch episodes, classify,
//! report, and accumulate trashed file paths; then plan and prune once at the
//! end. Shows are processed strictly in configuration order. A fetch failure
//! is isolated to its show; the run always continues.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::classify;
use crate::config::Config;
use crate::media::MediaSource;
use crate::planner;
use crate::prune::{FilesystemPruner, PruneReport};
use crate::report::Reporter;

/// Counters for one complete run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Shows iterated (including ones whose fetch failed).
    pub shows_processed: usize,
    /// Shows whose episode fetch failed and were treated as empty.
    pub shows_failed: usize,
    /// Episodes classified across all shows.
    pub episodes_classified: usize,
    /// Files accumulated for deletion.
    pub trash_files: usize,
    /// Pruning counters; `None` when the trash set was empty and no
    /// filesystem work happened at all.
    pub prune: Option<PruneReport>,
}

/// One-shot sweep orchestrator.
pub struct Runner {
    config: Config,
    source: Arc<dyn MediaSource>,
    pruner: FilesystemPruner,
}

impl Runner {
    pub fn new(config: Config, source: Arc<dyn MediaSource>) -> Self {
        let pruner = FilesystemPruner::new(config.prune.clone());
        Self {
            config,
            source,
            pruner,
        }
    }

    /// Runs the sweep, writing the decision report to `out`.
    ///
    /// Never fails: per-show and per-file problems are logged and counted in
    /// the summary. Only the caller decides what a partial run means.
    pub async fn run<W: Write>(&self, out: &mut W) -> RunSummary {
        let mut summary = RunSummary::default();
        let mut reporter = Reporter::new(out);
        let mut trash: Vec<PathBuf> = Vec::new();

        info!(
            "{} show(s) configured, fetching from {}",
            self.config.shows.len(),
            self.source.name()
        );

        for policy in &self.config.shows {
            info!(
                "Processing show '{}' (rating key {})",
                policy.name, policy.rating_key
            );

            let episodes = match self.source.episodes(&policy.rating_key).await {
                Ok(episodes) => episodes,
                Err(e) => {
                    warn!(
                        "Failed to fetch episodes for '{}': {}; treating as empty",
                        policy.name, e
                    );
                    summary.shows_failed += 1;
                    Vec::new()
                }
            };
            info!("{} episode(s) found for '{}'", episodes.len(), policy.name);

            let records = classify(episodes, policy);
            summary.episodes_classified += records.len();
            summary.shows_processed += 1;

            if let Err(e) = reporter
                .show_header(policy)
                .and_then(|()| reporter.episodes(&records))
            {
                warn!("Failed to write report: {}", e);
            }

            for record in records {
                if record.trash {
                    trash.extend(record.episode.file_paths);
                }
            }
        }

        summary.trash_files = trash.len();
        if let Err(e) = reporter.footer(trash.len()) {
            warn!("Failed to write report: {}", e);
        }

        if trash.is_empty() {
            info!("Nothing to delete");
            return summary;
        }

        let plan = planner::plan(trash);
        info!(
            "Pruning {} file(s) across {} show directorie(s)",
            planner::file_count(&plan),
            plan.len()
        );
        summary.prune = Some(self.pruner.prune(&plan).await);

        summary
    }
}
