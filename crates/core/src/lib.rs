pub mod classify;
pub mod config;
pub mod media;
pub mod planner;
pub mod prune;
pub mod report;
pub mod runner;
pub mod testing;

pub use classify::{classify, EpisodeRecord, RetentionState};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, PlexConfig,
    PruneConfig, SanitizedConfig, ShowPolicy,
};
pub use media::{Episode, MediaSource, MediaSourceError, PlexClient};
pub use planner::{plan, DeletionPlan};
pub use prune::{FilesystemPruner, PruneOutcome, PruneReport};
pub use report::Reporter;
pub use runner::{RunSummary, Runner};
