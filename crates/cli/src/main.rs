use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use showsweep_core::{load_config, validate_config, PlexClient, Runner};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path: first argument, SHOWSWEEP_CONFIG, or default
    let config_path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SHOWSWEEP_CONFIG").ok())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("showsweep.toml"));

    // Load configuration. This is the only fatal failure: nothing can be
    // decided without per-show policy.
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    // Token redacted; safe for log collection.
    debug!(
        "Effective configuration: {}",
        serde_json::to_string(&config.sanitized()).unwrap_or_default()
    );
    info!("Plex server: {}", config.plex.hostname);
    info!("{} show(s) configured", config.shows.len());
    if !config.prune.path_prefix.is_empty() {
        info!("Path prefix: {}", config.prune.path_prefix);
    }
    if config.prune.dry_run {
        info!("Dry run enabled");
    }

    let source = Arc::new(
        PlexClient::new(config.plex.clone()).context("Failed to create Plex client")?,
    );

    let runner = Runner::new(config, source);
    let mut stdout = std::io::stdout();
    let summary = runner.run(&mut stdout).await;

    info!(
        "Done: {} show(s) processed ({} failed), {} episode(s) classified, {} file(s) trashed",
        summary.shows_processed,
        summary.shows_failed,
        summary.episodes_classified,
        summary.trash_files
    );
    if let Some(prune) = &summary.prune {
        info!(
            "Pruned{}: {} file(s) removed, {} missing, {} failed; {} dir(s) removed",
            if prune.dry_run { " (dry run)" } else { "" },
            prune.files_removed,
            prune.files_missing,
            prune.files_failed,
            prune.dirs_removed
        );
    }

    // Per-item failures were logged along the way; a completed run exits
    // clean regardless, so a re-run after fixing the cause recovers fully.
    Ok(())
}
