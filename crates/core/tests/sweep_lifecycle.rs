//! Sweep lifecycle integration tests.
//!
//! These tests verify a complete run end to end: config -> fetch ->
//! classify -> report -> plan -> prune, against a real temporary filesystem
//! and a mock media source.

use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use showsweep_core::{
    load_config_from_str,
    testing::{fixtures, MockMediaSource},
    validate_config, Config, Episode, MediaSource, Runner,
};

/// Test helper wiring a library tree, a mock source, and a config together.
struct TestHarness {
    source: Arc<MockMediaSource>,
    library: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        Self {
            source: Arc::new(MockMediaSource::new()),
            library: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Parses a config and points its path prefix at the temp library.
    fn config(&self, toml: &str) -> Config {
        let mut config = load_config_from_str(toml).expect("Failed to parse config");
        validate_config(&config).expect("Config invalid");
        config.prune.path_prefix = self.library.path().display().to_string();
        config
    }

    /// Creates an episode whose backing file exists in the library tree.
    fn episode(&self, show: &str, season: u32, number: u32, watch_count: u32) -> Episode {
        let mut episode = fixtures::episode(show, season, number, watch_count);
        let server_path = PathBuf::from(format!(
            "/tv/{show}/Season {season:02}/e{number:02}.mkv"
        ));
        let on_disk = self.on_disk(&server_path);
        std::fs::create_dir_all(on_disk.parent().unwrap()).unwrap();
        std::fs::write(&on_disk, b"video").unwrap();
        episode.file_paths = vec![server_path];
        episode
    }

    /// Maps a server path to its location under the temp library.
    fn on_disk(&self, server_path: &std::path::Path) -> PathBuf {
        self.library
            .path()
            .join(server_path.strip_prefix("/").unwrap())
    }

    async fn run(&self, config: Config) -> (showsweep_core::RunSummary, String) {
        let runner = Runner::new(config, Arc::clone(&self.source) as Arc<dyn MediaSource>);
        let mut out = Vec::new();
        let summary = runner.run(&mut out).await;
        (summary, String::from_utf8(out).unwrap())
    }
}

const NEWS_CONFIG: &str = r#"
[plex]
hostname = "http://plex.local:32400"
token = "test-token"

[[shows]]
name = "news"
rating_key = "100"
title = "Nightly News"
delete_unwatched = true
stale_unwatched = 2
stale_watched = 1
"#;

#[tokio::test]
async fn test_full_sweep_deletes_stale_and_cleans_directories() {
    let harness = TestHarness::new();

    // Five news episodes: the oldest two watched, the rest unwatched.
    harness
        .source
        .set_episodes(
            "100",
            vec![
                harness.episode("News", 1, 1, 1), // age 4, watched -> stale
                harness.episode("News", 1, 2, 1), // age 3, watched -> stale
                harness.episode("News", 1, 3, 0), // age 2, unwatched -> stale
                harness.episode("News", 1, 4, 0), // age 1 < 2 -> kept
                harness.episode("News", 1, 5, 0), // latest -> kept
            ],
        )
        .await;

    let (summary, report) = harness.run(harness.config(NEWS_CONFIG)).await;

    assert_eq!(summary.shows_processed, 1);
    assert_eq!(summary.episodes_classified, 5);
    assert_eq!(summary.trash_files, 3);

    let prune = summary.prune.expect("pruning should have run");
    assert_eq!(prune.files_removed, 3);
    assert!(prune.is_clean());

    let season = harness.library.path().join("tv/News/Season 01");
    assert!(!season.join("e01.mkv").exists());
    assert!(!season.join("e03.mkv").exists());
    assert!(season.join("e04.mkv").exists());
    assert!(season.join("e05.mkv").exists());
    // Two files remain, so the season directory survives.
    assert!(season.exists());

    assert!(report.contains("== Nightly News =="));
    assert!(report.contains("Found 3 file(s) to delete."));
}

#[tokio::test]
async fn test_sweep_empties_and_removes_season_directory() {
    let harness = TestHarness::new();

    // Season 1 fully watched and stale; the latest episode lives in season 2.
    harness
        .source
        .set_episodes(
            "100",
            vec![
                harness.episode("News", 1, 1, 1),
                harness.episode("News", 1, 2, 1),
                harness.episode("News", 2, 1, 0),
            ],
        )
        .await;

    let (summary, _) = harness.run(harness.config(NEWS_CONFIG)).await;

    let prune = summary.prune.unwrap();
    assert_eq!(prune.files_removed, 2);
    assert_eq!(prune.dirs_removed, 1);
    assert!(!harness.library.path().join("tv/News/Season 01").exists());
    assert!(harness
        .library
        .path()
        .join("tv/News/Season 02/e01.mkv")
        .exists());
}

#[tokio::test]
async fn test_rerun_after_sweep_is_clean() {
    let harness = TestHarness::new();
    harness
        .source
        .set_episodes(
            "100",
            vec![
                harness.episode("News", 1, 1, 1),
                harness.episode("News", 1, 2, 1),
                harness.episode("News", 2, 1, 0),
            ],
        )
        .await;

    let (first, _) = harness.run(harness.config(NEWS_CONFIG)).await;
    let first_prune = first.prune.unwrap();
    assert_eq!(first_prune.files_removed, 2);
    assert_eq!(first_prune.dirs_removed, 1);

    // Plex still reports the deleted files; the second sweep must shrug at
    // the missing season and delete nothing new.
    let (second, _) = harness.run(harness.config(NEWS_CONFIG)).await;
    let prune = second.prune.unwrap();
    assert!(prune.is_clean());
    assert_eq!(prune.files_removed, 0);
    assert_eq!(prune.dirs_removed, 0);
    assert_eq!(prune.seasons_skipped, 1);
}

#[tokio::test]
async fn test_failed_show_does_not_block_others() {
    let harness = TestHarness::new();
    harness.source.fail_show("100", "server went away").await;
    harness
        .source
        .set_episodes(
            "200",
            vec![
                harness.episode("Drama", 1, 1, 1),
                harness.episode("Drama", 1, 2, 1),
            ],
        )
        .await;

    let toml = format!(
        "{NEWS_CONFIG}\n[[shows]]\nname = \"drama\"\nrating_key = \"200\"\ntitle = \"Drama\"\nstale_watched = 1\n"
    );
    let (summary, report) = harness.run(harness.config(&toml)).await;

    assert_eq!(summary.shows_processed, 2);
    assert_eq!(summary.shows_failed, 1);
    assert_eq!(summary.trash_files, 1);
    assert_eq!(summary.prune.unwrap().files_removed, 1);

    // Both shows still appear in the report, the failed one with no episodes.
    assert!(report.contains("== Nightly News =="));
    assert!(report.contains("== Drama =="));
}

#[tokio::test]
async fn test_all_kept_means_no_filesystem_work() {
    let harness = TestHarness::new();
    harness
        .source
        .set_episodes("100", vec![harness.episode("News", 1, 1, 1)])
        .await;

    // Single episode is the latest, so nothing can be stale.
    let (summary, report) = harness.run(harness.config(NEWS_CONFIG)).await;

    assert_eq!(summary.trash_files, 0);
    assert!(summary.prune.is_none());
    assert!(report.contains("Found 0 file(s) to delete."));
}
