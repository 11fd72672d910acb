use serde::{Deserialize, Serialize};

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub plex: PlexConfig,
    #[serde(default)]
    pub prune: PruneConfig,
    /// Shows to process, in the order they appear in the file.
    #[serde(default)]
    pub shows: Vec<ShowPolicy>,
}

/// Plex server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlexConfig {
    /// Server base URL (e.g., "http://plex.local:32400")
    pub hostname: String,
    /// Plex authentication token
    pub token: String,
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_timeout() -> u32 {
    30
}

/// Pruning configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PruneConfig {
    /// Prefix prepended to every file path reported by Plex, mapping the
    /// server's view of the library onto the local mount point. Plain string
    /// concatenation, not a path join.
    #[serde(default)]
    pub path_prefix: String,
    /// When set, walk the full deletion procedure but never touch the disk.
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            path_prefix: String::new(),
            dry_run: false,
        }
    }
}

/// Retention policy for a single show.
///
/// Staleness thresholds count episodes newer than the one under
/// consideration; `None` means unbounded (never stale).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShowPolicy {
    /// Name used in config and logs.
    pub name: String,
    /// Plex rating key identifying the show.
    pub rating_key: String,
    /// Display title.
    pub title: String,
    /// Whether unwatched episodes are eligible for deletion at all.
    #[serde(default)]
    pub delete_unwatched: bool,
    /// Watched episodes at least this many episodes behind the latest are stale.
    #[serde(default)]
    pub stale_watched: Option<usize>,
    /// Unwatched episodes at least this many episodes behind the latest are
    /// stale (only consulted when `delete_unwatched` is set).
    #[serde(default)]
    pub stale_unwatched: Option<usize>,
}

/// Sanitized config for logging (token redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub plex: SanitizedPlexConfig,
    pub prune: PruneConfig,
    pub shows: Vec<ShowPolicy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPlexConfig {
    pub hostname: String,
    pub token: String,
    pub timeout_secs: u32,
}

impl Config {
    /// Returns a copy safe to log or serialize for diagnostics.
    pub fn sanitized(&self) -> SanitizedConfig {
        SanitizedConfig {
            plex: SanitizedPlexConfig {
                hostname: self.plex.hostname.clone(),
                token: "***".to_string(),
                timeout_secs: self.plex.timeout_secs,
            },
            prune: self.prune.clone(),
            shows: self.shows.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_policy_defaults() {
        let policy: ShowPolicy = toml::from_str(
            r#"
name = "news"
rating_key = "123"
title = "Nightly News"
"#,
        )
        .unwrap();

        assert!(!policy.delete_unwatched);
        assert_eq!(policy.stale_watched, None);
        assert_eq!(policy.stale_unwatched, None);
    }

    #[test]
    fn test_prune_config_defaults() {
        let config = PruneConfig::default();
        assert_eq!(config.path_prefix, "");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_sanitized_config_redacts_token() {
        let config = Config {
            plex: PlexConfig {
                hostname: "http://plex.local:32400".to_string(),
                token: "secret-token".to_string(),
                timeout_secs: 30,
            },
            prune: PruneConfig::default(),
            shows: vec![ShowPolicy {
                name: "news".to_string(),
                rating_key: "101".to_string(),
                title: "Nightly News".to_string(),
                delete_unwatched: true,
                stale_watched: Some(2),
                stale_unwatched: None,
            }],
        };

        let sanitized = config.sanitized();
        assert_eq!(sanitized.plex.token, "***");
        assert_eq!(sanitized.plex.hostname, "http://plex.local:32400");

        // Everything except the token survives into the startup log line.
        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-token"));
        assert!(json.contains("\"rating_key\":\"101\""));
        assert!(json.contains("\"stale_watched\":2"));
    }
}
