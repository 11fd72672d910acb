use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate a loaded configuration
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.plex.hostname.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "plex.hostname must not be empty".to_string(),
        ));
    }

    if config.plex.token.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "plex.token must not be empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for show in &config.shows {
        if show.rating_key.trim().is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "show '{}' has an empty rating_key",
                show.name
            )));
        }
        if !seen.insert(show.rating_key.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate rating_key '{}' (show '{}')",
                show.rating_key, show.name
            )));
        }
    }

    Ok(())
}
