//! Find configuration
//!
//! Default search flags and the undo depth of the document, read from
//! `~/.config/sift/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::find::FindOptions;

/// User-level defaults for find/replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindConfig {
    /// Flags applied when the caller sets none explicitly
    #[serde(default)]
    pub options: FindOptions,
    /// Maximum number of undo steps kept per document
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

fn default_history_size() -> usize {
    1000
}

impl Default for FindConfig {
    fn default() -> Self {
        Self {
            options: FindOptions::default(),
            history_size: default_history_size(),
        }
    }
}

impl FindConfig {
    /// Load config from the default location, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        options = ?config.options,
                        history_size = config.history_size,
                        "Loaded config from {}",
                        path.display()
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
