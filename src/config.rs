//! Synchronisation settings for the state store.
//!
//! Settings are read from TOML. Every key is optional; a missing key takes
//! its default, so an empty document yields [`SyncConfig::default`].
//!
//! ```toml
//! response_ordering = "latest_issued"
//! optimistic_moves = true
//! validate_column_moves = true
//! board_visibility = "member"
//! command_buffer = 64
//! ```

use crate::board::domain::BoardVisibility;
use crate::state::ResponseOrdering;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default capacity of the state store's command queue.
pub const DEFAULT_COMMAND_BUFFER: usize = 32;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The path does not name a file.
    #[error("config path {0} must include a file name")]
    NoFileName(Utf8PathBuf),

    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config value for {key}: {reason}")]
    Invalid {
        /// Offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// State store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// How completions that arrive out of issue order are applied.
    pub response_ordering: ResponseOrdering,
    /// Apply moves to the task list before the store confirms them.
    pub optimistic_moves: bool,
    /// Reject moves to columns outside the task's board before any write.
    pub validate_column_moves: bool,
    /// Which boards `fetch_current_user_boards` lists.
    pub board_visibility: BoardVisibility,
    /// Capacity of the state store's command queue.
    pub command_buffer: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            response_ordering: ResponseOrdering::default(),
            optimistic_moves: false,
            validate_column_moves: true,
            board_visibility: BoardVisibility::default(),
            command_buffer: DEFAULT_COMMAND_BUFFER,
        }
    }
}

impl SyncConfig {
    /// Parses settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseToml`] for malformed TOML or unknown keys
    /// and [`ConfigError::Invalid`] for a zero command buffer.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadFile`] when the file cannot be read, plus
    /// the errors of [`SyncConfig::from_toml_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let file_name = path
            .file_name()
            .ok_or_else(|| ConfigError::NoFileName(path.to_path_buf()))?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let read_error = |source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
        let contents = dir.read_to_string(file_name).map_err(read_error)?;
        Self::from_toml_str(&contents)
    }

    const fn validate(&self) -> Result<(), ConfigError> {
        if self.command_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "command_buffer",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}
