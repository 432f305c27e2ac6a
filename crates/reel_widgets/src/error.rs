//! Widget error types

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read a configuration file
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration is not valid TOML for this widget
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be written back out
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Speed must be a finite number of pixels per frame
    #[error("Invalid speed {0}: must be finite")]
    InvalidSpeed(f32),
}

/// Strict direction parsing failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown scroll direction `{0}` (expected one of tb, bt, lr, rl)")]
pub struct ParseDirectionError(pub String);

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
