//! Error types for configuration loading
//!
//! Widget operations themselves never fail; only reading configuration does.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading or validating a [`WidgetConfig`](tickdown_types::WidgetConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML")]
    ParseToml {
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}
