//! Engine configuration from the environment

use crate::state::{Style, UnsupportedStyle};
use crate::tracker::DEFAULT_TOP_K;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got `{value}`")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var}: {source}")]
    Style {
        var: &'static str,
        #[source]
        source: UnsupportedStyle,
    },

    #[error("{var} must be `pretty` or `json`, got `{value}`")]
    InvalidLogFormat { var: &'static str, value: String },

    #[error("failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog {path}: {source}")]
    CatalogFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Log output format of the binary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of ranked items kept per recommendation
    pub top_k: usize,
    /// Style new conversations start in
    pub default_style: Style,
    /// JSON article catalog for the bundled providers
    pub catalog: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            default_style: Style::Default,
            catalog: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("DIALOGUE_TOP_K") {
            config.top_k = match value.trim().parse::<usize>() {
                Ok(top_k) if top_k > 0 => top_k,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        var: "DIALOGUE_TOP_K",
                        value,
                    })
                }
            };
        }

        if let Some(value) = lookup("DIALOGUE_DEFAULT_STYLE") {
            config.default_style = value.parse().map_err(|source| ConfigError::Style {
                var: "DIALOGUE_DEFAULT_STYLE",
                source,
            })?;
        }

        config.catalog = lookup("DIALOGUE_CATALOG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        if let Some(value) = lookup("DIALOGUE_LOG_FORMAT") {
            config.log_format = match value.trim() {
                "pretty" | "" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidLogFormat {
                        var: "DIALOGUE_LOG_FORMAT",
                        value,
                    })
                }
            };
        }

        Ok(config)
    }
}
