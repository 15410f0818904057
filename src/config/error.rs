//! Configuration errors.

use thiserror::Error;

/// Failure to load or deserialize configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying config crate error (missing vars, bad types).
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Semantic validation failure of loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required setting is missing or empty.
    #[error("missing required configuration: {0}")]
    MissingRequired(&'static str),

    /// A setting is present but out of range.
    #[error("invalid configuration for {field}: {reason}")]
    InvalidValue {
        /// The offending setting.
        field: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },
}
