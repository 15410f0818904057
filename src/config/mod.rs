//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables use the `SPENDLOG` prefix with
//! `__` (double underscore) separating nested values.
//!
//! # Example
//!
//! ```no_run
//! use spendlog::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod storage;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Extraction oracle configuration.
    #[serde(default)]
    pub ai: AiConfig,

    /// Expense list persistence configuration.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development convenience), then reads
    /// environment variables:
    ///
    /// - `SPENDLOG__AI__OPENAI_API_KEY=sk-...` -> `ai.openai_api_key`
    /// - `SPENDLOG__STORAGE__PATH=/tmp/expenses.json` -> `storage.path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when values cannot be parsed into the expected
    /// types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SPENDLOG")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
