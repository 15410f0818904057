//! Persistence configuration.

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Configuration for the JSON file store.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path of the expense list file.
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl StorageConfig {
    /// Validate the storage configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "storage.path",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("expenses.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_matches_the_original_assistant() {
        assert_eq!(StorageConfig::default().path, PathBuf::from("expenses.json"));
    }

    #[test]
    fn validation_rejects_empty_path() {
        let config = StorageConfig {
            path: PathBuf::new(),
        };
        assert!(config.validate().is_err());
    }
}
