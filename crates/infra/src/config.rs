//! Configuration loading and representation.

use std::path::PathBuf;

use thiserror::Error;

use crate::storage::JsonFileStore;

pub const DATA_PATH_VAR: &str = "STOCKKEEP_DATA_PATH";
pub const LOW_STOCK_THRESHOLD_VAR: &str = "STOCKKEEP_LOW_STOCK_THRESHOLD";

pub const DEFAULT_DATA_PATH: &str = "inventory.json";
pub const DEFAULT_LOW_STOCK_THRESHOLD: u64 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}={value:?}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where the inventory lives and how reports are tuned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    pub data_path: PathBuf,
    /// Items strictly below this quantity are reported as low.
    pub low_stock_threshold: u64,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl InventoryConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Unset variables fall back to defaults; set-but-invalid ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        match lookup(DATA_PATH_VAR) {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: DATA_PATH_VAR,
                    value,
                    reason: "path cannot be empty".to_string(),
                });
            }
            Some(value) => config.data_path = PathBuf::from(value),
            None => tracing::debug!("{DATA_PATH_VAR} not set; using {DEFAULT_DATA_PATH}"),
        }

        if let Some(value) = lookup(LOW_STOCK_THRESHOLD_VAR) {
            config.low_stock_threshold =
                value
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::InvalidValue {
                        var: LOW_STOCK_THRESHOLD_VAR,
                        value: value.clone(),
                        reason: e.to_string(),
                    })?;
        }

        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_low_stock_threshold(mut self, threshold: u64) -> Self {
        self.low_stock_threshold = threshold;
        self
    }

    /// Persistence backend for the configured data path.
    pub fn file_store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_path)
    }
}
