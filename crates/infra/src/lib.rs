//! Infrastructure layer: filesystem persistence and configuration.

pub mod config;
pub mod storage;

pub use config::{ConfigError, InventoryConfig};
pub use storage::JsonFileStore;
