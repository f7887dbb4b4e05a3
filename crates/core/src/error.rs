//! Inventory error model.

use thiserror::Error;

/// Result type used across the inventory layers.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory-level error.
///
/// Each variant is a distinct failure kind the caller can act on. None of them
/// leave the store in a partially mutated state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The caller supplied an invalid item name or quantity.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A removal targeted an item that is not in stock.
    #[error("item not stocked: {0}")]
    NotStocked(String),

    /// The load source does not exist or cannot be read.
    #[error("inventory source not found: {0}")]
    NotFound(String),

    /// The load source exists but its content is not a valid stock document.
    #[error("malformed inventory document: {0}")]
    Format(String),

    /// The inventory could not be written to its destination.
    #[error("failed to persist inventory: {0}")]
    Persistence(String),
}

/// Stable tag for an [`InventoryError`] variant.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    NotStocked,
    NotFound,
    Format,
    Persistence,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotStocked => "not_stocked",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Format => "format",
            ErrorKind::Persistence => "persistence",
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_stocked(item: impl Into<String>) -> Self {
        Self::NotStocked(item.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            InventoryError::Validation(_) => ErrorKind::Validation,
            InventoryError::NotStocked(_) => ErrorKind::NotStocked,
            InventoryError::NotFound(_) => ErrorKind::NotFound,
            InventoryError::Format(_) => ErrorKind::Format,
            InventoryError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}
