//! `stockkeep-core` — domain building blocks for the stock ledger.
//!
//! This crate contains **pure domain** primitives (no IO, no logging).

pub mod error;
pub mod item;
pub mod value_object;

pub use error::{ErrorKind, InventoryError, InventoryResult};
pub use item::{ItemName, Quantity};
pub use value_object::ValueObject;
