//! Inventory ledger: an owned, validated item → quantity mapping.
//!
//! The store performs no IO itself. Loading and saving go through a
//! [`DocumentStore`] supplied by the caller, and informational records go
//! through a [`LogSink`].

pub mod codec;
pub mod persistence;
pub mod report;
pub mod sink;
pub mod store;

pub use persistence::{DocumentStore, MemoryDocument, StorageError};
pub use report::StockReport;
pub use sink::{LogRecord, LogSink, MemorySink, NullSink, TracingSink};
pub use store::{InventoryStore, StoreState};
