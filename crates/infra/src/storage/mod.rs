//! Persistence backends for the inventory document.

pub mod file;

pub use file::JsonFileStore;
