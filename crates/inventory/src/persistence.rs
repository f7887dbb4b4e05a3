//! Persistence collaborator: the byte store behind `load`/`save`.

use thiserror::Error;

/// Failure reported by a [`DocumentStore`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("{location} does not exist")]
    Missing { location: String },

    #[error("cannot read {location}: {reason}")]
    Unreadable { location: String, reason: String },

    #[error("cannot write {location}: {reason}")]
    Write { location: String, reason: String },
}

impl StorageError {
    pub fn missing(location: impl Into<String>) -> Self {
        Self::Missing {
            location: location.into(),
        }
    }

    pub fn unreadable(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::Unreadable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(location: impl Into<String>, reason: impl ToString) -> Self {
        Self::Write {
            location: location.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single stock document, addressed by whatever the implementation wraps
/// (a path, a buffer).
///
/// `write_document` must either replace the whole document or leave the
/// previous one untouched.
pub trait DocumentStore {
    /// Human-readable location, used in log and error messages.
    fn location(&self) -> String;

    fn read_document(&self) -> Result<Vec<u8>, StorageError>;

    fn write_document(&mut self, document: &[u8]) -> Result<(), StorageError>;
}

impl<S> DocumentStore for &mut S
where
    S: DocumentStore + ?Sized,
{
    fn location(&self) -> String {
        (**self).location()
    }

    fn read_document(&self) -> Result<Vec<u8>, StorageError> {
        (**self).read_document()
    }

    fn write_document(&mut self, document: &[u8]) -> Result<(), StorageError> {
        (**self).write_document(document)
    }
}

/// In-memory document for tests/dev.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    contents: Option<Vec<u8>>,
    reject_writes: bool,
}

impl MemoryDocument {
    /// A document that does not exist yet.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<Vec<u8>>) -> Self {
        Self {
            contents: Some(contents.into()),
            reject_writes: false,
        }
    }

    /// Make every subsequent write fail (read-only medium).
    pub fn reject_writes(mut self) -> Self {
        self.reject_writes = true;
        self
    }

    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }
}

impl DocumentStore for MemoryDocument {
    fn location(&self) -> String {
        "<memory>".to_string()
    }

    fn read_document(&self) -> Result<Vec<u8>, StorageError> {
        self.contents
            .clone()
            .ok_or_else(|| StorageError::missing(self.location()))
    }

    fn write_document(&mut self, document: &[u8]) -> Result<(), StorageError> {
        if self.reject_writes {
            return Err(StorageError::write(self.location(), "medium is read-only"));
        }
        self.contents = Some(document.to_vec());
        Ok(())
    }
}
