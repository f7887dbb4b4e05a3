use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use stockkeep_inventory::{DocumentStore, StorageError};

/// Inventory document stored as a single file on disk.
///
/// Writes never modify the target in place: the document goes to a temporary
/// sibling file which is flushed, synced, then renamed over the target. If
/// any step fails the temporary file is removed on drop and the previous
/// target content is untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the target (and the temporary file).
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_atomically(&self, document: &[u8]) -> io::Result<()> {
        let mut tmp = tempfile::Builder::new()
            .prefix(".stockkeep-")
            .suffix(".tmp")
            .tempfile_in(self.parent_dir())?;

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writer.write_all(document)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl DocumentStore for JsonFileStore {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read_document(&self) -> Result<Vec<u8>, StorageError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::missing(self.location()));
            }
            Err(e) => return Err(StorageError::unreadable(self.location(), e)),
        };

        let mut bytes = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut bytes)
            .map_err(|e| StorageError::unreadable(self.location(), e))?;

        tracing::trace!(path = %self.path.display(), bytes = bytes.len(), "read inventory file");
        Ok(bytes)
    }

    fn write_document(&mut self, document: &[u8]) -> Result<(), StorageError> {
        self.write_atomically(document).map_err(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "inventory write failed");
            StorageError::write(self.location(), e)
        })
    }
}
