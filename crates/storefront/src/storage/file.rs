//! File-backed storage backend.
//!
//! Each slot is stored as `<base_dir>/<slot>.json`. Writes are atomic via a
//! temp-rename pattern so a crash mid-write never leaves a torn slot behind.

use std::io;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, validate_slot};
use crate::error::{Result, StorageError};

/// A directory-backed [`KeyValueStore`].
///
/// The directory is created lazily on first write.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Create a backend rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the root directory of this backend.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file holding `slot`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidSlot` if the slot name is not usable as a
    /// file stem.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf> {
        validate_slot(slot)?;
        Ok(self.base_dir.join(format!("{slot}.json")))
    }
}

fn io_error(slot: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        slot: slot.to_string(),
        source,
    }
}

impl KeyValueStore for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>> {
        let path = self.slot_path(slot)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(slot, e)),
        }
    }

    fn write(&self, slot: &str, value: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        std::fs::create_dir_all(&self.base_dir).map_err(|e| io_error(slot, e))?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, value).map_err(|e| io_error(slot, e))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| io_error(slot, e))?;
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<()> {
        let path = self.slot_path(slot)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(slot, e)),
        }
    }
}
