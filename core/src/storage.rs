//! Storage slots: one serialized blob, read and written whole.
//!
//! # Design
//! The app keeps its entire collection under a single storage slot, exactly
//! as the browser version kept it under one localStorage key. The slot is a
//! trait over read/write of one serialized string, which gives the store an
//! injectable backend and tests a pure in-memory fake. `FileStorage` is the
//! production slot: one JSON file, replaced atomically on every write so a
//! crash mid-write never leaves a torn blob behind.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Default file name for the persisted collection — the original storage
/// key (`movie_watchlist`) plus an extension.
pub const DEFAULT_FILE_NAME: &str = "movie_watchlist.json";

/// A single storage slot holding one serialized blob.
pub trait Storage {
    /// Read the slot. `None` means the slot has never been written.
    fn read(&self) -> Result<Option<String>, StoreError>;

    /// Replace the slot contents.
    fn write(&self, payload: &str) -> Result<(), StoreError>;
}

/// File-backed slot: the blob lives in one file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                slot: self.path.display().to_string(),
                source: err,
            }),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        let write_err = |source: io::Error| StoreError::Write {
            slot: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        // Write a sibling temp file, then rename over the slot. Rename is
        // the atomic step; readers see either the old blob or the new one.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, payload).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;
        Ok(())
    }
}

/// In-memory slot: the pure fake for tests.
///
/// `RefCell`, not a lock — the whole model is single-threaded, one process
/// mutating one slot.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot pre-seeded with an existing payload.
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(payload.into())),
        }
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StoreError> {
        Ok(self.blob.borrow().clone())
    }

    fn write(&self, payload: &str) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(payload.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_slot_starts_unwritten() {
        let slot = MemoryStorage::new();
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn memory_slot_returns_last_write() {
        let slot = MemoryStorage::new();
        slot.write("first").unwrap();
        slot.write("second").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn memory_slot_can_be_seeded() {
        let slot = MemoryStorage::with_payload("[]");
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn file_slot_missing_file_reads_as_unwritten() {
        let dir = TempDir::new().unwrap();
        let slot = FileStorage::new(dir.path().join(DEFAULT_FILE_NAME));
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn file_slot_roundtrips_payload() {
        let dir = TempDir::new().unwrap();
        let slot = FileStorage::new(dir.path().join(DEFAULT_FILE_NAME));
        slot.write(r#"[{"fake":"blob"}]"#).unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"[{"fake":"blob"}]"#));
    }

    #[test]
    fn file_slot_overwrites_previous_payload() {
        let dir = TempDir::new().unwrap();
        let slot = FileStorage::new(dir.path().join(DEFAULT_FILE_NAME));
        slot.write("old").unwrap();
        slot.write("new").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn file_slot_write_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deeper").join(DEFAULT_FILE_NAME);
        let slot = FileStorage::new(&path);
        slot.write("[]").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn file_slot_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let slot = FileStorage::new(dir.path().join(DEFAULT_FILE_NAME));
        slot.write("[]").unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
