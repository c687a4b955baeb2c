//! Error types for the record store.
//!
//! # Design
//! Only real storage failures are errors. "Record not found" is reported
//! through `Option`/`bool` sentinels on the store surface, and a missing or
//! malformed persisted blob reads as the empty collection — so neither gets
//! a variant here. What remains is the slot I/O itself, the (in practice
//! unreachable) failure to encode the collection, and the one rejected
//! value: a non-finite rating, which serde_json would flatten to `null`
//! and the next load could not parse.

use std::fmt;
use std::io;

/// Errors returned by `MovieStore` operations.
#[derive(Debug)]
pub enum StoreError {
    /// The storage slot could not be read.
    Read { slot: String, source: io::Error },

    /// The storage slot could not be written.
    Write { slot: String, source: io::Error },

    /// The collection could not be encoded for persistence.
    Serialize(serde_json::Error),

    /// A record's rating is NaN or infinite, which JSON cannot represent;
    /// the write is refused rather than producing an unreadable blob.
    NonFiniteRating { id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Read { slot, source } => {
                write!(f, "failed to read {slot}: {source}")
            }
            StoreError::Write { slot, source } => {
                write!(f, "failed to write {slot}: {source}")
            }
            StoreError::Serialize(err) => {
                write!(f, "failed to encode collection: {err}")
            }
            StoreError::NonFiniteRating { id } => {
                write!(f, "refusing to persist movie {id}: rating is not finite")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Read { source, .. } | StoreError::Write { source, .. } => Some(source),
            StoreError::Serialize(err) => Some(err),
            StoreError::NonFiniteRating { .. } => None,
        }
    }
}
