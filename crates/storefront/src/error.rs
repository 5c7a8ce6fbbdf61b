//! Error types for the persistence layer.
//!
//! Store operations never fail: out-of-range input is normalised and storage
//! problems are logged. [`StorageError`] is what backends return to the
//! stores, which decide how to recover.

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](crate::storage::KeyValueStore) backend
/// or while encoding/decoding a persisted snapshot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error on slot {slot}: {source}")]
    Io {
        /// Slot being accessed.
        slot: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A snapshot was written by an unknown format version.
    #[error("Unsupported snapshot version: {0}")]
    UnsupportedVersion(u32),

    /// Slot names are restricted to ASCII letters, digits, `-` and `_`.
    #[error("Invalid slot name: {0:?}")]
    InvalidSlot(String),

    /// The backend cannot be used (e.g. a poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for `StorageError`.
pub type Result<T> = std::result::Result<T, StorageError>;
