//! Snapshot encoding for persisted collections.
//!
//! A slot holds a JSON envelope:
//!
//! ```json
//! { "version": 1, "savedAt": "2026-01-01T00:00:00Z", "items": [ ... ] }
//! ```
//!
//! Slots written by the browser storefront hold a bare JSON array of items;
//! those still load. Anything else is treated as an empty collection so a
//! session can always start.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::storage::KeyValueStore;

/// Current snapshot format version.
pub const FORMAT_VERSION: u32 = 1;

/// A persisted, ordered collection of items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: DeserializeOwned"))]
pub struct Snapshot<T> {
    /// Format version the snapshot was written with.
    pub version: u32,
    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,
    /// Items in insertion order.
    pub items: Vec<T>,
}

/// Borrowed form of [`Snapshot`] used when writing.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a, T> {
    version: u32,
    saved_at: DateTime<Utc>,
    items: &'a [T],
}

/// The envelope fields that do not depend on the item type.
#[derive(Deserialize)]
struct EnvelopeHeader {
    version: u32,
}

/// Encode items as a versioned snapshot.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if an item cannot be serialized.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    let snapshot = SnapshotRef {
        version: FORMAT_VERSION,
        saved_at: Utc::now(),
        items,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Decode a snapshot (or a legacy bare array) into its items.
///
/// # Errors
///
/// Returns `StorageError::Serialization` for malformed JSON and
/// `StorageError::UnsupportedVersion` for envelopes from a newer format.
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.is_array() {
        return Ok(serde_json::from_value(value)?);
    }

    // Check the version before the items, whose shape may differ between formats.
    let header = EnvelopeHeader::deserialize(&value)?;
    if header.version != FORMAT_VERSION {
        return Err(StorageError::UnsupportedVersion(header.version));
    }

    let snapshot: Snapshot<T> = serde_json::from_value(value)?;
    Ok(snapshot.items)
}

/// Read and decode a slot, falling back to an empty collection.
///
/// Missing slots are normal for a first visit. Unreadable or unparseable
/// slots are logged and then ignored.
pub fn load_or_empty<S, T>(storage: &S, slot: &str) -> Vec<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match storage.read(slot) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!(slot, "No persisted state, starting empty");
            return Vec::new();
        }
        Err(e) => {
            tracing::warn!(slot, error = %e, "Failed to read persisted state, starting empty");
            return Vec::new();
        }
    };

    match decode(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(slot, error = %e, "Discarding unreadable persisted state");
            Vec::new()
        }
    }
}

/// Encode and write a slot.
///
/// Persistence is best-effort: failures are logged and reported through the
/// return value, never propagated to the caller's mutation.
pub fn save<S, T>(storage: &S, slot: &str, items: &[T]) -> bool
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let result = encode(items).and_then(|raw| storage.write(slot, &raw));
    match result {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(slot, error = %e, "Failed to persist state");
            false
        }
    }
}
