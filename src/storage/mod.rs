//! Blob Storage
//!
//! Named string slots, the persistence substrate for carts and wishlists. Any
//! backend that can get and set a string by name will do: the storefront used
//! browser local storage, this crate ships an in-memory map and a directory of
//! files.

use std::io;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

mod file;
mod memory;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;

/// Slot holding the serialized cart lines.
pub const CART_SLOT: &str = "loopcart-cart";

/// Slot holding the serialized wishlist entries.
pub const WISHLIST_SLOT: &str = "loopcart-wishlist";

/// Errors raised by a blob store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("blob store I/O error: {0}")]
    Io(#[from] io::Error),

    /// A collection could not be serialized before writing.
    #[error("failed to serialize slot contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A slot held data that does not parse as the expected collection.
#[derive(Debug, Error)]
pub enum SlotError {
    /// The slot is not valid JSON of the expected shape.
    #[error("slot {slot} is corrupt: {source}")]
    Corrupt {
        /// Slot name
        slot: String,

        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value store of named UTF-8 string slots.
pub trait BlobStore {
    /// Read a slot, returning `None` when it has never been written.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be written.
    fn set(&mut self, name: &str, value: &str) -> Result<(), StorageError>;
}

/// Serialize a collection into a slot.
///
/// # Errors
///
/// Returns a [`StorageError`] if serialization or the write fails.
pub fn write_slot<S, T>(store: &mut S, slot: &str, items: &[T]) -> Result<(), StorageError>
where
    S: BlobStore + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;

    store.set(slot, &raw)
}

/// Parse the raw contents of a slot into a collection.
///
/// A JSON `null` is read as an empty collection, the way an absent slot is.
/// Records that do not decode as `T` are dropped with a warning, keeping the
/// rest of the collection.
///
/// # Errors
///
/// Returns [`SlotError::Corrupt`] if the contents are not a JSON array.
pub fn decode_slot<T>(slot: &str, raw: &str) -> Result<Vec<T>, SlotError>
where
    T: DeserializeOwned,
{
    let records = serde_json::from_str::<Option<Vec<serde_json::Value>>>(raw)
        .map_err(|source| SlotError::Corrupt {
            slot: slot.to_string(),
            source,
        })?
        .unwrap_or_default();

    let decoded = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| {
            serde_json::from_value(record)
                .inspect_err(|error| warn!(slot, index, %error, "dropping unreadable record"))
                .ok()
        })
        .collect();

    Ok(decoded)
}
