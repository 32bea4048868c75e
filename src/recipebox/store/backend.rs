use crate::error::Result;

/// Abstract interface for raw blob storage.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while the favorites store and auth gate decide "what" gets stored.
pub trait StorageBackend {
    /// Read the blob stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Replace the blob stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob stored under `key`. Deleting a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}
