//! Blob store interface.

use crate::error::StoreResult;
use std::time::Duration;

/// A blob storage service holding raw image bytes.
///
/// Paths are `/`-separated; the backend stores each user's blobs under a
/// `{user_id}/` prefix so an account's data can be reclaimed with one
/// [`BlobStore::delete_prefix`] sweep.
///
/// # Implementors
///
/// - [`crate::MemoryBlobStore`] — for tests and development
pub trait BlobStore: Send + Sync {
    /// Stores bytes under `path`, replacing any existing blob.
    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<()>;

    /// Fetches the bytes stored under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::BlobNotFound`] if no blob exists.
    fn download(&self, path: &str) -> StoreResult<Vec<u8>>;

    /// Deletes the blob under `path`. Deleting an absent blob is a no-op.
    fn delete(&self, path: &str) -> StoreResult<()>;

    /// Deletes every blob whose path starts with `prefix`. Returns the
    /// number of blobs removed.
    fn delete_prefix(&self, prefix: &str) -> StoreResult<usize>;

    /// Issues a time-limited download URL for the blob under `path`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::BlobNotFound`] if no blob exists.
    fn signed_url(&self, path: &str, ttl: Duration) -> StoreResult<String>;
}
