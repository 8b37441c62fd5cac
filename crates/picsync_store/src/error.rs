//! Error types for the store crate.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the document and blob stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The referenced document does not exist.
    #[error("document not found: {collection}/{id}")]
    DocumentNotFound {
        /// Collection searched.
        collection: String,
        /// Document id.
        id: String,
    },

    /// The referenced blob does not exist.
    #[error("blob not found: {0}")]
    BlobNotFound(String),

    /// A record failed to serialize or deserialize.
    #[error("document codec failure: {0}")]
    Codec(String),

    /// The backing service failed.
    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a document-not-found error.
    pub fn document_not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self::DocumentNotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }
}
