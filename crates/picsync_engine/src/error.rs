//! Error types for the engine crate.

use picsync_store::StoreError;
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Domain failures recognized by the dispatch boundary.
///
/// Handlers return these instead of raising; the dispatcher pattern-matches
/// them into response status codes. Anything that is not one of the
/// recognized kinds becomes an internal error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The referenced user does not exist.
    #[error("user does not exist: {0}")]
    UserNotFound(String),

    /// The referenced album does not exist.
    #[error("album does not exist: {0}")]
    AlbumNotFound(String),

    /// The referenced image does not exist.
    #[error("image does not exist: {0}")]
    ImageNotFound(String),

    /// The actor is not the owner of the resource.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A required argument is missing or malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A record failed to serialize or deserialize.
    #[error("record codec failure: {0}")]
    Codec(String),

    /// A collaborator call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// An unexpected failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Creates a permission-denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied(message.into())
    }

    /// Creates an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
