//! Error types for the protocol crate.

use thiserror::Error;

/// Result type for protocol operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur while encoding or decoding frames.
///
/// Every decode-side variant is answered on the wire with a synthetic
/// `BadRequest` response; the distinctions exist for logging only.
#[derive(Error, Debug)]
pub enum FrameError {
    /// I/O failure while reading or writing a frame.
    #[error("frame i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended before the declared body length was consumed.
    #[error("frame truncated: declared {declared} bytes, received {received}")]
    Truncated {
        /// Length announced by the 4-byte prefix.
        declared: usize,
        /// Bytes actually read before EOF.
        received: usize,
    },

    /// The body is larger than a 4-byte length prefix can describe.
    #[error("frame body too large: {0} bytes")]
    Oversize(u64),

    /// The body bytes did not parse into the expected fields.
    #[error("malformed frame body: {0}")]
    Malformed(String),

    /// A value could not be encoded into a frame body.
    #[error("body encoding failed: {0}")]
    Encode(String),
}

impl FrameError {
    /// Creates a malformed-body error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
