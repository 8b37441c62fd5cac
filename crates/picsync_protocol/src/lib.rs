//! # Picsync Protocol
//!
//! The length-prefixed wire protocol spoken between picsync clients and the
//! server.
//!
//! ## Frame layout
//!
//! ```text
//! +----------------------+------------------------+
//! | length (u32, BE)     | body (CBOR, `length` B)|
//! +----------------------+------------------------+
//! ```
//!
//! A request body is a field-tagged CBOR map carrying the operation code,
//! the opaque credential token, operation-specific arguments, and an
//! optional ordered payload. A response body carries a status code and an
//! optional payload.
//!
//! Bodies are read in bounded chunks (at most [`MAX_CHUNK`] bytes per read)
//! so a single frame of up to `u32::MAX` bytes never blocks on one
//! unbounded read.
//!
//! The protocol is not session-oriented: a connection carries exactly one
//! request and one response.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod frame;
mod message;
mod ops;
mod status;

pub use error::{FrameError, FrameResult};
pub use frame::{read_frame, write_frame, MAX_CHUNK};
pub use message::{Request, Response};
pub use ops::OpCode;
pub use status::StatusCode;
