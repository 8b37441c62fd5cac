//! # Picsync Server
//!
//! The connection/authentication/dispatch pipeline of the picsync backend.
//!
//! ## Pipeline
//!
//! ```text
//! +----------+     +-------+     +------+     +------------+
//! | Accept   | --> | Codec | --> | Auth | --> | Dispatcher |
//! | loop     |     | frame |     | gate |     | & handlers |
//! +----------+     +-------+     +------+     +------------+
//! ```
//!
//! Each accepted connection carries exactly one request: the frame is
//! decoded, the credential token is verified into a trusted user id, the
//! registered handler for the operation runs, and exactly one response goes
//! back before the write side is shut down. Decode failures answer
//! `BadRequest` without dispatching; verification failures answer
//! `Unauthorized` uniformly.
//!
//! The accept loop spawns one task per connection, bounded by a
//! connection-admission semaphore, and drains in-flight handlers on
//! shutdown.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod connection;
mod context;
mod dispatch;
mod handlers;
mod server;

pub use auth::AuthGate;
pub use config::ServerConfig;
pub use connection::handle_connection;
pub use context::ServiceContext;
pub use dispatch::{Dispatcher, Handler, Registry};
pub use server::Server;
