//! # Picsync Store
//!
//! Collaborator interfaces consumed by the picsync backend, and in-memory
//! implementations of each.
//!
//! The backend treats its datastore, blob storage, and identity provider as
//! external services behind traits:
//!
//! - [`DocumentStore`] — a document-oriented datastore holding user, album,
//!   and image records
//! - [`BlobStore`] — raw image bytes and signed download URLs
//! - [`IdentityProvider`] — verifies opaque credential tokens into a stable
//!   user id
//!
//! The in-memory implementations back tests and development deployments.
//! They are safe for concurrent use from multiple connection handlers; each
//! trait call is serialized behind its own lock and no lock is held across
//! calls.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod blob;
mod document;
mod error;
mod identity;
mod memory;

pub use blob::BlobStore;
pub use document::{collections, field, Document, DocumentStore};
pub use error::{StoreError, StoreResult};
pub use identity::{HmacIdentityProvider, IdentityError, IdentityProvider};
pub use memory::{MemoryBlobStore, MemoryDocumentStore};
