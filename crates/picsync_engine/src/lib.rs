//! # Picsync Engine
//!
//! The algorithmic core of the picsync backend:
//!
//! - [`Catalog`] — typed access to the user, album, and image collections
//!   of the document store
//! - [`sync_album_details`] — the differential album sync computation
//! - [`LinkManager`] — the image↔album containment lifecycle, including
//!   orphan cleanup and cascading album deletion
//! - [`ImageService`] — image intake and album content listing
//! - [`AlbumService`] — album creation and metadata updates
//! - [`AccountManager`] / [`AdminService`] — account lifecycle and admin
//!   reporting
//!
//! ## Key invariants
//!
//! - An image exists only while some album contains it; the unlink that
//!   empties its containment set deletes it
//! - `last_modified` on an album never decreases; sync compares it, not
//!   content
//! - Only an owner mutates an album or unlinks its images
//! - Sync is last-writer-wins at whole-album granularity; no field merge

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod accounts;
mod admin;
mod albums;
mod catalog;
mod error;
mod images;
mod links;
mod sync;

pub use accounts::AccountManager;
pub use admin::{AdminService, Statistics, UserInfo};
pub use albums::{AlbumService, AlbumUpdate, NewAlbum};
pub use catalog::Catalog;
pub use error::{EngineError, EngineResult};
pub use images::{ImageService, ImageUpload};
pub use links::LinkManager;
pub use sync::{sync_album_details, ClientAlbumState};
