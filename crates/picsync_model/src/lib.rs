//! # Picsync Model
//!
//! Domain records shared by the picsync protocol, store, and engine crates.
//!
//! Albums and images are modeled as id-keyed records with explicit
//! set-valued cross-reference fields (`containing_albums` on [`Image`]),
//! resolved by id lookup. Records never hold live references to each other,
//! so the many-to-many containment relation cannot form object cycles.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod album;
mod image;
mod time;
mod user;

pub use album::{AlbumDetails, DateTimeRange};
pub use image::{GeoPoint, Image};
pub use time::{bump_last_modified, now_millis, Timestamp};
pub use user::{Privilege, UserRecord};

/// Identifier of a user account. Issued by the identity provider.
pub type UserId = String;

/// Identifier of an album. Unique within the albums collection.
pub type AlbumId = String;

/// Identifier of an image. The image's file name is its identity key.
pub type ImageId = String;
