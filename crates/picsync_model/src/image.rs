//! Image records.

use crate::time::Timestamp;
use crate::{AlbumId, ImageId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A geographic coordinate attached to an image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// An uploaded image and its album containment.
///
/// `containing_albums` is a true set: linking an already-linked album is a
/// no-op. An image with an empty set is orphaned and must not persist; the
/// link manager deletes it as part of the unlink that emptied the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Owner of the image. Immutable once set.
    pub owner_id: UserId,
    /// Identity key of the image.
    pub file_name: ImageId,
    /// Capture time, Unix milliseconds.
    pub timestamp: Timestamp,
    /// Blob-store path of the image bytes. Resolved to a signed download
    /// URL when the image is returned to a client.
    pub url: String,
    /// Capture location, when known.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Category tag.
    #[serde(default)]
    pub tag: Option<i32>,
    /// Albums that contain this image.
    #[serde(default)]
    pub containing_albums: BTreeSet<AlbumId>,
}

impl Image {
    /// Creates an image record contained in a single album.
    pub fn new(
        owner_id: impl Into<UserId>,
        file_name: impl Into<ImageId>,
        timestamp: Timestamp,
        url: impl Into<String>,
        album_id: impl Into<AlbumId>,
    ) -> Self {
        let mut containing_albums = BTreeSet::new();
        containing_albums.insert(album_id.into());
        Self {
            owner_id: owner_id.into(),
            file_name: file_name.into(),
            timestamp,
            url: url.into(),
            location: None,
            tag: None,
            containing_albums,
        }
    }

    /// Returns true if no album contains this image.
    pub fn is_orphaned(&self) -> bool {
        self.containing_albums.is_empty()
    }
}
