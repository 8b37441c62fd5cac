//! Image↔album containment lifecycle.

use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult};
use picsync_model::ImageId;
use picsync_store::BlobStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maintains the many-to-many containment relation between images and
/// albums, including safe removal of orphaned images.
///
/// An image has two logical states: linked (containment set non-empty) and
/// orphaned-pending-delete. Orphaning is transient; the unlink that empties
/// the set immediately deletes the image record and its backing blob, so no
/// orphan is ever persisted.
#[derive(Clone)]
pub struct LinkManager {
    catalog: Catalog,
    blobs: Arc<dyn BlobStore>,
}

impl LinkManager {
    /// Creates a link manager over the catalog and blob store.
    pub fn new(catalog: Catalog, blobs: Arc<dyn BlobStore>) -> Self {
        Self { catalog, blobs }
    }

    /// Adds `album_id` to the image's containment set.
    ///
    /// The requesting user, the album, and the image must all exist.
    /// Linking an already-linked album is a no-op; a link that changes the
    /// set advances the album's `last_modified`.
    pub fn link(&self, user_id: &str, image_id: &str, album_id: &str) -> EngineResult<()> {
        if !self.catalog.user_exists(user_id)? {
            return Err(EngineError::UserNotFound(user_id.to_string()));
        }
        let mut album = self
            .catalog
            .album(album_id)?
            .ok_or_else(|| EngineError::AlbumNotFound(album_id.to_string()))?;
        let mut image = self
            .catalog
            .image(image_id)?
            .ok_or_else(|| EngineError::ImageNotFound(image_id.to_string()))?;

        if image.containing_albums.insert(album_id.to_string()) {
            self.catalog.put_image(&image)?;
            album.touch();
            self.catalog.put_album(&album)?;
        }
        Ok(())
    }

    /// Removes `album_id` from the image's containment set.
    ///
    /// The requesting user must own the image. If `delete_if_orphaned` is
    /// set and the removal empties the set, the image record and its
    /// backing blob are deleted; returns whether the image was deleted.
    pub fn unlink(
        &self,
        user_id: &str,
        image_id: &str,
        album_id: &str,
        delete_if_orphaned: bool,
    ) -> EngineResult<bool> {
        if !self.catalog.user_exists(user_id)? {
            return Err(EngineError::UserNotFound(user_id.to_string()));
        }
        let mut album = self
            .catalog
            .album(album_id)?
            .ok_or_else(|| EngineError::AlbumNotFound(album_id.to_string()))?;
        let mut image = self
            .catalog
            .image(image_id)?
            .ok_or_else(|| EngineError::ImageNotFound(image_id.to_string()))?;

        if image.owner_id != user_id {
            return Err(EngineError::permission_denied(format!(
                "user {user_id} does not own image {image_id}"
            )));
        }

        if !image.containing_albums.remove(album_id) {
            // Not linked to begin with; nothing to write back.
            return Ok(false);
        }

        let deleted = if delete_if_orphaned && image.is_orphaned() {
            self.delete_image_and_blob(&image.file_name, &image.url)?;
            true
        } else {
            self.catalog.put_image(&image)?;
            false
        };

        album.touch();
        self.catalog.put_album(&album)?;
        Ok(deleted)
    }

    /// Deletes an album, unlinking every image it contains.
    ///
    /// The album must exist, and the requesting user must own it (checked
    /// by looking for the album among the user's own; a miss after the
    /// existence check is a permission failure, not absence). Returns the
    /// ids of the images that were orphan-deleted by the cascade, so the
    /// caller can purge its cached copies.
    pub fn delete_album(&self, user_id: &str, album_id: &str) -> EngineResult<Vec<ImageId>> {
        if !self.catalog.album_exists(album_id)? {
            return Err(EngineError::AlbumNotFound(album_id.to_string()));
        }
        let owned = self.catalog.albums_owned_by(user_id)?;
        if !owned.iter().any(|album| album.album_id == album_id) {
            return Err(EngineError::permission_denied(format!(
                "user {user_id} does not own album {album_id}"
            )));
        }

        let mut deleted = Vec::new();
        for image in self.catalog.images_in_album(album_id)? {
            if self.unlink(user_id, &image.file_name, album_id, true)? {
                deleted.push(image.file_name);
            }
        }

        self.catalog.delete_album(album_id)?;
        debug!(album_id, orphaned = deleted.len(), "album deleted");
        Ok(deleted)
    }

    /// Removes the image record, then its blob. The record is the source
    /// of truth: a blob-store failure after the record deletion is logged
    /// and not surfaced, and the stray blob is reclaimed by the
    /// account-deletion prefix sweep.
    fn delete_image_and_blob(&self, image_id: &str, blob_path: &str) -> EngineResult<()> {
        self.catalog.delete_image(image_id)?;
        if let Err(error) = self.blobs.delete(blob_path) {
            warn!(image_id, blob_path, %error, "orphaned image blob not deleted");
        }
        Ok(())
    }
}
