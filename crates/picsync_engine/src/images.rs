//! Image intake and album content listing.

use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult};
use crate::links::LinkManager;
use picsync_model::{GeoPoint, Image, ImageId, Timestamp};
use picsync_store::BlobStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Content type recorded for uploaded image blobs.
const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// One image carried in an add-to-album payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    /// File name; the image's identity key.
    pub file_name: ImageId,
    /// Capture time, Unix milliseconds.
    pub timestamp: Timestamp,
    /// Capture location, when known.
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Category tag.
    #[serde(default)]
    pub tag: Option<i32>,
    /// Raw image bytes.
    #[serde(default)]
    pub data: Vec<u8>,
}

/// Ingests uploaded images into albums and lists album contents.
#[derive(Clone)]
pub struct ImageService {
    catalog: Catalog,
    blobs: Arc<dyn BlobStore>,
    links: LinkManager,
}

impl ImageService {
    /// Creates an image service over the catalog and blob store.
    pub fn new(catalog: Catalog, blobs: Arc<dyn BlobStore>, links: LinkManager) -> Self {
        Self {
            catalog,
            blobs,
            links,
        }
    }

    /// Adds images to an album the caller owns.
    ///
    /// Payload `uploads` are stored in the blob store under
    /// `{owner}/{file_name}` and recorded as contained in the album; an
    /// upload whose file name already exists is linked instead of
    /// re-recorded. `existing` names already-stored images to link.
    pub fn add_to_album(
        &self,
        user_id: &str,
        album_id: &str,
        uploads: Vec<ImageUpload>,
        existing: &[ImageId],
    ) -> EngineResult<()> {
        if !self.catalog.user_exists(user_id)? {
            return Err(EngineError::UserNotFound(user_id.to_string()));
        }
        let mut album = self
            .catalog
            .album(album_id)?
            .ok_or_else(|| EngineError::AlbumNotFound(album_id.to_string()))?;
        if album.owner_id != user_id {
            return Err(EngineError::permission_denied(format!(
                "user {user_id} does not own album {album_id}"
            )));
        }

        let mut recorded = 0usize;
        for upload in uploads {
            let path = format!("{user_id}/{}", upload.file_name);
            self.blobs.upload(&path, &upload.data, IMAGE_CONTENT_TYPE)?;

            if self.catalog.image_exists(&upload.file_name)? {
                self.links.link(user_id, &upload.file_name, album_id)?;
                continue;
            }

            let mut image = Image::new(user_id, upload.file_name, upload.timestamp, path, album_id);
            image.location = upload.location;
            image.tag = upload.tag;
            self.catalog.put_image(&image)?;
            recorded += 1;
        }

        for image_id in existing {
            self.links.link(user_id, image_id, album_id)?;
        }

        if recorded > 0 {
            album.touch();
            self.catalog.put_album(&album)?;
            debug!(user_id, album_id, recorded, "images added to album");
        }
        Ok(())
    }

    /// Returns the images contained in an album, each with its `url`
    /// resolved to a signed download URL valid for `url_ttl`.
    pub fn album_contents(&self, album_id: &str, url_ttl: Duration) -> EngineResult<Vec<Image>> {
        if !self.catalog.album_exists(album_id)? {
            return Err(EngineError::AlbumNotFound(album_id.to_string()));
        }

        let mut images = self.catalog.images_in_album(album_id)?;
        for image in &mut images {
            match self.blobs.signed_url(&image.url, url_ttl) {
                Ok(url) => image.url = url,
                // A record without its blob is served with the stored path;
                // the client gets the listing either way.
                Err(error) => {
                    warn!(image_id = %image.file_name, %error, "signed url resolution failed");
                }
            }
        }
        Ok(images)
    }
}
