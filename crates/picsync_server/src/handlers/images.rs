//! Image containment operations.

use super::{authed_user, ok, parse_args, parse_payload};
use crate::context::ServiceContext;
use crate::dispatch::Handler;
use picsync_engine::{EngineResult, ImageUpload};
use picsync_model::{AlbumId, ImageId};
use picsync_protocol::{Request, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct AddToAlbumArgs {
    album_id: AlbumId,
    /// Already-stored images to link, in addition to any uploads in the
    /// payload.
    #[serde(default)]
    images_id: Vec<ImageId>,
}

/// Uploads payload images into an album and links named existing ones.
pub struct AddToAlbum {
    context: Arc<ServiceContext>,
}

impl AddToAlbum {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for AddToAlbum {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: AddToAlbumArgs = parse_args(request)?;
        let uploads: Vec<ImageUpload> = parse_payload(request)?;
        self.context
            .images
            .add_to_album(user_id, &args.album_id, uploads, &args.images_id)?;
        Ok(Response::from_status(StatusCode::Ok))
    }
}

#[derive(Debug, Deserialize)]
struct RemoveFromAlbumArgs {
    album_id: AlbumId,
    images_id: Vec<ImageId>,
}

/// Unlinks images from an album, deleting any that become orphaned.
pub struct RemoveFromAlbum {
    context: Arc<ServiceContext>,
}

impl RemoveFromAlbum {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for RemoveFromAlbum {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: RemoveFromAlbumArgs = parse_args(request)?;

        let mut deleted = Vec::new();
        for image_id in &args.images_id {
            if self
                .context
                .links
                .unlink(user_id, image_id, &args.album_id, true)?
            {
                deleted.push(image_id.clone());
            }
        }
        ok(&deleted)
    }
}
