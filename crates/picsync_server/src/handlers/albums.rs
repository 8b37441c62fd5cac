//! Album operations.

use super::{authed_user, created, ok, parse_args};
use crate::context::ServiceContext;
use crate::dispatch::Handler;
use picsync_engine::{sync_album_details, AlbumUpdate, ClientAlbumState, EngineResult, NewAlbum};
use picsync_model::AlbumId;
use picsync_protocol::{Request, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct CreateAlbumArgs {
    album_data: NewAlbum,
}

/// Creates an album owned by the authenticated user.
pub struct CreateAlbum {
    context: Arc<ServiceContext>,
}

impl CreateAlbum {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for CreateAlbum {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: CreateAlbumArgs = parse_args(request)?;
        let album_id = self.context.albums.create_album(user_id, args.album_data)?;
        created(&album_id)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SyncAlbumDetailsArgs {
    /// Album id → the client's cached `last_modified`. Empty means a full
    /// sync.
    #[serde(default)]
    albums: ClientAlbumState,
}

/// Differential sync of album details against the client's cache.
pub struct SyncAlbumDetails {
    context: Arc<ServiceContext>,
}

impl SyncAlbumDetails {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for SyncAlbumDetails {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: SyncAlbumDetailsArgs = parse_args(request).unwrap_or_default();
        let changes = sync_album_details(&self.context.catalog, user_id, &args.albums)?;
        ok(&changes)
    }
}

#[derive(Debug, Deserialize)]
struct GetAlbumContentsArgs {
    album_id: AlbumId,
}

/// Lists the images contained in an album with signed download URLs.
pub struct GetAlbumContents {
    context: Arc<ServiceContext>,
}

impl GetAlbumContents {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for GetAlbumContents {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        authed_user(request)?;
        let args: GetAlbumContentsArgs = parse_args(request)?;
        let contents = self
            .context
            .images
            .album_contents(&args.album_id, self.context.config.signed_url_ttl)?;
        ok(&contents)
    }
}

#[derive(Debug, Deserialize)]
struct UpdateAlbumArgs {
    album_id: AlbumId,
    album_data: AlbumUpdate,
}

/// Updates album metadata.
pub struct UpdateAlbum {
    context: Arc<ServiceContext>,
}

impl UpdateAlbum {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for UpdateAlbum {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: UpdateAlbumArgs = parse_args(request)?;
        self.context
            .albums
            .update_album(user_id, &args.album_id, args.album_data)?;
        Ok(Response::from_status(StatusCode::Ok))
    }
}

#[derive(Debug, Deserialize)]
struct DeleteAlbumArgs {
    album_id: AlbumId,
}

/// Deletes an album, cascading to image unlinking.
pub struct DeleteAlbum {
    context: Arc<ServiceContext>,
}

impl DeleteAlbum {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for DeleteAlbum {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let args: DeleteAlbumArgs = parse_args(request)?;
        // The ids of orphan-deleted images go back so the client can purge
        // its cached copies too.
        let deleted = self.context.links.delete_album(user_id, &args.album_id)?;
        ok(&deleted)
    }
}
