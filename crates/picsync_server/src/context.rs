//! Shared collaborator context for request handling.

use crate::config::ServerConfig;
use picsync_engine::{
    AccountManager, AdminService, AlbumService, Catalog, ImageService, LinkManager,
};
use picsync_store::{BlobStore, DocumentStore, IdentityProvider};
use std::sync::Arc;

/// Long-lived collaborators shared by every handler.
///
/// Built once at startup and passed by `Arc` into the registry; handlers
/// hold no per-request state of their own.
pub struct ServiceContext {
    /// Server configuration.
    pub config: ServerConfig,
    /// Typed catalog over the document store.
    pub catalog: Catalog,
    /// Blob storage service.
    pub blobs: Arc<dyn BlobStore>,
    /// Identity provider consulted by the authentication gate.
    pub identity: Arc<dyn IdentityProvider>,
    /// Album creation and metadata updates.
    pub albums: AlbumService,
    /// Image intake and content listing.
    pub images: ImageService,
    /// Image↔album containment lifecycle.
    pub links: LinkManager,
    /// Account lifecycle.
    pub accounts: AccountManager,
    /// Admin reporting.
    pub admin: AdminService,
}

impl ServiceContext {
    /// Wires the engine services over the given collaborators.
    pub fn new(
        config: ServerConfig,
        documents: Arc<dyn DocumentStore>,
        blobs: Arc<dyn BlobStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        let catalog = Catalog::new(documents);
        let links = LinkManager::new(catalog.clone(), blobs.clone());
        let albums = AlbumService::new(catalog.clone());
        let images = ImageService::new(catalog.clone(), blobs.clone(), links.clone());
        let accounts = AccountManager::new(catalog.clone(), blobs.clone());
        let admin = AdminService::new(catalog.clone());

        Self {
            config,
            catalog,
            blobs,
            identity,
            albums,
            images,
            links,
            accounts,
            admin,
        }
    }
}
