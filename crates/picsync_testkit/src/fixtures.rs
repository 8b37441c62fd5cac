//! Test fixtures and seeding helpers.

use picsync_engine::Catalog;
use picsync_model::{AlbumDetails, DateTimeRange, Image, Privilege, Timestamp, UserRecord};
use picsync_store::{BlobStore, HmacIdentityProvider, MemoryBlobStore, MemoryDocumentStore};
use std::sync::Arc;

/// HMAC secret shared by every test identity provider.
pub const TEST_SECRET: &[u8] = b"picsync-testkit-secret-32-bytes!";

/// An in-memory collaborator bundle: document store, blob store, identity
/// provider, and a catalog over the documents.
///
/// Seeding helpers use `expect` internally so test setup failures surface
/// as panics with context.
pub struct TestBackend {
    /// The document store.
    pub documents: Arc<MemoryDocumentStore>,
    /// The blob store.
    pub blobs: Arc<MemoryBlobStore>,
    /// The identity provider; [`TestBackend::token_for`] mints tokens it
    /// accepts.
    pub identity: Arc<HmacIdentityProvider>,
    /// Catalog over `documents`.
    pub catalog: Catalog,
}

impl TestBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        let documents = Arc::new(MemoryDocumentStore::new());
        let blobs = Arc::new(MemoryBlobStore::new());
        let identity = Arc::new(HmacIdentityProvider::new(TEST_SECRET.to_vec()));
        let catalog = Catalog::new(documents.clone());
        Self {
            documents,
            blobs,
            identity,
            catalog,
        }
    }

    /// Mints a credential token the backend's identity provider accepts.
    pub fn token_for(&self, user_id: &str) -> String {
        self.identity.issue(user_id)
    }

    /// Registers a regular account.
    pub fn seed_user(&self, user_id: &str) {
        self.catalog
            .put_user(user_id, &UserRecord::new("", ""))
            .expect("seed user");
    }

    /// Registers an admin account.
    pub fn seed_admin(&self, user_id: &str) {
        let mut record = UserRecord::new("", "");
        record.privilege = Privilege::Admin;
        self.catalog.put_user(user_id, &record).expect("seed admin");
    }

    /// Stores an album with a fixed `last_modified` and returns it.
    pub fn seed_album(&self, owner: &str, album_id: &str, last_modified: Timestamp) -> AlbumDetails {
        let mut album = AlbumDetails::new(owner, album_id, album_id, DateTimeRange::new(0, 1));
        album.last_modified = last_modified;
        self.catalog.put_album(&album).expect("seed album");
        album
    }

    /// Stores an image contained in `albums` (at least one) together with
    /// its blob, and returns it.
    pub fn seed_image(
        &self,
        owner: &str,
        file_name: &str,
        timestamp: Timestamp,
        albums: &[&str],
    ) -> Image {
        assert!(!albums.is_empty(), "an image must be contained somewhere");
        let mut image = Image::new(
            owner,
            file_name,
            timestamp,
            format!("{owner}/{file_name}"),
            albums[0],
        );
        for album in &albums[1..] {
            image.containing_albums.insert((*album).to_string());
        }
        self.catalog.put_image(&image).expect("seed image");
        self.blobs
            .upload(&image.url, b"test pixels", "image/jpeg")
            .expect("seed blob");
        image
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picsync_store::IdentityProvider;

    #[test]
    fn tokens_verify_against_the_bundle_provider() {
        let backend = TestBackend::new();
        let token = backend.token_for("u1");
        assert_eq!(backend.identity.verify(&token).unwrap(), "u1");
    }

    #[test]
    fn seeded_records_are_readable() {
        let backend = TestBackend::new();
        backend.seed_user("u1");
        backend.seed_album("u1", "a1", 100);
        backend.seed_image("u1", "i1.jpg", 5, &["a1"]);

        assert!(backend.catalog.user_exists("u1").unwrap());
        assert_eq!(
            backend.catalog.album("a1").unwrap().unwrap().last_modified,
            100
        );
        assert!(backend.blobs.download("u1/i1.jpg").is_ok());
    }
}
