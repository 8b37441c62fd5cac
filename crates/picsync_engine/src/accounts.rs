//! Account lifecycle.

use crate::catalog::Catalog;
use crate::error::EngineResult;
use picsync_model::{Privilege, UserRecord};
use picsync_store::BlobStore;
use std::sync::Arc;
use tracing::info;

/// Creates and deletes accounts.
#[derive(Clone)]
pub struct AccountManager {
    catalog: Catalog,
    blobs: Arc<dyn BlobStore>,
}

impl AccountManager {
    /// Creates an account manager over the catalog and blob store.
    pub fn new(catalog: Catalog, blobs: Arc<dyn BlobStore>) -> Self {
        Self { catalog, blobs }
    }

    /// Registers an account for `user_id` with User privilege.
    ///
    /// Re-registering overwrites the profile fields but never elevates
    /// privilege.
    pub fn create_account(
        &self,
        user_id: &str,
        email: &str,
        display_name: &str,
    ) -> EngineResult<()> {
        let record = UserRecord::new(email, display_name);
        self.catalog.put_user(user_id, &record)?;
        info!(user_id, "account created");
        Ok(())
    }

    /// Deletes an account and everything it owns: image records, album
    /// records, the account record, and the user's blob prefix.
    pub fn delete_account(&self, user_id: &str) -> EngineResult<()> {
        let images = self.catalog.delete_images_owned_by(user_id)?;
        let albums = self.catalog.delete_albums_owned_by(user_id)?;
        self.catalog.delete_user(user_id)?;
        let blobs = self.blobs.delete_prefix(&format!("{user_id}/"))?;
        info!(user_id, images, albums, blobs, "account deleted");
        Ok(())
    }

    /// Returns the privilege level of `user_id`, or `None` for an
    /// unregistered account.
    pub fn privilege_of(&self, user_id: &str) -> EngineResult<Option<Privilege>> {
        Ok(self.catalog.user(user_id)?.map(|record| record.privilege))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picsync_model::{AlbumDetails, DateTimeRange, Image};
    use picsync_store::{MemoryBlobStore, MemoryDocumentStore};

    fn manager() -> (Catalog, Arc<MemoryBlobStore>, AccountManager) {
        let catalog = Catalog::new(Arc::new(MemoryDocumentStore::new()));
        let blobs = Arc::new(MemoryBlobStore::new());
        let manager = AccountManager::new(catalog.clone(), blobs.clone());
        (catalog, blobs, manager)
    }

    #[test]
    fn create_registers_a_regular_user() {
        let (_, _, manager) = manager();
        manager.create_account("u1", "a@example.com", "Ada").unwrap();

        assert_eq!(manager.privilege_of("u1").unwrap(), Some(Privilege::User));
        assert_eq!(manager.privilege_of("ghost").unwrap(), None);
    }

    #[test]
    fn delete_sweeps_records_and_blobs() {
        let (catalog, blobs, manager) = manager();
        manager.create_account("u1", "", "").unwrap();
        manager.create_account("u2", "", "").unwrap();

        catalog
            .put_album(&AlbumDetails::new("u1", "a1", "x", DateTimeRange::new(0, 1)))
            .unwrap();
        catalog
            .put_image(&Image::new("u1", "i1.jpg", 1, "u1/i1.jpg", "a1"))
            .unwrap();
        catalog
            .put_image(&Image::new("u2", "i2.jpg", 1, "u2/i2.jpg", "b1"))
            .unwrap();
        blobs.upload("u1/i1.jpg", b"a", "image/jpeg").unwrap();
        blobs.upload("u2/i2.jpg", b"b", "image/jpeg").unwrap();

        manager.delete_account("u1").unwrap();

        assert!(!catalog.user_exists("u1").unwrap());
        assert!(!catalog.album_exists("a1").unwrap());
        assert!(!catalog.image_exists("i1.jpg").unwrap());
        assert!(blobs.download("u1/i1.jpg").is_err());
        // The other account's data is untouched.
        assert!(catalog.image_exists("i2.jpg").unwrap());
        assert!(blobs.download("u2/i2.jpg").is_ok());
    }
}
