//! Typed access to the document store collections.

use crate::error::{EngineError, EngineResult};
use ciborium::value::Value;
use picsync_model::{AlbumDetails, Image, UserRecord};
use picsync_store::{collections, Document, DocumentStore};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Typed facade over the three backend collections.
///
/// Records are serialized into field-tagged documents on write and
/// deserialized on read; the catalog is the only place that knows how
/// records map onto store documents. Cloning a catalog clones only the
/// store handle.
#[derive(Clone)]
pub struct Catalog {
    documents: Arc<dyn DocumentStore>,
}

impl Catalog {
    /// Creates a catalog over a document store.
    pub fn new(documents: Arc<dyn DocumentStore>) -> Self {
        Self { documents }
    }

    fn encode<T: Serialize>(record: &T) -> EngineResult<Document> {
        Value::serialized(record).map_err(|e| EngineError::Codec(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(document: &Document) -> EngineResult<T> {
        document
            .deserialized()
            .map_err(|e| EngineError::Codec(e.to_string()))
    }

    // --- users ---

    /// Fetches an account record.
    pub fn user(&self, user_id: &str) -> EngineResult<Option<UserRecord>> {
        self.documents
            .get(collections::USERS, user_id)?
            .map(|doc| Self::decode(&doc))
            .transpose()
    }

    /// Returns true if the account exists.
    pub fn user_exists(&self, user_id: &str) -> EngineResult<bool> {
        Ok(self.documents.exists(collections::USERS, user_id)?)
    }

    /// Stores an account record, replacing any existing one.
    pub fn put_user(&self, user_id: &str, record: &UserRecord) -> EngineResult<()> {
        self.documents
            .set(collections::USERS, user_id, Self::encode(record)?)?;
        Ok(())
    }

    /// Deletes an account record.
    pub fn delete_user(&self, user_id: &str) -> EngineResult<()> {
        Ok(self.documents.delete(collections::USERS, user_id)?)
    }

    /// Returns every account with its id, in id order.
    pub fn list_users(&self) -> EngineResult<Vec<(String, UserRecord)>> {
        let mut users = self
            .documents
            .list(collections::USERS)?
            .iter()
            .map(|(id, doc)| Ok((id.clone(), Self::decode(doc)?)))
            .collect::<EngineResult<Vec<_>>>()?;
        users.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(users)
    }

    // --- albums ---

    /// Fetches an album record.
    pub fn album(&self, album_id: &str) -> EngineResult<Option<AlbumDetails>> {
        self.documents
            .get(collections::ALBUMS, album_id)?
            .map(|doc| Self::decode(&doc))
            .transpose()
    }

    /// Returns true if the album exists.
    pub fn album_exists(&self, album_id: &str) -> EngineResult<bool> {
        Ok(self.documents.exists(collections::ALBUMS, album_id)?)
    }

    /// Stores an album record, replacing any existing one.
    pub fn put_album(&self, album: &AlbumDetails) -> EngineResult<()> {
        self.documents
            .set(collections::ALBUMS, &album.album_id, Self::encode(album)?)?;
        Ok(())
    }

    /// Returns every album owned by `owner_id`, ordered by album id.
    pub fn albums_owned_by(&self, owner_id: &str) -> EngineResult<Vec<AlbumDetails>> {
        let mut albums = self
            .documents
            .query_eq(
                collections::ALBUMS,
                "owner_id",
                &Value::Text(owner_id.to_string()),
            )?
            .iter()
            .map(|(_, doc)| Self::decode(doc))
            .collect::<EngineResult<Vec<AlbumDetails>>>()?;
        albums.sort_by(|a, b| a.album_id.cmp(&b.album_id));
        Ok(albums)
    }

    /// Deletes an album record.
    pub fn delete_album(&self, album_id: &str) -> EngineResult<()> {
        Ok(self.documents.delete(collections::ALBUMS, album_id)?)
    }

    /// Deletes every album owned by `owner_id`. Returns how many were
    /// removed.
    pub fn delete_albums_owned_by(&self, owner_id: &str) -> EngineResult<usize> {
        Ok(self.documents.delete_where(
            collections::ALBUMS,
            "owner_id",
            &Value::Text(owner_id.to_string()),
        )?)
    }

    // --- images ---

    /// Fetches an image record.
    pub fn image(&self, image_id: &str) -> EngineResult<Option<Image>> {
        self.documents
            .get(collections::IMAGES, image_id)?
            .map(|doc| Self::decode(&doc))
            .transpose()
    }

    /// Returns true if the image exists.
    pub fn image_exists(&self, image_id: &str) -> EngineResult<bool> {
        Ok(self.documents.exists(collections::IMAGES, image_id)?)
    }

    /// Stores an image record, replacing any existing one.
    pub fn put_image(&self, image: &Image) -> EngineResult<()> {
        self.documents
            .set(collections::IMAGES, &image.file_name, Self::encode(image)?)?;
        Ok(())
    }

    /// Returns every image contained in `album_id`, ordered by file name.
    pub fn images_in_album(&self, album_id: &str) -> EngineResult<Vec<Image>> {
        let mut images = self
            .documents
            .query_contains(
                collections::IMAGES,
                "containing_albums",
                &Value::Text(album_id.to_string()),
            )?
            .iter()
            .map(|(_, doc)| Self::decode(doc))
            .collect::<EngineResult<Vec<Image>>>()?;
        images.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        Ok(images)
    }

    /// Deletes an image record.
    pub fn delete_image(&self, image_id: &str) -> EngineResult<()> {
        Ok(self.documents.delete(collections::IMAGES, image_id)?)
    }

    /// Deletes every image owned by `owner_id`. Returns how many were
    /// removed.
    pub fn delete_images_owned_by(&self, owner_id: &str) -> EngineResult<usize> {
        Ok(self.documents.delete_where(
            collections::IMAGES,
            "owner_id",
            &Value::Text(owner_id.to_string()),
        )?)
    }

    // --- statistics ---

    /// Returns the number of registered accounts.
    pub fn count_users(&self) -> EngineResult<usize> {
        Ok(self.documents.count(collections::USERS)?)
    }

    /// Returns the number of albums.
    pub fn count_albums(&self) -> EngineResult<usize> {
        Ok(self.documents.count(collections::ALBUMS)?)
    }

    /// Returns the number of images.
    pub fn count_images(&self) -> EngineResult<usize> {
        Ok(self.documents.count(collections::IMAGES)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picsync_model::{DateTimeRange, UserRecord};
    use picsync_store::MemoryDocumentStore;

    fn catalog() -> Catalog {
        Catalog::new(Arc::new(MemoryDocumentStore::new()))
    }

    #[test]
    fn user_records_round_trip() {
        let catalog = catalog();
        let record = UserRecord::new("a@example.com", "Ada");

        catalog.put_user("u1", &record).unwrap();
        assert!(catalog.user_exists("u1").unwrap());
        assert_eq!(catalog.user("u1").unwrap(), Some(record));
        assert_eq!(catalog.user("u2").unwrap(), None);
    }

    #[test]
    fn album_records_round_trip() {
        let catalog = catalog();
        let album = AlbumDetails::new("u1", "a1", "Trip", DateTimeRange::new(0, 10));

        catalog.put_album(&album).unwrap();
        assert_eq!(catalog.album("a1").unwrap(), Some(album));
    }

    #[test]
    fn albums_owned_by_is_scoped_and_ordered() {
        let catalog = catalog();
        for (owner, id) in [("u1", "a2"), ("u2", "b1"), ("u1", "a1")] {
            catalog
                .put_album(&AlbumDetails::new(owner, id, "x", DateTimeRange::new(0, 1)))
                .unwrap();
        }

        let mine = catalog.albums_owned_by("u1").unwrap();
        let ids: Vec<&str> = mine.iter().map(|a| a.album_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
    }

    #[test]
    fn images_in_album_matches_containment() {
        let catalog = catalog();
        let mut img1 = Image::new("u1", "b.jpg", 2, "u1/b.jpg", "a1");
        img1.containing_albums.insert("a2".to_string());
        let img2 = Image::new("u1", "a.jpg", 1, "u1/a.jpg", "a1");
        let img3 = Image::new("u1", "c.jpg", 3, "u1/c.jpg", "a2");

        for image in [&img1, &img2, &img3] {
            catalog.put_image(image).unwrap();
        }

        let contents = catalog.images_in_album("a1").unwrap();
        let names: Vec<&str> = contents.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.jpg"]);
    }

    #[test]
    fn owner_sweeps_remove_only_their_records() {
        let catalog = catalog();
        catalog
            .put_album(&AlbumDetails::new("u1", "a1", "x", DateTimeRange::new(0, 1)))
            .unwrap();
        catalog
            .put_album(&AlbumDetails::new("u2", "a2", "y", DateTimeRange::new(0, 1)))
            .unwrap();
        catalog
            .put_image(&Image::new("u1", "i1.jpg", 1, "u1/i1.jpg", "a1"))
            .unwrap();

        assert_eq!(catalog.delete_albums_owned_by("u1").unwrap(), 1);
        assert_eq!(catalog.delete_images_owned_by("u1").unwrap(), 1);
        assert!(catalog.album_exists("a2").unwrap());
        assert_eq!(catalog.count_albums().unwrap(), 1);
        assert_eq!(catalog.count_images().unwrap(), 0);
    }
}
