//! In-memory collaborator implementations for tests and development.

use crate::blob::BlobStore;
use crate::document::{field, Document, DocumentStore};
use crate::error::{StoreError, StoreResult};
use ciborium::value::Value;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::time::Duration;

/// An in-memory document store.
///
/// Documents live in per-collection ordered maps, so `list` and query
/// results come back in id order. Each trait call takes the store lock
/// once; no lock is held across calls.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<BTreeMap<String, BTreeMap<String, Document>>>,
}

impl MemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    fn exists(&self, collection: &str, id: &str) -> StoreResult<bool> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .is_some_and(|docs| docs.contains_key(id)))
    }

    fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Vec<(String, Document)>,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write();
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::document_not_found(collection, id))?;

        let Value::Map(pairs) = document else {
            return Err(StoreError::Codec(format!(
                "document {collection}/{id} is not a map"
            )));
        };
        for (name, value) in fields {
            let position = pairs
                .iter()
                .position(|(key, _)| matches!(key, Value::Text(text) if *text == name));
            match position {
                Some(index) => pairs[index].1 = value,
                None => pairs.push((Value::Text(name), value)),
            }
        }
        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        if let Some(docs) = self.collections.write().get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    fn query_eq(
        &self,
        collection: &str,
        field_name: &str,
        value: &Document,
    ) -> StoreResult<Vec<(String, Document)>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| field(doc, field_name) == Some(value))
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn query_contains(
        &self,
        collection: &str,
        field_name: &str,
        value: &Document,
    ) -> StoreResult<Vec<(String, Document)>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| match field(doc, field_name) {
                        Some(Value::Array(items)) => items.contains(value),
                        _ => false,
                    })
                    .map(|(id, doc)| (id.clone(), doc.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }

    fn delete_where(
        &self,
        collection: &str,
        field_name: &str,
        value: &Document,
    ) -> StoreResult<usize> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|_, doc| field(doc, field_name) != Some(value));
        Ok(before - docs.len())
    }

    fn list(&self, collection: &str) -> StoreResult<Vec<(String, Document)>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.iter().map(|(id, doc)| (id.clone(), doc.clone())).collect())
            .unwrap_or_default())
    }
}

/// An in-memory blob store.
///
/// Signed URLs are synthetic `memory://` URLs carrying the path and TTL,
/// which is enough for tests to assert resolution happened.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<BTreeMap<String, Blob>>,
}

#[derive(Debug, Clone)]
struct Blob {
    bytes: Vec<u8>,
    content_type: String,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored blobs.
    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    /// Returns true if no blobs are stored.
    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }

    /// Returns the content type recorded for `path`, if the blob exists.
    pub fn content_type(&self, path: &str) -> Option<String> {
        self.blobs.read().get(path).map(|blob| blob.content_type.clone())
    }
}

impl BlobStore for MemoryBlobStore {
    fn upload(&self, path: &str, bytes: &[u8], content_type: &str) -> StoreResult<()> {
        self.blobs.write().insert(
            path.to_string(),
            Blob {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    fn download(&self, path: &str) -> StoreResult<Vec<u8>> {
        self.blobs
            .read()
            .get(path)
            .map(|blob| blob.bytes.clone())
            .ok_or_else(|| StoreError::BlobNotFound(path.to_string()))
    }

    fn delete(&self, path: &str) -> StoreResult<()> {
        self.blobs.write().remove(path);
        Ok(())
    }

    fn delete_prefix(&self, prefix: &str) -> StoreResult<usize> {
        let mut blobs = self.blobs.write();
        let before = blobs.len();
        blobs.retain(|path, _| !path.starts_with(prefix));
        Ok(before - blobs.len())
    }

    fn signed_url(&self, path: &str, ttl: Duration) -> StoreResult<String> {
        if !self.blobs.read().contains_key(path) {
            return Err(StoreError::BlobNotFound(path.to_string()));
        }
        Ok(format!("memory://{path}?ttl={}", ttl.as_secs()))
    }
}
