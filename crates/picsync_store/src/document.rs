//! Document store interface.

use crate::error::StoreResult;
use ciborium::value::Value;

/// A stored document: a dynamic, field-tagged value.
///
/// Records are serialized into documents by the engine's catalog; the store
/// itself never interprets fields beyond equality and containment checks in
/// queries.
pub type Document = Value;

/// Collection names used by the backend.
pub mod collections {
    /// Registered accounts, keyed by user id.
    pub const USERS: &str = "users";
    /// Album records, keyed by album id.
    pub const ALBUMS: &str = "albums";
    /// Image records, keyed by file name.
    pub const IMAGES: &str = "images";
}

/// Looks up a top-level field of a document by name.
///
/// Returns `None` if the document is not a map or the field is absent.
pub fn field<'a>(document: &'a Document, name: &str) -> Option<&'a Document> {
    match document {
        Value::Map(pairs) => pairs
            .iter()
            .find(|(key, _)| matches!(key, Value::Text(text) if text == name))
            .map(|(_, value)| value),
        _ => None,
    }
}

/// A document-oriented datastore.
///
/// # Invariants
///
/// - `set` fully replaces any existing document under the same id
/// - `update_fields` fails on a missing document rather than creating one
/// - `delete` is idempotent: deleting an absent document succeeds
/// - Each call is atomic with respect to concurrent callers, but sequences
///   of calls are not; read-modify-write sequences race unless serialized
///   by the caller
///
/// # Implementors
///
/// - [`crate::MemoryDocumentStore`] — for tests and development
pub trait DocumentStore: Send + Sync {
    /// Fetches the document with the given id, if present.
    fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>>;

    /// Returns true if a document with the given id exists.
    fn exists(&self, collection: &str, id: &str) -> StoreResult<bool>;

    /// Stores a document, replacing any existing one under the same id.
    fn set(&self, collection: &str, id: &str, document: Document) -> StoreResult<()>;

    /// Overwrites the named top-level fields of an existing document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::DocumentNotFound`] if no document with
    /// the given id exists.
    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Vec<(String, Document)>,
    ) -> StoreResult<()>;

    /// Deletes the document with the given id. Deleting an absent document
    /// is a no-op.
    fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    /// Returns every document whose `field` equals `value`, with its id.
    fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Document,
    ) -> StoreResult<Vec<(String, Document)>>;

    /// Returns every document whose array-valued `field` contains `value`,
    /// with its id.
    fn query_contains(
        &self,
        collection: &str,
        field: &str,
        value: &Document,
    ) -> StoreResult<Vec<(String, Document)>>;

    /// Deletes every document whose `field` equals `value`. Returns the
    /// number of documents removed.
    fn delete_where(&self, collection: &str, field: &str, value: &Document) -> StoreResult<usize>;

    /// Returns every document in the collection, with its id.
    fn list(&self, collection: &str) -> StoreResult<Vec<(String, Document)>>;

    /// Returns the number of documents in the collection.
    fn count(&self, collection: &str) -> StoreResult<usize> {
        Ok(self.list(collection)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: Vec<(&str, Value)>) -> Document {
        Value::Map(
            pairs
                .into_iter()
                .map(|(key, value)| (Value::Text(key.to_string()), value))
                .collect(),
        )
    }

    #[test]
    fn field_lookup_finds_present_fields() {
        let document = doc(vec![
            ("owner_id", Value::Text("u1".into())),
            ("name", Value::Text("Trip".into())),
        ]);

        assert_eq!(field(&document, "owner_id"), Some(&Value::Text("u1".into())));
        assert_eq!(field(&document, "missing"), None);
    }

    #[test]
    fn field_lookup_on_non_map_is_none() {
        assert_eq!(field(&Value::Integer(3.into()), "anything"), None);
    }
}
