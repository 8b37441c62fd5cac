//! Differential album sync.
//!
//! Lets a client reconcile its local album cache with server state in one
//! round trip without re-downloading unchanged albums. Reconciliation is
//! last-writer-wins at whole-album granularity: a stale client copy is
//! replaced by the full server record, never merged field by field.

use crate::catalog::Catalog;
use crate::error::EngineResult;
use picsync_model::{AlbumDetails, AlbumId, ImageId, Timestamp};
use std::collections::BTreeMap;

/// What a client believes it has: album id → the `last_modified` value of
/// its cached copy. An empty mapping requests a full sync.
pub type ClientAlbumState = BTreeMap<AlbumId, Timestamp>;

/// Computes the minimal set of album changes a client must apply to reach
/// server state.
///
/// The result is the concatenation of:
///
/// 1. **Tombstones** — one per album the client knows but the server no
///    longer has, ordered by album id. A tombstone carries the album id
///    and the empty-owner sentinel; the client purges the album from its
///    cache.
/// 2. **Updates** — the full current record of every album that is new to
///    the client or whose server `last_modified` is newer than the
///    client's, ordered by album id. A client copy at least as new as the
///    server's is skipped; ties count as current.
///
/// Each update's `cover_image` is resolved to the contained image with the
/// earliest timestamp (ties broken by smallest file name), or left empty
/// for albums with no images.
pub fn sync_album_details(
    catalog: &Catalog,
    owner_id: &str,
    client_state: &ClientAlbumState,
) -> EngineResult<Vec<AlbumDetails>> {
    let server_albums = catalog.albums_owned_by(owner_id)?;

    // Deletion detection: client ids are iterated in order, so tombstones
    // come out sorted.
    let mut changes: Vec<AlbumDetails> = client_state
        .keys()
        .filter(|album_id| !server_albums.iter().any(|a| &a.album_id == *album_id))
        .map(|album_id| AlbumDetails::tombstone(album_id.clone()))
        .collect();

    // Update/skip decision over the server set, already ordered by album id.
    for mut album in server_albums {
        if let Some(&cached) = client_state.get(&album.album_id) {
            if cached >= album.last_modified {
                continue;
            }
        }
        album.cover_image = resolve_cover(catalog, &album.album_id)?;
        changes.push(album);
    }

    Ok(changes)
}

/// Picks the cover image for an album: earliest timestamp, then smallest
/// file name. Returns `None` for an album with no images.
fn resolve_cover(catalog: &Catalog, album_id: &str) -> EngineResult<Option<ImageId>> {
    Ok(catalog
        .images_in_album(album_id)?
        .into_iter()
        .min_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.file_name.cmp(&b.file_name))
        })
        .map(|image| image.file_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use picsync_model::{DateTimeRange, Image};
    use picsync_store::MemoryDocumentStore;
    use std::sync::Arc;

    fn catalog() -> Catalog {
        Catalog::new(Arc::new(MemoryDocumentStore::new()))
    }

    fn album(owner: &str, id: &str, last_modified: Timestamp) -> AlbumDetails {
        let mut album = AlbumDetails::new(owner, id, "x", DateTimeRange::new(0, 1));
        album.last_modified = last_modified;
        album
    }

    #[test]
    fn matching_cache_syncs_to_nothing() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();
        catalog.put_album(&album("u1", "a2", 200)).unwrap();

        let state = ClientAlbumState::from([("a1".into(), 100), ("a2".into(), 200)]);
        assert!(sync_album_details(&catalog, "u1", &state).unwrap().is_empty());
    }

    #[test]
    fn empty_mapping_is_a_full_sync() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a2", 200)).unwrap();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();

        let changes = sync_album_details(&catalog, "u1", &ClientAlbumState::new()).unwrap();
        let ids: Vec<&str> = changes.iter().map(|a| a.album_id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "a2"]);
        assert!(changes.iter().all(|a| !a.is_tombstone()));
    }

    #[test]
    fn unknown_client_album_becomes_a_tombstone() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();

        let state = ClientAlbumState::from([("a1".into(), 100), ("gone".into(), 50)]);
        let changes = sync_album_details(&catalog, "u1", &state).unwrap();

        assert_eq!(changes.len(), 1);
        assert!(changes[0].is_tombstone());
        assert_eq!(changes[0].album_id, "gone");
    }

    #[test]
    fn stale_cache_gets_the_full_record() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 300)).unwrap();

        let state = ClientAlbumState::from([("a1".into(), 100)]);
        let changes = sync_album_details(&catalog, "u1", &state).unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].album_id, "a1");
        assert_eq!(changes[0].last_modified, 300);
        assert!(!changes[0].is_tombstone());
    }

    #[test]
    fn newer_client_copy_is_skipped() {
        // A client ahead of the server (e.g. clock skew) is treated as
        // current; ties favor skipping too.
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();

        let state = ClientAlbumState::from([("a1".into(), 150)]);
        assert!(sync_album_details(&catalog, "u1", &state).unwrap().is_empty());
    }

    #[test]
    fn tombstones_precede_updates() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 300)).unwrap();

        let state = ClientAlbumState::from([("a1".into(), 100), ("zz-gone".into(), 50)]);
        let changes = sync_album_details(&catalog, "u1", &state).unwrap();

        assert_eq!(changes.len(), 2);
        assert!(changes[0].is_tombstone());
        assert_eq!(changes[0].album_id, "zz-gone");
        assert_eq!(changes[1].album_id, "a1");
    }

    #[test]
    fn cover_image_is_earliest_then_smallest_name() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();
        catalog
            .put_image(&Image::new("u1", "late.jpg", 900, "u1/late.jpg", "a1"))
            .unwrap();
        catalog
            .put_image(&Image::new("u1", "b.jpg", 5, "u1/b.jpg", "a1"))
            .unwrap();
        catalog
            .put_image(&Image::new("u1", "a.jpg", 5, "u1/a.jpg", "a1"))
            .unwrap();

        let changes = sync_album_details(&catalog, "u1", &ClientAlbumState::new()).unwrap();
        assert_eq!(changes[0].cover_image.as_deref(), Some("a.jpg"));
    }

    #[test]
    fn album_without_images_has_no_cover() {
        let catalog = catalog();
        catalog.put_album(&album("u1", "a1", 100)).unwrap();

        let changes = sync_album_details(&catalog, "u1", &ClientAlbumState::new()).unwrap();
        assert_eq!(changes[0].cover_image, None);
    }

    #[test]
    fn other_owners_albums_are_invisible() {
        let catalog = catalog();
        catalog.put_album(&album("u2", "b1", 100)).unwrap();

        assert!(sync_album_details(&catalog, "u1", &ClientAlbumState::new())
            .unwrap()
            .is_empty());
    }
}
