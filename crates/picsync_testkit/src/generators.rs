//! Property-based test generators using proptest.

use picsync_model::{AlbumDetails, DateTimeRange, GeoPoint, Image};
use proptest::prelude::*;

/// Strategy for user ids.
pub fn user_id_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{4,28}"
}

/// Strategy for album ids.
pub fn album_id_strategy() -> impl Strategy<Value = String> {
    "[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}"
}

/// Strategy for image file names.
pub fn file_name_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,24}\\.(jpg|png|heic)"
}

/// Strategy for capture/modification timestamps.
pub fn timestamp_strategy() -> impl Strategy<Value = i64> {
    0i64..4_102_444_800_000
}

/// Strategy for whole album records with a fixed owner.
pub fn album_strategy(owner: &str) -> impl Strategy<Value = AlbumDetails> {
    let owner = owner.to_string();
    (
        album_id_strategy(),
        "[A-Za-z ]{1,32}",
        timestamp_strategy(),
        timestamp_strategy(),
        any::<bool>(),
        prop::collection::btree_set(0i32..32, 0..4),
    )
        .prop_map(move |(album_id, name, start, last_modified, is_built, tags)| {
            let mut album =
                AlbumDetails::new(owner.clone(), album_id, name, DateTimeRange::new(start, start));
            album.last_modified = last_modified;
            album.is_built = is_built;
            album.tags = tags;
            album
        })
}

/// Strategy for whole image records with a fixed owner and containing album.
pub fn image_strategy(owner: &str, album_id: &str) -> impl Strategy<Value = Image> {
    let owner = owner.to_string();
    let album_id = album_id.to_string();
    (
        file_name_strategy(),
        timestamp_strategy(),
        prop::option::of((-90.0f64..90.0, -180.0f64..180.0)),
        prop::option::of(0i32..16),
    )
        .prop_map(move |(file_name, timestamp, location, tag)| {
            let url = format!("{owner}/{file_name}");
            let mut image = Image::new(owner.clone(), file_name, timestamp, url, album_id.clone());
            image.location = location.map(|(lat, lon)| GeoPoint { lat, lon });
            image.tag = tag;
            image
        })
}
