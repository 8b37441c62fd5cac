//! Album records.

use crate::time::{bump_last_modified, now_millis, Timestamp};
use crate::{AlbumId, ImageId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An inclusive time span covered by an album.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTimeRange {
    /// Start of the range, Unix milliseconds.
    pub start: Timestamp,
    /// End of the range, Unix milliseconds.
    pub end: Timestamp,
}

impl DateTimeRange {
    /// Creates a new range.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }
}

/// Server-authoritative album record.
///
/// Sync compares `last_modified`, not content, to decide staleness, so any
/// mutation that changes the album (metadata edits, image linking and
/// unlinking) must go through [`AlbumDetails::touch`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetails {
    /// Owner of the album. Immutable once set.
    ///
    /// The empty string is reserved as the tombstone sentinel; real owners
    /// always have a non-empty id.
    pub owner_id: UserId,
    /// Identity key of the album.
    pub album_id: AlbumId,
    /// Display name.
    pub name: String,
    /// Time span the album covers.
    pub date_range: DateTimeRange,
    /// Last modification time, monotonically non-decreasing.
    pub last_modified: Timestamp,
    /// Whether the album has been built into its final presentation form.
    #[serde(default)]
    pub is_built: bool,
    /// Category tags.
    #[serde(default)]
    pub tags: BTreeSet<i32>,
    /// Users other than the owner permitted to view the album.
    #[serde(default)]
    pub permitted_users: BTreeSet<UserId>,
    /// Id of the image shown as the album cover, if the album has any images.
    #[serde(default)]
    pub cover_image: Option<ImageId>,
}

impl AlbumDetails {
    /// Creates a new album owned by `owner_id`, stamped with the current time.
    pub fn new(
        owner_id: impl Into<UserId>,
        album_id: impl Into<AlbumId>,
        name: impl Into<String>,
        date_range: DateTimeRange,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            album_id: album_id.into(),
            name: name.into(),
            date_range,
            last_modified: now_millis(),
            is_built: false,
            tags: BTreeSet::new(),
            permitted_users: BTreeSet::new(),
            cover_image: None,
        }
    }

    /// Creates a deletion marker for `album_id`.
    ///
    /// The empty `owner_id` is the signal a client uses to purge the album
    /// from its cache; no other field carries meaning.
    pub fn tombstone(album_id: impl Into<AlbumId>) -> Self {
        Self {
            owner_id: UserId::new(),
            album_id: album_id.into(),
            name: String::new(),
            date_range: DateTimeRange::new(0, 0),
            last_modified: 0,
            is_built: false,
            tags: BTreeSet::new(),
            permitted_users: BTreeSet::new(),
            cover_image: None,
        }
    }

    /// Returns true if this record is a deletion marker.
    pub fn is_tombstone(&self) -> bool {
        self.owner_id.is_empty()
    }

    /// Advances `last_modified` past its current value.
    pub fn touch(&mut self) {
        self.last_modified = bump_last_modified(self.last_modified);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_album_is_not_a_tombstone() {
        let album = AlbumDetails::new("u1", "a1", "Trip", DateTimeRange::new(0, 10));
        assert!(!album.is_tombstone());
        assert!(album.last_modified > 0);
    }

    #[test]
    fn tombstone_carries_only_the_album_id() {
        let marker = AlbumDetails::tombstone("a1");
        assert!(marker.is_tombstone());
        assert_eq!(marker.album_id, "a1");
        assert!(marker.name.is_empty());
        assert!(marker.cover_image.is_none());
    }

    #[test]
    fn touch_is_monotonic() {
        let mut album = AlbumDetails::new("u1", "a1", "Trip", DateTimeRange::new(0, 10));
        let before = album.last_modified;
        album.touch();
        let first = album.last_modified;
        album.touch();
        assert!(first > before);
        assert!(album.last_modified > first);
    }
}
