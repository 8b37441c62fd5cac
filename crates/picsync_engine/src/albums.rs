//! Album creation and metadata updates.

use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult};
use picsync_model::{AlbumDetails, AlbumId, DateTimeRange, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;
use uuid::Uuid;

/// Fields a client supplies when creating an album.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAlbum {
    /// Display name.
    pub name: String,
    /// Time span the album covers.
    pub date_range: DateTimeRange,
    /// Whether the album starts out built.
    #[serde(default)]
    pub is_built: bool,
    /// Category tags.
    #[serde(default)]
    pub tags: BTreeSet<i32>,
    /// Users other than the owner permitted to view the album.
    #[serde(default)]
    pub permitted_users: BTreeSet<UserId>,
}

/// Fields a client may change on an existing album. Absent fields are left
/// as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlbumUpdate {
    /// New display name.
    #[serde(default)]
    pub name: Option<String>,
    /// New time span.
    #[serde(default)]
    pub date_range: Option<DateTimeRange>,
    /// New built flag.
    #[serde(default)]
    pub is_built: Option<bool>,
    /// New tag set.
    #[serde(default)]
    pub tags: Option<BTreeSet<i32>>,
    /// New permitted-user set.
    #[serde(default)]
    pub permitted_users: Option<BTreeSet<UserId>>,
}

/// Creates albums and applies metadata updates.
#[derive(Clone)]
pub struct AlbumService {
    catalog: Catalog,
}

impl AlbumService {
    /// Creates an album service over the catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Creates an album owned by `owner_id` and returns its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UserNotFound`] if the owner has no account.
    pub fn create_album(&self, owner_id: &str, new_album: NewAlbum) -> EngineResult<AlbumId> {
        if !self.catalog.user_exists(owner_id)? {
            return Err(EngineError::UserNotFound(owner_id.to_string()));
        }

        let album_id = Uuid::new_v4().to_string();
        let mut album =
            AlbumDetails::new(owner_id, album_id.clone(), new_album.name, new_album.date_range);
        album.is_built = new_album.is_built;
        album.tags = new_album.tags;
        album.permitted_users = new_album.permitted_users;
        self.catalog.put_album(&album)?;

        debug!(owner_id, %album_id, "album created");
        Ok(album_id)
    }

    /// Applies a metadata update to an album the caller owns.
    ///
    /// Advances `last_modified` so clients pick the change up on their next
    /// sync.
    pub fn update_album(
        &self,
        user_id: &str,
        album_id: &str,
        update: AlbumUpdate,
    ) -> EngineResult<()> {
        let mut album = self
            .catalog
            .album(album_id)?
            .ok_or_else(|| EngineError::AlbumNotFound(album_id.to_string()))?;
        if album.owner_id != user_id {
            return Err(EngineError::permission_denied(format!(
                "user {user_id} does not own album {album_id}"
            )));
        }

        if let Some(name) = update.name {
            album.name = name;
        }
        if let Some(date_range) = update.date_range {
            album.date_range = date_range;
        }
        if let Some(is_built) = update.is_built {
            album.is_built = is_built;
        }
        if let Some(tags) = update.tags {
            album.tags = tags;
        }
        if let Some(permitted_users) = update.permitted_users {
            album.permitted_users = permitted_users;
        }
        album.touch();
        self.catalog.put_album(&album)
    }
}
