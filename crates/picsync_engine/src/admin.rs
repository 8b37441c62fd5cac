//! Admin reporting.

use crate::catalog::Catalog;
use crate::error::{EngineError, EngineResult};
use picsync_model::{Privilege, UserId};
use serde::{Deserialize, Serialize};

/// Collection counts reported to admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Registered accounts.
    pub users: usize,
    /// Albums.
    pub albums: usize,
    /// Images.
    pub images: usize,
}

/// One account as reported to admins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    /// User id.
    pub uid: UserId,
    /// Contact address.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Privilege level.
    pub privilege: Privilege,
}

/// Admin-only reporting over the catalog.
#[derive(Clone)]
pub struct AdminService {
    catalog: Catalog,
}

impl AdminService {
    /// Creates an admin service over the catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Returns collection counts. The caller must hold Admin privilege.
    pub fn generate_statistics(&self, user_id: &str) -> EngineResult<Statistics> {
        self.require_admin(user_id)?;
        Ok(Statistics {
            users: self.catalog.count_users()?,
            albums: self.catalog.count_albums()?,
            images: self.catalog.count_images()?,
        })
    }

    /// Returns every registered account. The caller must hold Admin
    /// privilege.
    pub fn list_users(&self, user_id: &str) -> EngineResult<Vec<UserInfo>> {
        self.require_admin(user_id)?;
        Ok(self
            .catalog
            .list_users()?
            .into_iter()
            .map(|(uid, record)| UserInfo {
                uid,
                email: record.email,
                display_name: record.display_name,
                privilege: record.privilege,
            })
            .collect())
    }

    fn require_admin(&self, user_id: &str) -> EngineResult<()> {
        match self.catalog.user(user_id)? {
            None => Err(EngineError::UserNotFound(user_id.to_string())),
            Some(record) if record.privilege != Privilege::Admin => Err(
                EngineError::permission_denied(format!("user {user_id} is not an admin")),
            ),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use picsync_model::{AlbumDetails, DateTimeRange, Image, UserRecord};
    use picsync_store::MemoryDocumentStore;
    use std::sync::Arc;

    fn service() -> (Catalog, AdminService) {
        let catalog = Catalog::new(Arc::new(MemoryDocumentStore::new()));
        (catalog.clone(), AdminService::new(catalog))
    }

    fn seed_admin(catalog: &Catalog, uid: &str) {
        let mut record = UserRecord::new("root@example.com", "Root");
        record.privilege = Privilege::Admin;
        catalog.put_user(uid, &record).unwrap();
    }

    #[test]
    fn statistics_count_collections() {
        let (catalog, service) = service();
        seed_admin(&catalog, "root");
        catalog.put_user("u1", &UserRecord::new("", "")).unwrap();
        catalog
            .put_album(&AlbumDetails::new("u1", "a1", "x", DateTimeRange::new(0, 1)))
            .unwrap();
        catalog
            .put_image(&Image::new("u1", "i1.jpg", 1, "u1/i1.jpg", "a1"))
            .unwrap();

        let stats = service.generate_statistics("root").unwrap();
        assert_eq!(
            stats,
            Statistics {
                users: 2,
                albums: 1,
                images: 1
            }
        );
    }

    #[test]
    fn regular_users_are_denied() {
        let (catalog, service) = service();
        catalog.put_user("u1", &UserRecord::new("", "")).unwrap();

        assert!(matches!(
            service.generate_statistics("u1"),
            Err(EngineError::PermissionDenied(_))
        ));
        assert!(matches!(
            service.list_users("u1"),
            Err(EngineError::PermissionDenied(_))
        ));
    }

    #[test]
    fn unregistered_callers_are_not_found() {
        let (_, service) = service();
        assert!(matches!(
            service.generate_statistics("ghost"),
            Err(EngineError::UserNotFound(_))
        ));
    }

    #[test]
    fn user_listing_includes_profiles() {
        let (catalog, service) = service();
        seed_admin(&catalog, "root");
        catalog
            .put_user("u1", &UserRecord::new("a@example.com", "Ada"))
            .unwrap();

        let users = service.list_users("root").unwrap();
        assert_eq!(users.len(), 2);
        let ada = users.iter().find(|u| u.uid == "u1").unwrap();
        assert_eq!(ada.email, "a@example.com");
        assert_eq!(ada.display_name, "Ada");
        assert_eq!(ada.privilege, Privilege::User);
    }
}
