//! User account records.

use serde::{Deserialize, Serialize};

/// Privilege level of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Privilege {
    /// May view statistics and other users' account data.
    Admin,
    /// May manage only their own albums and images.
    User,
}

impl Privilege {
    /// Wire representation of the privilege level.
    pub const fn level(self) -> i64 {
        match self {
            Privilege::Admin => 0,
            Privilege::User => 1,
        }
    }
}

impl From<Privilege> for u8 {
    fn from(privilege: Privilege) -> Self {
        privilege.level() as u8
    }
}

impl TryFrom<u8> for Privilege {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Privilege::Admin),
            1 => Ok(Privilege::User),
            other => Err(format!("unknown privilege level: {other}")),
        }
    }
}

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Contact address, if the client supplied one at registration.
    #[serde(default)]
    pub email: String,
    /// Display name, if the client supplied one at registration.
    #[serde(default)]
    pub display_name: String,
    /// Privilege level.
    pub privilege: Privilege,
}

impl UserRecord {
    /// Creates a regular (non-admin) account record.
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            privilege: Privilege::User,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privilege_levels_are_stable() {
        assert_eq!(Privilege::Admin.level(), 0);
        assert_eq!(Privilege::User.level(), 1);
    }

    #[test]
    fn privilege_round_trips_through_u8() {
        assert_eq!(Privilege::try_from(u8::from(Privilege::Admin)), Ok(Privilege::Admin));
        assert_eq!(Privilege::try_from(u8::from(Privilege::User)), Ok(Privilege::User));
        assert!(Privilege::try_from(7).is_err());
    }

    #[test]
    fn new_accounts_are_regular_users() {
        let record = UserRecord::new("a@example.com", "Ada");
        assert_eq!(record.privilege, Privilege::User);
    }
}
