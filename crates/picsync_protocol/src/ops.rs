//! Operation codes.

/// The operations a picsync server handles.
///
/// Codes are stable wire identifiers and must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum OpCode {
    /// Probe the validity of a credential token.
    UserAuth = 0,
    /// Check whether an account exists and report its privilege level.
    CheckUserExists = 1,
    /// Register a new account.
    CreateAccount = 2,
    /// Delete an account and all data it owns.
    DeleteAccount = 3,
    /// Create a new album.
    CreateAlbum = 4,
    /// Differential sync of album details against a client cache.
    SyncAlbumDetails = 5,
    /// List the images contained in an album.
    GetAlbumContents = 6,
    /// Update album metadata.
    UpdateAlbum = 7,
    /// Upload and/or link images into an album.
    AddToAlbum = 8,
    /// Unlink images from an album, deleting any that become orphaned.
    RemoveFromAlbum = 9,
    /// Delete an album, cascading to image unlinking.
    DeleteAlbum = 10,
    /// Report user/album/image counts (admin only).
    GenerateStatistics = 11,
    /// List all registered accounts (admin only).
    GetUsers = 12,
}

impl OpCode {
    /// All operations, in code order.
    pub const ALL: [OpCode; 13] = [
        OpCode::UserAuth,
        OpCode::CheckUserExists,
        OpCode::CreateAccount,
        OpCode::DeleteAccount,
        OpCode::CreateAlbum,
        OpCode::SyncAlbumDetails,
        OpCode::GetAlbumContents,
        OpCode::UpdateAlbum,
        OpCode::AddToAlbum,
        OpCode::RemoveFromAlbum,
        OpCode::DeleteAlbum,
        OpCode::GenerateStatistics,
        OpCode::GetUsers,
    ];

    /// Returns the wire code of this operation.
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// Returns the operation for a wire code, if one is defined.
    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.code() == code)
    }
}
