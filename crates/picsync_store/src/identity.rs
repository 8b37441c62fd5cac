//! Identity provider interface and the HMAC token implementation.
//!
//! ## Token format
//!
//! Tokens issued by [`HmacIdentityProvider`] are composed of:
//! - 2 bytes: user id length (big-endian)
//! - N bytes: user id (UTF-8)
//! - 8 bytes: issue timestamp (Unix millis, big-endian)
//! - 32 bytes: HMAC-SHA256 signature over the preceding bytes
//!
//! The whole token is base64-encoded for transport.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use parking_lot::RwLock;
use picsync_model::{now_millis, UserId};
use sha2::Sha256;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_LEN: usize = 32;

/// Reasons a credential token can fail verification.
///
/// The distinctions exist for logging; clients are always answered with the
/// same `Unauthorized` status regardless of the kind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The token is not structurally valid.
    #[error("malformed credential token")]
    Malformed,

    /// The token signature does not verify.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token is past its validity window.
    #[error("credential token expired")]
    Expired,

    /// The token's account has been revoked.
    #[error("credential token revoked")]
    Revoked,
}

/// Verifies opaque client credentials into a trusted user id.
pub trait IdentityProvider: Send + Sync {
    /// Verifies `token` and returns the user id it identifies.
    fn verify(&self, token: &str) -> Result<UserId, IdentityError>;
}

/// An identity provider backed by HMAC-SHA256 tokens.
///
/// Suitable for tests and single-tenant deployments; a production
/// deployment would typically delegate to a hosted identity service behind
/// the same trait.
pub struct HmacIdentityProvider {
    secret: Vec<u8>,
    token_expiry: Duration,
    revoked: RwLock<HashSet<UserId>>,
}

impl HmacIdentityProvider {
    /// Creates a provider with a 24-hour token validity window.
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            token_expiry: Duration::from_secs(24 * 60 * 60),
            revoked: RwLock::new(HashSet::new()),
        }
    }

    /// Sets the token validity window.
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.token_expiry = expiry;
        self
    }

    /// Issues a token for `user_id`, stamped with the current time.
    pub fn issue(&self, user_id: &str) -> String {
        let id_bytes = user_id.as_bytes();
        let mut data = Vec::with_capacity(2 + id_bytes.len() + 8);
        data.extend_from_slice(&(id_bytes.len() as u16).to_be_bytes());
        data.extend_from_slice(id_bytes);
        data.extend_from_slice(&(now_millis() as u64).to_be_bytes());

        let signature = self.sign(&data);
        data.extend_from_slice(&signature);
        BASE64.encode(data)
    }

    /// Revokes every outstanding token for `user_id`.
    pub fn revoke(&self, user_id: &str) {
        self.revoked.write().insert(user_id.to_string());
    }

    fn sign(&self, data: &[u8]) -> [u8; SIGNATURE_LEN] {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size");
        mac.update(data);
        mac.finalize().into_bytes().into()
    }
}

impl IdentityProvider for HmacIdentityProvider {
    fn verify(&self, token: &str) -> Result<UserId, IdentityError> {
        let raw = BASE64.decode(token).map_err(|_| IdentityError::Malformed)?;
        if raw.len() < 2 + 8 + SIGNATURE_LEN {
            return Err(IdentityError::Malformed);
        }

        let id_len = u16::from_be_bytes([raw[0], raw[1]]) as usize;
        let signed_len = 2 + id_len + 8;
        if raw.len() != signed_len + SIGNATURE_LEN {
            return Err(IdentityError::Malformed);
        }

        let user_id = std::str::from_utf8(&raw[2..2 + id_len])
            .map_err(|_| IdentityError::Malformed)?
            .to_string();
        if user_id.is_empty() {
            return Err(IdentityError::Malformed);
        }

        let expected = self.sign(&raw[..signed_len]);
        if raw[signed_len..] != expected[..] {
            return Err(IdentityError::InvalidSignature);
        }

        let issued_at = u64::from_be_bytes(
            raw[2 + id_len..signed_len]
                .try_into()
                .map_err(|_| IdentityError::Malformed)?,
        );
        let now = now_millis() as u64;
        if now > issued_at + self.token_expiry.as_millis() as u64 {
            return Err(IdentityError::Expired);
        }

        if self.revoked.read().contains(&user_id) {
            return Err(IdentityError::Revoked);
        }

        Ok(user_id)
    }
}
