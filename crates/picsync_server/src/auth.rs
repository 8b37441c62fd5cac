//! Authentication gate.

use picsync_protocol::{Request, Response, StatusCode};
use picsync_store::IdentityProvider;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a request's opaque credential token into a trusted user id
/// before any other processing.
///
/// The gate runs unconditionally for every operation. Verification failure
/// kinds (malformed, bad signature, expired, revoked) are logged but all
/// surface to the client as the same `Unauthorized` status, so validation
/// internals never leak.
pub struct AuthGate {
    identity: Arc<dyn IdentityProvider>,
}

impl AuthGate {
    /// Creates a gate over an identity provider.
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Verifies the request's token.
    ///
    /// On success the trusted user id is attached to the request — any id
    /// the request might have carried before is irrelevant, since ids never
    /// cross the wire. On failure the terminal `Unauthorized` response is
    /// returned instead.
    pub fn authenticate(&self, mut request: Request) -> Result<Request, Response> {
        match self.identity.verify(request.token()) {
            Ok(user_id) => {
                debug!(%user_id, op = request.op(), "request authenticated");
                request.authenticate(user_id);
                Ok(request)
            }
            Err(error) => {
                warn!(kind = %error, "credential verification failed");
                Err(Response::from_status(StatusCode::Unauthorized))
            }
        }
    }
}
