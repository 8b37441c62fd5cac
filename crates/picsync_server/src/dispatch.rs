//! Request dispatch.

use crate::context::ServiceContext;
use crate::handlers;
use picsync_engine::{EngineError, EngineResult};
use picsync_protocol::{OpCode, Request, Response, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// An operation handler.
///
/// Handlers are self-contained: each performs its own collaborator calls
/// and returns either a complete response or a recognized domain error for
/// the dispatcher to map into a status code.
pub trait Handler: Send + Sync {
    /// Handles an authenticated request.
    fn handle(&self, request: &Request) -> EngineResult<Response>;
}

/// Maps each operation code to exactly one handler.
///
/// Built during startup and immutable afterwards; there is no ambient
/// global registration.
#[derive(Default)]
pub struct Registry {
    handlers: HashMap<u16, Box<dyn Handler>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every picsync operation registered.
    pub fn with_default_handlers(context: Arc<ServiceContext>) -> Self {
        let mut registry = Self::new();
        handlers::register_all(&mut registry, context);
        registry
    }

    /// Registers `handler` for `op`, replacing any previous registration.
    pub fn register(&mut self, op: OpCode, handler: Box<dyn Handler>) {
        self.handlers.insert(op.code(), handler);
    }

    /// Returns the number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn get(&self, op: u16) -> Option<&dyn Handler> {
        self.handlers.get(&op).map(|handler| handler.as_ref())
    }
}

/// Routes authenticated requests to their registered handler and maps
/// domain failures into status codes at this boundary.
pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    /// Creates a dispatcher over a populated registry.
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Dispatches one request and always produces a response.
    ///
    /// A missing handler indicates a protocol/version mismatch between
    /// client and server, not a client mistake, and answers
    /// `InternalError`. Error responses carry no payload.
    pub fn dispatch(&self, request: &Request) -> Response {
        let Some(handler) = self.registry.get(request.op()) else {
            error!(op = request.op(), "no handler registered for operation");
            return Response::from_status(StatusCode::InternalError);
        };

        match handler.handle(request) {
            Ok(response) => {
                debug!(op = request.op(), status = response.status(), "request handled");
                response
            }
            Err(err) => {
                let status = status_for(&err);
                warn!(op = request.op(), status = status.code(), %err, "request failed");
                Response::from_status(status)
            }
        }
    }
}

/// Maps a recognized domain failure to its response status.
pub(crate) fn status_for(error: &EngineError) -> StatusCode {
    match error {
        EngineError::UserNotFound(_)
        | EngineError::AlbumNotFound(_)
        | EngineError::ImageNotFound(_) => StatusCode::NotFound,
        EngineError::PermissionDenied(_) => StatusCode::Forbidden,
        EngineError::InvalidArgument(_) => StatusCode::BadRequest,
        EngineError::Codec(_) | EngineError::Store(_) | EngineError::Internal(_) => {
            StatusCode::InternalError
        }
    }
}
