//! Operation handlers.
//!
//! One handler per operation code, each owning an `Arc` of the shared
//! context. Handlers translate wire arguments into engine calls and engine
//! results into responses; the dispatcher maps their errors into statuses.

mod admin;
mod albums;
mod images;
mod users;

use crate::context::ServiceContext;
use crate::dispatch::Registry;
use picsync_engine::{EngineError, EngineResult};
use picsync_protocol::{OpCode, Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Registers every picsync operation on `registry`.
pub fn register_all(registry: &mut Registry, context: Arc<ServiceContext>) {
    registry.register(OpCode::UserAuth, Box::new(users::UserAuth));
    registry.register(
        OpCode::CheckUserExists,
        Box::new(users::CheckUserExists::new(context.clone())),
    );
    registry.register(
        OpCode::CreateAccount,
        Box::new(users::CreateAccount::new(context.clone())),
    );
    registry.register(
        OpCode::DeleteAccount,
        Box::new(users::DeleteAccount::new(context.clone())),
    );
    registry.register(
        OpCode::CreateAlbum,
        Box::new(albums::CreateAlbum::new(context.clone())),
    );
    registry.register(
        OpCode::SyncAlbumDetails,
        Box::new(albums::SyncAlbumDetails::new(context.clone())),
    );
    registry.register(
        OpCode::GetAlbumContents,
        Box::new(albums::GetAlbumContents::new(context.clone())),
    );
    registry.register(
        OpCode::UpdateAlbum,
        Box::new(albums::UpdateAlbum::new(context.clone())),
    );
    registry.register(
        OpCode::AddToAlbum,
        Box::new(images::AddToAlbum::new(context.clone())),
    );
    registry.register(
        OpCode::RemoveFromAlbum,
        Box::new(images::RemoveFromAlbum::new(context.clone())),
    );
    registry.register(
        OpCode::DeleteAlbum,
        Box::new(albums::DeleteAlbum::new(context.clone())),
    );
    registry.register(
        OpCode::GenerateStatistics,
        Box::new(admin::GenerateStatistics::new(context.clone())),
    );
    registry.register(OpCode::GetUsers, Box::new(admin::GetUsers::new(context)));
}

/// Returns the user id the gate attached.
///
/// A request reaching a handler without one is a pipeline bug, surfaced as
/// an internal error rather than a panic.
pub(crate) fn authed_user(request: &Request) -> EngineResult<&str> {
    request
        .user_id()
        .ok_or_else(|| EngineError::internal("request reached a handler without authentication"))
}

/// Deserializes the request arguments; failures are client mistakes.
pub(crate) fn parse_args<T: DeserializeOwned>(request: &Request) -> EngineResult<T> {
    request
        .args_as()
        .map_err(|e| EngineError::invalid_argument(e.to_string()))
}

/// Deserializes the payload items; failures are client mistakes.
pub(crate) fn parse_payload<T: DeserializeOwned>(request: &Request) -> EngineResult<Vec<T>> {
    request
        .payload_as()
        .map_err(|e| EngineError::invalid_argument(e.to_string()))
}

/// Builds an `Ok` response with a payload.
pub(crate) fn ok<T: Serialize>(payload: &T) -> EngineResult<Response> {
    Response::with_payload(StatusCode::Ok, payload)
        .map_err(|e| EngineError::internal(e.to_string()))
}

/// Builds a `Created` response with a payload.
pub(crate) fn created<T: Serialize>(payload: &T) -> EngineResult<Response> {
    Response::with_payload(StatusCode::Created, payload)
        .map_err(|e| EngineError::internal(e.to_string()))
}
