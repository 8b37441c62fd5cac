//! Account operations.

use super::{authed_user, ok, parse_args};
use crate::context::ServiceContext;
use crate::dispatch::Handler;
use picsync_engine::EngineResult;
use picsync_protocol::{Request, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;

/// Probes the validity of a credential token.
///
/// The gate already ran by the time any handler does, so succeeding at all
/// proves the token; the response carries the resolved user id.
pub struct UserAuth;

impl Handler for UserAuth {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        ok(&user_id)
    }
}

/// Reports whether the account exists and at which privilege level.
pub struct CheckUserExists {
    context: Arc<ServiceContext>,
}

impl CheckUserExists {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for CheckUserExists {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        // -1 signals an unregistered account; otherwise the privilege level.
        let level = match self.context.accounts.privilege_of(user_id)? {
            Some(privilege) => privilege.level(),
            None => -1,
        };
        ok(&level)
    }
}

#[derive(Debug, Default, Deserialize)]
struct CreateAccountArgs {
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: String,
}

/// Registers an account for the authenticated user.
pub struct CreateAccount {
    context: Arc<ServiceContext>,
}

impl CreateAccount {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for CreateAccount {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        // Profile fields are optional; a bare request registers an empty
        // profile.
        let args: CreateAccountArgs = parse_args(request).unwrap_or_default();
        self.context
            .accounts
            .create_account(user_id, &args.email, &args.display_name)?;
        Ok(Response::from_status(StatusCode::Created))
    }
}

/// Deletes the authenticated user's account and everything it owns.
pub struct DeleteAccount {
    context: Arc<ServiceContext>,
}

impl DeleteAccount {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for DeleteAccount {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        self.context.accounts.delete_account(user_id)?;
        Ok(Response::from_status(StatusCode::Ok))
    }
}
