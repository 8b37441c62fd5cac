//! Admin operations.

use super::{authed_user, ok};
use crate::context::ServiceContext;
use crate::dispatch::Handler;
use picsync_engine::EngineResult;
use picsync_protocol::{Request, Response};
use std::sync::Arc;

/// Reports user/album/image counts to an admin.
pub struct GenerateStatistics {
    context: Arc<ServiceContext>,
}

impl GenerateStatistics {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for GenerateStatistics {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let statistics = self.context.admin.generate_statistics(user_id)?;
        ok(&statistics)
    }
}

/// Lists every registered account to an admin.
pub struct GetUsers {
    context: Arc<ServiceContext>,
}

impl GetUsers {
    /// Creates the handler.
    pub fn new(context: Arc<ServiceContext>) -> Self {
        Self { context }
    }
}

impl Handler for GetUsers {
    fn handle(&self, request: &Request) -> EngineResult<Response> {
        let user_id = authed_user(request)?;
        let users = self.context.admin.list_users(user_id)?;
        ok(&users)
    }
}
