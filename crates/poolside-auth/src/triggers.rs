//! Lifecycle trigger contract.
//!
//! Deployments can register hooks that run at defined lifecycle points.
//! The engine only needs to ask whether a hook is registered and to
//! invoke it; the execution runtime behind the hook is out of scope.

use std::collections::HashMap;

use poolside_core::models::user::UserAttribute;
use thiserror::Error;

/// The lifecycle points the engine can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    PostAuthentication,
}

/// Payload for the `PostAuthentication` hook.
#[derive(Debug, Clone)]
pub struct PostAuthenticationEvent {
    pub client_id: String,
    pub client_metadata: Option<HashMap<String, String>>,
    /// Fixed source tag identifying the flow that fired the hook.
    pub source: &'static str,
    pub user_attributes: Vec<UserAttribute>,
    pub username: String,
    pub user_pool_id: String,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TriggerError(pub String);

/// Trigger invoker boundary.
///
/// Invocations are awaited by the owning operation, so a failing hook
/// fails the operation; retry policy, if any, lives behind this trait.
pub trait Triggers: Send + Sync {
    fn enabled(&self, kind: TriggerKind) -> bool;

    fn post_authentication(
        &self,
        event: PostAuthenticationEvent,
    ) -> impl Future<Output = Result<(), TriggerError>> + Send;
}

/// No hooks registered.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTriggers;

impl Triggers for NoTriggers {
    fn enabled(&self, _kind: TriggerKind) -> bool {
        false
    }

    async fn post_authentication(
        &self,
        _event: PostAuthenticationEvent,
    ) -> Result<(), TriggerError> {
        Ok(())
    }
}
