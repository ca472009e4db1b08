//! Storage trait the auth engine depends on.
//!
//! All operations are async. User operations are **scoped by pool id**;
//! the store itself knows nothing about status transitions or
//! timestamps — that is [`crate::service::UserPoolService`]'s job.

use crate::error::StoreResult;
use crate::models::user::User;
use crate::models::user_pool::{AppClient, UserPoolOptions};

pub trait UserPoolStore: Send + Sync {
    /// Fetch a pool's options, creating the pool with defaults if it does
    /// not exist yet.
    fn ensure_pool(
        &self,
        pool_id: &str,
    ) -> impl Future<Output = StoreResult<UserPoolOptions>> + Send;

    /// Fetch a pool's options. `None` if the pool does not exist.
    fn get_pool(&self, pool_id: &str)
    -> impl Future<Output = StoreResult<Option<UserPoolOptions>>> + Send;

    /// Resolve the pool a client id is registered against. `None` if the
    /// client id is unknown.
    fn get_pool_for_client_id(
        &self,
        client_id: &str,
    ) -> impl Future<Output = StoreResult<Option<UserPoolOptions>>> + Send;

    /// Register a client against its pool. Fails with
    /// [`crate::StoreError::PoolNotFound`] if the pool does not exist.
    fn put_client(&self, client: AppClient) -> impl Future<Output = StoreResult<()>> + Send;

    /// Look up a user by username. `None` is a normal outcome, for both an
    /// unknown username and an unknown pool.
    fn get_user(
        &self,
        pool_id: &str,
        username: &str,
    ) -> impl Future<Output = StoreResult<Option<User>>> + Send;

    /// Write a user record, inserting or replacing it wholesale.
    ///
    /// Concurrent writes to the same username are not ordered by this
    /// layer: last write wins, with no optimistic-concurrency check. This
    /// is a documented property of the emulator, not a gap to close.
    fn put_user(&self, pool_id: &str, user: User)
    -> impl Future<Output = StoreResult<()>> + Send;

    /// All users in a pool. Iteration order is not part of the contract;
    /// callers sort or filter explicitly.
    fn list_users(&self, pool_id: &str) -> impl Future<Output = StoreResult<Vec<User>>> + Send;
}
