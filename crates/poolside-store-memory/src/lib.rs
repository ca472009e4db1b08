//! In-memory [`UserPoolStore`] implementation.
//!
//! This backend is suitable for:
//! - local development against the emulator
//! - automated test suites
//!
//! State lives entirely in process memory and is lost on shutdown. All
//! access goes through a single `RwLock`, so individual reads and writes
//! are atomic; there is no cross-call read-modify-write coordination —
//! concurrent saves of the same username are last-write-wins, matching
//! the storage contract.

use std::collections::HashMap;

use tokio::sync::RwLock;

use poolside_core::error::{StoreError, StoreResult};
use poolside_core::models::user::User;
use poolside_core::models::user_pool::{AppClient, UserPoolOptions};
use poolside_core::store::UserPoolStore;

struct PoolRecord {
    options: UserPoolOptions,
    users: HashMap<String, User>,
}

#[derive(Default)]
struct Inner {
    pools: HashMap<String, PoolRecord>,
    /// client id → registration; the registration carries the pool id.
    clients: HashMap<String, AppClient>,
}

#[derive(Default)]
pub struct MemoryUserPoolStore {
    inner: RwLock<Inner>,
}

impl MemoryUserPoolStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserPoolStore for MemoryUserPoolStore {
    async fn ensure_pool(&self, pool_id: &str) -> StoreResult<UserPoolOptions> {
        let mut inner = self.inner.write().await;
        let record = inner
            .pools
            .entry(pool_id.to_string())
            .or_insert_with(|| PoolRecord {
                options: UserPoolOptions::new(pool_id),
                users: HashMap::new(),
            });
        Ok(record.options.clone())
    }

    async fn get_pool(&self, pool_id: &str) -> StoreResult<Option<UserPoolOptions>> {
        let inner = self.inner.read().await;
        Ok(inner.pools.get(pool_id).map(|p| p.options.clone()))
    }

    async fn get_pool_for_client_id(&self, client_id: &str) -> StoreResult<Option<UserPoolOptions>> {
        let inner = self.inner.read().await;
        Ok(inner
            .clients
            .get(client_id)
            .and_then(|client| inner.pools.get(&client.user_pool_id))
            .map(|p| p.options.clone()))
    }

    async fn put_client(&self, client: AppClient) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if !inner.pools.contains_key(&client.user_pool_id) {
            return Err(StoreError::PoolNotFound {
                pool_id: client.user_pool_id,
            });
        }
        inner.clients.insert(client.client_id.clone(), client);
        Ok(())
    }

    async fn get_user(&self, pool_id: &str, username: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner
            .pools
            .get(pool_id)
            .and_then(|p| p.users.get(username))
            .cloned())
    }

    async fn put_user(&self, pool_id: &str, user: User) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        let record = inner
            .pools
            .get_mut(pool_id)
            .ok_or_else(|| StoreError::PoolNotFound {
                pool_id: pool_id.to_string(),
            })?;
        record.users.insert(user.username.clone(), user);
        Ok(())
    }

    async fn list_users(&self, pool_id: &str) -> StoreResult<Vec<User>> {
        let inner = self.inner.read().await;
        let record = inner
            .pools
            .get(pool_id)
            .ok_or_else(|| StoreError::PoolNotFound {
                pool_id: pool_id.to_string(),
            })?;
        Ok(record.users.values().cloned().collect())
    }
}
