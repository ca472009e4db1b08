//! Pool-scoped persistence service.
//!
//! [`UserPoolService`] is the single point through which user records are
//! mutated. It owns timestamping: callers construct a modified copy of a
//! record and hand it over; the service stamps `last_modified_date` from
//! the injected [`Clock`] as part of the save. Callers must not assume
//! the record they passed in is the exact record persisted.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::clock::Clock;
use crate::error::{StoreError, StoreResult};
use crate::models::user::{CreateUser, User, UserAttribute};
use crate::models::user_pool::UserPoolOptions;
use crate::store::UserPoolStore;

/// Data/service layer for one user pool.
///
/// Generic over the storage backend and clock so the engine stays free of
/// any concrete persistence choice.
pub struct UserPoolService<S, C> {
    store: Arc<S>,
    clock: Arc<C>,
    options: UserPoolOptions,
}

impl<S: UserPoolStore, C: Clock> UserPoolService<S, C> {
    pub fn new(store: Arc<S>, clock: Arc<C>, options: UserPoolOptions) -> Self {
        Self {
            store,
            clock,
            options,
        }
    }

    pub fn options(&self) -> &UserPoolOptions {
        &self.options
    }

    pub async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.store.get_user(&self.options.id, username).await
    }

    /// Persist a user record, stamping `last_modified_date` from the
    /// clock. Returns the record as persisted.
    pub async fn save_user(&self, user: User) -> StoreResult<User> {
        let mut user = user;
        user.last_modified_date = self.clock.now();
        debug!(
            pool_id = %self.options.id,
            username = %user.username,
            status = user.status.as_str(),
            "saving user"
        );
        self.store.put_user(&self.options.id, user.clone()).await?;
        Ok(user)
    }

    /// Create a new user record.
    ///
    /// Assigns a `sub` attribute (UUID v4) when the caller did not supply
    /// one, and stamps both timestamps. Rejects a username that already
    /// exists in the pool.
    pub async fn create_user(&self, input: CreateUser) -> StoreResult<User> {
        if self.get_user_by_username(&input.username).await?.is_some() {
            return Err(StoreError::UserExists {
                username: input.username,
            });
        }

        let mut attributes = input.attributes;
        if !attributes.iter().any(|a| a.name == "sub") {
            attributes.insert(0, UserAttribute::new("sub", Uuid::new_v4().to_string()));
        }

        let now = self.clock.now();
        let user = User {
            username: input.username,
            attributes,
            password: input.password,
            status: input.status,
            confirmation_code: None,
            mfa_code: None,
            enabled: input.enabled,
            create_date: now,
            last_modified_date: now,
        };

        debug!(
            pool_id = %self.options.id,
            username = %user.username,
            "creating user"
        );
        self.store.put_user(&self.options.id, user.clone()).await?;
        Ok(user)
    }

    pub async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.store.list_users(&self.options.id).await
    }
}
