//! Storage-layer error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists: {username}")]
    UserExists { username: String },

    #[error("user pool not found: {pool_id}")]
    PoolNotFound { pool_id: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
