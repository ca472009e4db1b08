//! Operation-boundary error taxonomy.
//!
//! Every engine operation fails with one of these kinds; the protocol
//! binding layer maps them to transport failure codes. Errors are raised
//! at the point of detection and propagate unmodified — no internal
//! recovery or retry. Side effects that completed before a failure (a
//! save before a delivery error) are not rolled back.

use poolside_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field is missing, or no delivery medium resolves to a
    /// usable destination.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Administrative lookup of a username failed. Never returned from
    /// end-user-facing paths.
    #[error("user not found")]
    UserNotFound,

    /// End-user-facing lookup failed. Deliberately indistinguishable from
    /// a bad credential so unauthenticated callers cannot probe for
    /// account existence.
    #[error("not authorized")]
    NotAuthorized,

    /// A supplied MFA/confirmation code does not match the stored value.
    #[error("code mismatch")]
    CodeMismatch,

    /// A recognized but unimplemented challenge or operation variant.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A pool or client id that does not resolve.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// AdminCreateUser conflict on an existing username.
    #[error("username already exists: {0}")]
    UsernameExists(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("cryptography error: {0}")]
    Crypto(String),

    #[error("message delivery failed: {0}")]
    Delivery(String),

    #[error("trigger invocation failed: {0}")]
    Trigger(String),
}

pub type AuthResult<T> = Result<T, AuthError>;
