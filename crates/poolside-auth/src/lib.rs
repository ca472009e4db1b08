//! poolside auth — the authentication and credential-lifecycle engine.
//!
//! Implements the operations a hosted user-pool identity provider
//! exposes (admin credential resets, challenge resolution, account
//! listing), driving the pool service for persistence, the delivery
//! router + [`MessageSender`] for out-of-band codes, and the token
//! issuer for session artifacts.

pub mod code;
pub mod config;
pub mod delivery;
pub mod error;
pub mod message;
pub mod service;
pub mod token;
pub mod triggers;

pub use config::{AuthConfig, PasswordResetPolicy, TokenConfig};
pub use error::{AuthError, AuthResult};
pub use message::{CodeSink, ConsoleMessageSender, MessageSender};
pub use service::AuthService;
pub use token::TokenSet;
pub use triggers::{NoTriggers, Triggers};
