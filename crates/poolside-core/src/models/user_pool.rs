//! User pool and app client domain models.

use serde::{Deserialize, Serialize};

/// Pool-level configuration.
///
/// Pools are created administratively; an admin operation addressed at an
/// unknown pool id creates it with defaults, which keeps a freshly started
/// emulator usable without a provisioning step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPoolOptions {
    pub id: String,
    pub name: Option<String>,
    /// Templates for the temporary-password invitation sent on user
    /// creation. Defaults are used when absent.
    pub invitation_message: Option<MessageTemplates>,
    /// Templates for confirmation-code delivery. Defaults are used when
    /// absent.
    pub verification_message: Option<MessageTemplates>,
}

impl UserPoolOptions {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            invitation_message: None,
            verification_message: None,
        }
    }
}

/// A client application registered against a pool. End-user operations
/// address the pool through a client id rather than the pool id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppClient {
    pub client_id: String,
    pub user_pool_id: String,
    pub client_name: String,
}

/// Per-medium message templates. The one-time code (or temporary
/// password) replaces the `{####}` placeholder; `{username}` is replaced
/// with the recipient's username.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MessageTemplates {
    pub email_subject: Option<String>,
    pub email_message: Option<String>,
    pub sms_message: Option<String>,
}
