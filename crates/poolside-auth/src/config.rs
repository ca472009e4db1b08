//! Engine configuration.

/// Token issuance configuration.
///
/// The signing key pair is Ed25519 in PEM form so relying parties can
/// verify issued tokens with the public key alone.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// PEM-encoded Ed25519 private key for token signing.
    pub private_key_pem: String,
    /// PEM-encoded Ed25519 public key for token verification.
    pub public_key_pem: String,
    /// ID token lifetime in seconds (default: 3600 = 1 hour).
    pub id_token_lifetime_secs: u64,
    /// Access token lifetime in seconds (default: 3600 = 1 hour).
    pub access_token_lifetime_secs: u64,
    /// Refresh token lifetime in seconds (default: 2_592_000 = 30 days).
    pub refresh_token_lifetime_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            private_key_pem: String::new(),
            public_key_pem: String::new(),
            id_token_lifetime_secs: 3600,
            access_token_lifetime_secs: 3600,
            refresh_token_lifetime_secs: 2_592_000,
        }
    }
}

/// Which of the two AdminResetUserPassword behaviors a deployment runs.
/// The policies are mutually exclusive — exactly one executes per
/// request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PasswordResetPolicy {
    /// Move the user to `RESET_REQUIRED` and deliver a confirmation code.
    #[default]
    ConfirmationCode,
    /// Move the user to `FORCE_CHANGE_PASSWORD` and deliver a generated
    /// temporary password.
    TemporaryPassword,
}

/// Configuration for the auth engine.
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub token: TokenConfig,
    pub reset_policy: PasswordResetPolicy,
}
