//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account lifecycle status. Drives which operations are legal for the
/// user: `ResetRequired` and `ForceChangePassword` block full
/// authentication until the matching challenge is resolved.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Unconfirmed,
    Confirmed,
    ForceChangePassword,
    ResetRequired,
    Archived,
    Compromised,
    Unknown,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Unconfirmed => "UNCONFIRMED",
            UserStatus::Confirmed => "CONFIRMED",
            UserStatus::ForceChangePassword => "FORCE_CHANGE_PASSWORD",
            UserStatus::ResetRequired => "RESET_REQUIRED",
            UserStatus::Archived => "ARCHIVED",
            UserStatus::Compromised => "COMPROMISED",
            UserStatus::Unknown => "UNKNOWN",
        }
    }
}

/// A single `(name, value)` attribute pair. Names are unique per user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One account in a user pool.
///
/// `username` is the immutable identity key. `confirmation_code` and
/// `mfa_code` are short-lived secrets — set by an operation that sends
/// them out-of-band, cleared once consumed, and never included in API
/// response objects (see `UserSummary` in the auth crate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub attributes: Vec<UserAttribute>,
    pub password: String,
    pub status: UserStatus,
    pub confirmation_code: Option<String>,
    pub mfa_code: Option<String>,
    pub enabled: bool,
    pub create_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl User {
    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Apply a field-wise update, producing the modified record.
    ///
    /// Timestamps are deliberately absent from [`UserUpdate`]: the pool
    /// service stamps `last_modified_date` when the record is saved.
    pub fn with(mut self, update: UserUpdate) -> User {
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(code) = update.confirmation_code {
            self.confirmation_code = code;
        }
        if let Some(code) = update.mfa_code {
            self.mfa_code = code;
        }
        if let Some(attributes) = update.attributes {
            self.attributes = attributes;
        }
        if let Some(enabled) = update.enabled {
            self.enabled = enabled;
        }
        self
    }
}

/// Input for creating a user through the pool service.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub attributes: Vec<UserAttribute>,
    pub password: String,
    pub status: UserStatus,
    pub enabled: bool,
}

/// Field-wise user update, applied by [`User::with`].
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub status: Option<UserStatus>,
    pub password: Option<String>,
    /// `Some(Some(v))` = set, `Some(None)` = clear, `None` = no change.
    pub confirmation_code: Option<Option<String>>,
    /// Same convention as `confirmation_code`.
    pub mfa_code: Option<Option<String>>,
    pub attributes: Option<Vec<UserAttribute>>,
    pub enabled: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            username: "alice".into(),
            attributes: vec![
                UserAttribute::new("sub", "1234"),
                UserAttribute::new("email", "alice@example.com"),
            ],
            password: "hunter2".into(),
            status: UserStatus::Confirmed,
            confirmation_code: Some("ABC123".into()),
            mfa_code: None,
            enabled: true,
            create_date: Utc::now(),
            last_modified_date: Utc::now(),
        }
    }

    #[test]
    fn attribute_lookup() {
        let user = sample_user();
        assert_eq!(user.attribute("email"), Some("alice@example.com"));
        assert_eq!(user.attribute("phone_number"), None);
    }

    #[test]
    fn with_updates_named_fields_only() {
        let user = sample_user();
        let updated = user.clone().with(UserUpdate {
            status: Some(UserStatus::ResetRequired),
            password: Some("temp".into()),
            ..Default::default()
        });

        assert_eq!(updated.status, UserStatus::ResetRequired);
        assert_eq!(updated.password, "temp");
        // Untouched fields carry over.
        assert_eq!(updated.confirmation_code.as_deref(), Some("ABC123"));
        assert_eq!(updated.attributes, user.attributes);
    }

    #[test]
    fn with_clears_transient_secrets() {
        let user = sample_user();
        let updated = user.with(UserUpdate {
            confirmation_code: Some(None),
            mfa_code: Some(Some("654321".into())),
            ..Default::default()
        });

        assert_eq!(updated.confirmation_code, None);
        assert_eq!(updated.mfa_code.as_deref(), Some("654321"));
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        let json = serde_json::to_string(&UserStatus::ForceChangePassword).unwrap();
        assert_eq!(json, "\"FORCE_CHANGE_PASSWORD\"");
        assert_eq!(UserStatus::ResetRequired.as_str(), "RESET_REQUIRED");
    }
}
