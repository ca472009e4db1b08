//! Message construction and the sender boundary.
//!
//! The engine composes the one-time code into a [`Message`] and hands it
//! to a [`MessageSender`]. Senders perform the actual out-of-band
//! delivery and are pluggable per deployment; [`ConsoleMessageSender`]
//! is the reference implementation for local use.

use std::sync::Arc;

use poolside_core::models::delivery::DeliveryMedium;
use poolside_core::models::message::Message;
use poolside_core::models::user::User;
use poolside_core::models::user_pool::{MessageTemplates, UserPoolOptions};
use thiserror::Error;
use tracing::info;

const DEFAULT_INVITATION_EMAIL_SUBJECT: &str = "Your temporary password";
const DEFAULT_INVITATION_MESSAGE: &str =
    "Your username is {username} and temporary password is {####}.";
const DEFAULT_VERIFICATION_EMAIL_SUBJECT: &str = "Your verification code";
const DEFAULT_VERIFICATION_MESSAGE: &str = "Your verification code is {####}.";

fn render(template: &str, username: &str, code: &str) -> String {
    template
        .replace("{####}", code)
        .replace("{username}", username)
}

fn build(
    templates: Option<&MessageTemplates>,
    default_subject: &str,
    default_body: &str,
    username: &str,
    code: &str,
) -> Message {
    let templates = templates.cloned().unwrap_or_default();
    Message {
        code: code.to_string(),
        email_subject: Some(
            templates
                .email_subject
                .unwrap_or_else(|| default_subject.to_string()),
        ),
        email_message: Some(render(
            templates
                .email_message
                .as_deref()
                .unwrap_or(default_body),
            username,
            code,
        )),
        sms_message: Some(render(
            templates.sms_message.as_deref().unwrap_or(default_body),
            username,
            code,
        )),
    }
}

/// The invitation carrying a temporary password for a new account.
pub fn invitation_message(options: &UserPoolOptions, username: &str, code: &str) -> Message {
    build(
        options.invitation_message.as_ref(),
        DEFAULT_INVITATION_EMAIL_SUBJECT,
        DEFAULT_INVITATION_MESSAGE,
        username,
        code,
    )
}

/// The confirmation-code message for reset flows.
pub fn verification_message(options: &UserPoolOptions, username: &str, code: &str) -> Message {
    build(
        options.verification_message.as_ref(),
        DEFAULT_VERIFICATION_EMAIL_SUBJECT,
        DEFAULT_VERIFICATION_MESSAGE,
        username,
        code,
    )
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct DeliveryError(pub String);

/// Out-of-band delivery boundary.
///
/// Implementations must treat `message.code` as a short-lived secret: it
/// may be shown to the local operator or a test harness, never persisted
/// into user records or API responses.
pub trait MessageSender: Send + Sync {
    fn send(
        &self,
        medium: DeliveryMedium,
        destination: &str,
        user: &User,
        message: &Message,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Receives every delivered code, so automated harnesses can read codes
/// back without scraping operator output.
pub trait CodeSink: Send + Sync {
    fn record(&self, username: &str, destination: &str, code: &str);
}

/// Reference sender: renders deliveries to the operator log.
#[derive(Default)]
pub struct ConsoleMessageSender {
    sink: Option<Arc<dyn CodeSink>>,
}

impl ConsoleMessageSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror every delivered code into `sink`.
    pub fn with_code_sink(sink: Arc<dyn CodeSink>) -> Self {
        Self { sink: Some(sink) }
    }
}

impl MessageSender for ConsoleMessageSender {
    async fn send(
        &self,
        medium: DeliveryMedium,
        destination: &str,
        user: &User,
        message: &Message,
    ) -> Result<(), DeliveryError> {
        info!(
            medium = medium.as_str(),
            username = %user.username,
            destination = %destination,
            code = %message.code,
            email_subject = message.email_subject.as_deref().unwrap_or(""),
            email_message = message.email_message.as_deref().unwrap_or(""),
            sms_message = message.sms_message.as_deref().unwrap_or(""),
            "confirmation code delivery"
        );

        if let Some(sink) = &self.sink {
            sink.record(&user.username, destination, &message.code);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use poolside_core::models::user::UserStatus;
    use std::sync::Mutex;

    fn options() -> UserPoolOptions {
        UserPoolOptions::new("pool-1")
    }

    #[test]
    fn default_templates_substitute_code_and_username() {
        let message = invitation_message(&options(), "alice", "TMP123");
        assert_eq!(message.code, "TMP123");
        assert_eq!(
            message.email_message.as_deref(),
            Some("Your username is alice and temporary password is TMP123.")
        );

        let message = verification_message(&options(), "alice", "654321");
        assert_eq!(
            message.sms_message.as_deref(),
            Some("Your verification code is 654321.")
        );
    }

    #[test]
    fn pool_templates_override_defaults() {
        let mut options = options();
        options.verification_message = Some(MessageTemplates {
            email_subject: Some("Reset your password".into()),
            email_message: Some("Code: {####} for {username}".into()),
            sms_message: None,
        });

        let message = verification_message(&options, "alice", "654321");
        assert_eq!(message.email_subject.as_deref(), Some("Reset your password"));
        assert_eq!(
            message.email_message.as_deref(),
            Some("Code: 654321 for alice")
        );
        // Unset template slots fall back to the default body.
        assert_eq!(
            message.sms_message.as_deref(),
            Some("Your verification code is 654321.")
        );
    }

    struct RecordingSink(Mutex<Vec<(String, String, String)>>);

    impl CodeSink for RecordingSink {
        fn record(&self, username: &str, destination: &str, code: &str) {
            self.0
                .lock()
                .unwrap()
                .push((username.into(), destination.into(), code.into()));
        }
    }

    #[tokio::test]
    async fn console_sender_forwards_codes_to_the_sink() {
        let sink = Arc::new(RecordingSink(Mutex::new(Vec::new())));
        let sender = ConsoleMessageSender::with_code_sink(sink.clone());

        let now = Utc::now();
        let user = User {
            username: "alice".into(),
            attributes: vec![],
            password: "hunter2".into(),
            status: UserStatus::ResetRequired,
            confirmation_code: Some("654321".into()),
            mfa_code: None,
            enabled: true,
            create_date: now,
            last_modified_date: now,
        };
        let message = verification_message(&options(), "alice", "654321");

        sender
            .send(DeliveryMedium::Email, "alice@example.com", &user, &message)
            .await
            .unwrap();

        let recorded = sink.0.lock().unwrap();
        assert_eq!(
            recorded.as_slice(),
            [(
                "alice".to_string(),
                "alice@example.com".to_string(),
                "654321".to_string()
            )]
        );
    }
}
