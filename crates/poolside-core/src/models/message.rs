//! Out-of-band message payload.

/// A code-bearing message handed to a message sender.
///
/// `code` is the internal one-time secret. It must reach the sender (so
/// automated harnesses can pick it up) but is logically separate from the
/// rendered templates and must never appear in persisted or returned API
/// objects.
#[derive(Debug, Clone)]
pub struct Message {
    pub code: String,
    pub email_subject: Option<String>,
    pub email_message: Option<String>,
    pub sms_message: Option<String>,
}
