//! Out-of-band delivery mediums and resolved destinations.

use serde::{Deserialize, Serialize};

/// Channel used to deliver an out-of-band code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMedium {
    Email,
    Sms,
}

impl DeliveryMedium {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMedium::Email => "EMAIL",
            DeliveryMedium::Sms => "SMS",
        }
    }

    /// The user attribute a medium delivers to.
    pub fn attribute_name(&self) -> &'static str {
        match self {
            DeliveryMedium::Email => "email",
            DeliveryMedium::Sms => "phone_number",
        }
    }
}

/// A resolved delivery destination: which attribute was used, over which
/// medium, and the destination value itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct DeliveryDetails {
    pub attribute_name: String,
    pub delivery_medium: DeliveryMedium,
    pub destination: String,
}
