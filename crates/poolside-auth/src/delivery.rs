//! Delivery-method selection.

use poolside_core::models::delivery::{DeliveryDetails, DeliveryMedium};
use poolside_core::models::user::User;

/// Pick the destination for an out-of-band message.
///
/// Mediums are tried in the caller's priority order; the first one whose
/// corresponding attribute is present and non-empty on the user wins.
/// `None` means no medium is usable — the caller must fail its operation
/// with an invalid-parameter error rather than fall back silently.
pub fn select_appropriate_delivery_method(
    acceptable: &[DeliveryMedium],
    user: &User,
) -> Option<DeliveryDetails> {
    acceptable.iter().find_map(|medium| {
        let destination = user.attribute(medium.attribute_name())?;
        if destination.is_empty() {
            return None;
        }
        Some(DeliveryDetails {
            attribute_name: medium.attribute_name().to_string(),
            delivery_medium: *medium,
            destination: destination.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use poolside_core::models::user::{UserAttribute, UserStatus};

    fn user_with(attributes: Vec<UserAttribute>) -> User {
        let now = Utc::now();
        User {
            username: "alice".into(),
            attributes,
            password: "hunter2".into(),
            status: UserStatus::Confirmed,
            confirmation_code: None,
            mfa_code: None,
            enabled: true,
            create_date: now,
            last_modified_date: now,
        }
    }

    #[test]
    fn picks_first_usable_medium_in_priority_order() {
        let user = user_with(vec![
            UserAttribute::new("email", "alice@example.com"),
            UserAttribute::new("phone_number", "+15550100"),
        ]);

        let details = select_appropriate_delivery_method(
            &[DeliveryMedium::Sms, DeliveryMedium::Email],
            &user,
        )
        .unwrap();
        assert_eq!(details.delivery_medium, DeliveryMedium::Sms);
        assert_eq!(details.attribute_name, "phone_number");
        assert_eq!(details.destination, "+15550100");

        let details = select_appropriate_delivery_method(
            &[DeliveryMedium::Email, DeliveryMedium::Sms],
            &user,
        )
        .unwrap();
        assert_eq!(details.delivery_medium, DeliveryMedium::Email);
        assert_eq!(details.destination, "alice@example.com");
    }

    #[test]
    fn skips_mediums_without_a_usable_attribute() {
        let user = user_with(vec![UserAttribute::new("email", "alice@example.com")]);

        let details = select_appropriate_delivery_method(
            &[DeliveryMedium::Sms, DeliveryMedium::Email],
            &user,
        )
        .unwrap();
        assert_eq!(details.delivery_medium, DeliveryMedium::Email);
    }

    #[test]
    fn empty_attribute_value_is_not_usable() {
        let user = user_with(vec![UserAttribute::new("email", "")]);
        assert!(select_appropriate_delivery_method(&[DeliveryMedium::Email], &user).is_none());
    }

    #[test]
    fn no_usable_medium_yields_none() {
        let user = user_with(vec![]);
        assert!(
            select_appropriate_delivery_method(
                &[DeliveryMedium::Email, DeliveryMedium::Sms],
                &user
            )
            .is_none()
        );
    }
}
