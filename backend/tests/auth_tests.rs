//! Authentication tests
//!
//! Tests for credential validation rules and token expiry arithmetic.

use chrono::{Duration, Utc};
use proptest::prelude::*;

use shared::validation::{validate_email, validate_password, validate_phone};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a@b.co").is_ok());
    }

    #[test]
    fn test_invalid_emails() {
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing-domain@").is_err());
        assert!(validate_email("@.").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("").is_err());
    }

    #[test]
    fn test_phone_numbers() {
        assert!(validate_phone("+919876543210").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("not-a-number").is_err());
    }

    /// Access tokens expire before their refresh counterparts
    #[test]
    fn test_token_expiry_ordering() {
        let access_expiry = 900i64;
        let refresh_expiry = 604800i64;

        let now = Utc::now();
        let access_exp = now + Duration::seconds(access_expiry);
        let refresh_exp = now + Duration::seconds(refresh_expiry);

        assert!(access_exp < refresh_exp);
        assert!(access_exp > now);
    }

    /// A refresh token past its expiry instant is rejected
    #[test]
    fn test_expired_refresh_token_detection() {
        let now = Utc::now();
        let expired_at = now - Duration::seconds(1);
        let live_until = now + Duration::seconds(1);

        assert!(expired_at < now);
        assert!(live_until >= now);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn email_strategy() -> impl Strategy<Value = String> {
        ("[a-z]{1,10}", "[a-z]{1,10}", "[a-z]{2,4}")
            .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Well-formed addresses always validate
        #[test]
        fn prop_generated_emails_validate(email in email_strategy()) {
            prop_assert!(validate_email(&email).is_ok());
        }

        /// Passwords of eight or more characters always validate
        #[test]
        fn prop_long_passwords_validate(password in ".{8,64}") {
            prop_assert!(validate_password(&password).is_ok());
        }

        /// Passwords under eight characters never validate
        #[test]
        fn prop_short_passwords_fail(password in "[ -~]{0,7}") {
            prop_assert!(validate_password(&password).is_err());
        }

        /// Digit-only phone numbers in the accepted length band validate
        #[test]
        fn prop_phone_length_band(phone in "[0-9]{7,15}") {
            prop_assert!(validate_phone(&phone).is_ok());
        }
    }
}
