//! Property-based tests for the token codec and header parsing using
//! proptest.

use aviary_auth::auth::{AuthError, extract_bearer, token};
use chrono::Duration;
use proptest::prelude::*;
use uuid::Uuid;

proptest! {
    /// A token issued for a user validates back to that user before its
    /// lifetime elapses, for any secret and any in-range TTL.
    #[test]
    fn issued_tokens_validate_back_to_the_same_user(
        secret in "[A-Za-z0-9]{32,64}",
        ttl_secs in 60i64..86_400,
    ) {
        let user_id = Uuid::new_v4();
        let token =
            token::issue_access_token(user_id, &secret, Duration::seconds(ttl_secs)).unwrap();

        let resolved = token::validate_access_token(&token, &secret).unwrap();
        prop_assert_eq!(resolved, user_id);
    }

    /// Validation under a different secret always fails with a signature
    /// error, never with a wrong identity.
    #[test]
    fn validation_under_a_different_secret_fails(
        secret_a in "[A-Za-z0-9]{32,64}",
        secret_b in "[A-Za-z0-9]{32,64}",
    ) {
        prop_assume!(secret_a != secret_b);

        let token =
            token::issue_access_token(Uuid::new_v4(), &secret_a, Duration::minutes(5)).unwrap();

        let err = token::validate_access_token(&token, &secret_b).unwrap_err();
        prop_assert!(matches!(err, AuthError::InvalidSignature));
    }

    /// An expired token is always rejected as expired, regardless of how
    /// long ago it died.
    #[test]
    fn expired_tokens_are_rejected(
        secret in "[A-Za-z0-9]{32,64}",
        dead_for_secs in 61i64..1_000_000,
    ) {
        let token =
            token::issue_access_token(Uuid::new_v4(), &secret, Duration::seconds(-dead_for_secs))
                .unwrap();

        let err = token::validate_access_token(&token, &secret).unwrap_err();
        prop_assert!(matches!(err, AuthError::TokenExpired));
    }

    /// Bearer extraction returns exactly what followed the scheme prefix.
    #[test]
    fn bearer_extraction_recovers_the_token(raw in "[A-Za-z0-9._-]{1,128}") {
        let header = format!("Bearer {raw}");
        prop_assert_eq!(extract_bearer(Some(&header)).unwrap(), raw);
    }

    /// A header value without the scheme never yields a credential.
    #[test]
    fn bare_values_are_never_accepted_as_bearer(raw in "[A-Za-z0-9._-]{1,128}") {
        prop_assume!(!raw.starts_with("Bearer "));
        prop_assert!(extract_bearer(Some(&raw)).is_err());
    }
}

proptest! {
    // Refresh token generation hits the OS RNG; keep the case count modest.
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every generated refresh token is fixed-width hex and distinct from
    /// an independently generated one.
    #[test]
    fn refresh_tokens_are_well_formed_and_distinct(_seed in 0u8..255) {
        let first = token::generate_refresh_token().unwrap();
        let second = token::generate_refresh_token().unwrap();

        prop_assert_eq!(first.len(), token::REFRESH_TOKEN_BYTES * 2);
        prop_assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        prop_assert_ne!(first, second);
    }
}
