//! Credential extraction from authorization header values.
//!
//! Two schemes are recognized, on different endpoints:
//!
//! - `Authorization: Bearer <token>` for user-scoped endpoints (the token is
//!   either a signed access token or an opaque refresh token, depending on
//!   the endpoint)
//! - `Authorization: ApiKey <key>` for trusted server-to-server calls
//!
//! Both schemes are matched as strict, case-sensitive prefixes with a single
//! space. The service key comparison is constant-time.

use subtle::ConstantTimeEq;

use super::errors::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";
const SERVICE_KEY_PREFIX: &str = "ApiKey ";

/// Extract the bearer credential from an authorization header value.
///
/// # Errors
///
/// * `AuthError::MissingCredential` - header absent or empty
/// * `AuthError::MalformedCredential` - scheme prefix does not match, or
///   nothing follows it
pub fn extract_bearer(authorization: Option<&str>) -> AuthResult<String> {
    extract_with_prefix(authorization, BEARER_PREFIX)
}

/// Extract the service key from an authorization header value.
///
/// Requires the `ApiKey ` scheme as a strict prefix.
///
/// # Errors
///
/// * `AuthError::MissingCredential` - header absent or empty
/// * `AuthError::MalformedCredential` - scheme prefix does not match
pub fn extract_service_key(authorization: Option<&str>) -> AuthResult<String> {
    extract_with_prefix(authorization, SERVICE_KEY_PREFIX)
}

/// Check a presented service key against the process-configured key.
///
/// The comparison runs in constant time.
///
/// # Errors
///
/// * `AuthError::Forbidden` - key mismatch
pub fn authorize_service_key(presented: &str, expected: &str) -> AuthResult<()> {
    if bool::from(presented.as_bytes().ct_eq(expected.as_bytes())) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

fn extract_with_prefix(authorization: Option<&str>, prefix: &str) -> AuthResult<String> {
    let value = match authorization {
        Some(v) if !v.is_empty() => v,
        _ => return Err(AuthError::MissingCredential),
    };

    let credential = value
        .strip_prefix(prefix)
        .ok_or(AuthError::MalformedCredential)?;

    if credential.is_empty() {
        return Err(AuthError::MalformedCredential);
    }

    Ok(credential.to_string())
}
