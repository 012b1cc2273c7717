//! Access token codec and refresh token issuer.
//!
//! Access tokens are stateless HS256 JWTs: validation is O(1) with no store
//! lookup, at the cost of no per-token revocation. Short lifetimes bound
//! that exposure. Refresh tokens are opaque high-entropy strings with no
//! embedded claims; their semantics live entirely in the session store.

use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use rand::{TryRngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::models::UserId;

/// Issuer label asserted in every access token
pub const ISSUER: &str = "aviary";

/// Entropy of an opaque refresh token (hex-encoded to twice this width)
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Claims carried by a signed access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    /// User ID as a string
    pub sub: String,
    /// Issued-at, Unix seconds
    pub iat: i64,
    /// Absolute expiry, Unix seconds
    pub exp: i64,
}

/// Issue a signed access token asserting `user_id` until `ttl` elapses.
///
/// # Errors
///
/// * `AuthError::SigningFailure` - internal signing error only
pub fn issue_access_token(
    user_id: UserId,
    signing_secret: &str,
    ttl: Duration,
) -> AuthResult<String> {
    let now = Utc::now();
    let claims = AccessTokenClaims {
        iss: ISSUER.to_string(),
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(signing_secret.as_bytes()),
    )
    .map_err(|_| AuthError::SigningFailure)
}

/// Validate a signed access token and resolve the user it asserts.
///
/// Rejects on any verification failure with no partial trust: a bad
/// signature, a past expiry, or an unparseable subject all yield no
/// identity. Expiry is strict (`exp <= now` fails, zero leeway).
///
/// # Errors
///
/// * `AuthError::InvalidSignature` - signature does not verify
/// * `AuthError::TokenExpired` - expiry is not in the future
/// * `AuthError::MalformedSubject` - subject is not a valid user ID
/// * `AuthError::MalformedCredential` - not a well-formed token at all
pub fn validate_access_token(token: &str, signing_secret: &str) -> AuthResult<UserId> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_issuer(&[ISSUER]);

    let data = decode::<AccessTokenClaims>(
        token,
        &DecodingKey::from_secret(signing_secret.as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::MalformedCredential,
    })?;

    Uuid::parse_str(&data.claims.sub).map_err(|_| AuthError::MalformedSubject)
}

/// Generate an opaque refresh token: 32 OS-random bytes, hex encoded.
///
/// Collision probability across 256 bits of entropy is treated as
/// negligible; the store's uniqueness constraint is the backstop.
///
/// # Errors
///
/// * `AuthError::EntropyFailure` - OS random source unavailable
pub fn generate_refresh_token() -> AuthResult<String> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|_| AuthError::EntropyFailure)?;

    Ok(hex::encode(bytes))
}
