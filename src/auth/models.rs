//! Authentication data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User ID type
pub type UserId = Uuid;

/// Public user model, safe to return to callers (never carries the hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_upgraded: bool,
}

/// Store-side user row, including the password hash
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_upgraded: bool,
}

impl UserRecord {
    /// Strip the credential hash for external consumption.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            is_upgraded: self.is_upgraded,
        }
    }
}

/// User registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// User login request
///
/// `expires_in_secs` lets the caller request a shorter access token; it is
/// clamped server-side to the one-hour maximum since stateless access tokens
/// cannot be revoked early.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub expires_in_secs: Option<i64>,
}

/// Successful login result: the user plus both tokens
///
/// The refresh token is delivered exactly once here and is never
/// re-derivable afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginSession {
    #[serde(flatten)]
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

/// Result of exchanging a refresh token for a new access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
}

/// Persisted refresh token state
///
/// All refresh token semantics live here; the token value itself carries no
/// claims. The token is usable iff `revoked_at` is unset and the expiry is
/// in the future.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRecord {
    /// Whether the token can still be exchanged for an access token.
    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && now < self.expires_at
    }
}
