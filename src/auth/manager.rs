//! Authentication manager implementation.

use std::sync::Arc;

use chrono::{Duration, Utc};

use super::{
    errors::{AuthError, AuthResult},
    headers, password,
    models::{LoginRequest, LoginSession, RefreshedToken, RegisterRequest, User, UserId},
    token,
};
use crate::db::SessionStore;

/// Maximum (and default) access token lifetime in seconds.
///
/// Access tokens are stateless and cannot be revoked early, so a caller-
/// supplied lifetime is always clamped to this ceiling.
pub const MAX_ACCESS_TOKEN_TTL_SECS: i64 = 3600;

/// Refresh token lifetime in hours (60 days).
pub const REFRESH_TOKEN_TTL_HOURS: i64 = 1440;

/// Authentication manager
///
/// Orchestrates the credential hasher, the token codec, and the session
/// store into the login, refresh, and revoke flows. Secrets are injected at
/// construction and read-only afterwards, so a single manager is safely
/// shared across concurrent requests.
#[derive(Clone)]
pub struct AuthManager {
    store: Arc<dyn SessionStore>,
    signing_secret: String,
    service_key: String,
    refresh_token_ttl: Duration,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `store` - Session store collaborator (users and refresh tokens)
    /// * `signing_secret` - Secret key for access token signing
    /// * `service_key` - Shared secret for trusted server-to-server calls
    pub fn new(store: Arc<dyn SessionStore>, signing_secret: String, service_key: String) -> Self {
        Self {
            store,
            signing_secret,
            service_key,
            refresh_token_ttl: Duration::hours(REFRESH_TOKEN_TTL_HOURS),
        }
    }

    /// Register a new user
    ///
    /// # Errors
    ///
    /// * `AuthError::HashingFailure` - password hashing failed
    /// * `AuthError::PersistenceFailure` - store error (including duplicate
    ///   email, surfaced by the store's uniqueness constraint)
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        let password_hash = password::hash_password(&request.password)?;

        let record = self.store.create_user(&request.email, &password_hash).await?;
        log::debug!("registered user {}", record.id);

        Ok(record.to_user())
    }

    /// Login a user
    ///
    /// Verifies the password, mints an access token, and persists a fresh
    /// refresh token. On any failure no token is issued and no refresh
    /// record is created.
    ///
    /// The caller may request a shorter access token via
    /// `expires_in_secs`; the value is clamped to
    /// [`MAX_ACCESS_TOKEN_TTL_SECS`] so no caller can obtain a long-lived
    /// irrevocable token.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - no user with that email
    /// * `AuthError::CredentialMismatch` - incorrect password
    pub async fn login(&self, request: LoginRequest) -> AuthResult<LoginSession> {
        let record = self.store.get_user_by_email(&request.email).await?;

        password::verify_password(&record.password_hash, &request.password)?;

        let ttl_secs = request
            .expires_in_secs
            .map(|secs| secs.clamp(1, MAX_ACCESS_TOKEN_TTL_SECS))
            .unwrap_or(MAX_ACCESS_TOKEN_TTL_SECS);
        let access_token =
            token::issue_access_token(record.id, &self.signing_secret, Duration::seconds(ttl_secs))?;

        let refresh_token = token::generate_refresh_token()?;
        let expires_at = Utc::now() + self.refresh_token_ttl;
        self.store
            .create_refresh_token(&refresh_token, record.id, expires_at)
            .await?;

        log::debug!("issued session tokens for user {}", record.id);

        Ok(LoginSession {
            user: record.to_user(),
            access_token,
            refresh_token,
        })
    }

    /// Resolve a user-scoped request to a user identity
    ///
    /// Extracts the bearer credential from the authorization header value
    /// and validates it as an access token. O(1), no store lookup.
    ///
    /// # Errors
    ///
    /// Any extraction or validation failure propagates; no partial identity
    /// is ever returned.
    pub fn authenticate_access(&self, authorization: Option<&str>) -> AuthResult<UserId> {
        let raw = headers::extract_bearer(authorization)?;
        token::validate_access_token(&raw, &self.signing_secret)
    }

    /// Extract the opaque refresh token presented by a refresh/revoke request
    ///
    /// Extraction only; the refresh and revoke flows consult the session
    /// store for the token's semantics.
    pub fn authenticate_refresh(&self, authorization: Option<&str>) -> AuthResult<String> {
        headers::extract_bearer(authorization)
    }

    /// Exchange a refresh token for a new access token
    ///
    /// The presented token is usable iff it has not been revoked and its
    /// expiry is still in the future. Revocation and expiry are checked
    /// before any identity is handed out.
    ///
    /// # Errors
    ///
    /// * `AuthError::SessionNotFound` - unknown token
    /// * `AuthError::SessionExpired` - revoked or past expiry
    pub async fn refresh(&self, authorization: Option<&str>) -> AuthResult<RefreshedToken> {
        let raw = self.authenticate_refresh(authorization)?;

        let record = self.store.lookup_refresh_token(&raw).await?;
        if !record.is_usable(Utc::now()) {
            log::warn!("rejected unusable refresh token for user {}", record.user_id);
            return Err(AuthError::SessionExpired);
        }

        let access_token = token::issue_access_token(
            record.user_id,
            &self.signing_secret,
            Duration::seconds(MAX_ACCESS_TOKEN_TTL_SECS),
        )?;

        Ok(RefreshedToken { access_token })
    }

    /// Revoke the sessions of the user who owns the presented refresh token
    ///
    /// Revocation is by owner: every refresh token belonging to the resolved
    /// user is stamped, not just the presented one, logging the user out of
    /// all sessions at once. Records are retained, not deleted.
    ///
    /// # Errors
    ///
    /// * `AuthError::SessionNotFound` - unknown token
    pub async fn revoke(&self, authorization: Option<&str>) -> AuthResult<()> {
        let raw = self.authenticate_refresh(authorization)?;

        let record = self.store.lookup_refresh_token(&raw).await?;
        self.store.revoke_refresh_tokens(record.user_id).await?;

        log::debug!("revoked all sessions for user {}", record.user_id);
        Ok(())
    }

    /// Update a user's email and password
    ///
    /// The caller must have already resolved `user_id` from a valid access
    /// token via [`AuthManager::authenticate_access`].
    pub async fn update_user(
        &self,
        user_id: UserId,
        email: &str,
        new_password: &str,
    ) -> AuthResult<User> {
        let password_hash = password::hash_password(new_password)?;

        let record = self
            .store
            .update_user_credentials(user_id, email, &password_hash)
            .await?;

        Ok(record.to_user())
    }

    /// Upgrade a user's tier on behalf of the billing integration
    ///
    /// Validates the `ApiKey` service credential before touching the store.
    /// Independent of any user identity.
    ///
    /// # Errors
    ///
    /// * `AuthError::Forbidden` - service key mismatch
    /// * `AuthError::UserNotFound` - no such user
    pub async fn upgrade_tier(&self, authorization: Option<&str>, user_id: UserId) -> AuthResult<()> {
        let presented = headers::extract_service_key(authorization)?;
        headers::authorize_service_key(&presented, &self.service_key)?;

        self.store.set_tier_flag(user_id).await
    }

    /// Delete all users and their sessions. Dev/test reset only.
    pub async fn reset(&self) -> AuthResult<()> {
        self.store.delete_all_users().await
    }
}
