//! Authentication error types.

use thiserror::Error;

/// Authentication and authorization errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Authorization header absent or empty
    #[error("Authorization credential missing")]
    MissingCredential,

    /// Authorization header present but not in the expected scheme
    #[error("Malformed authorization credential")]
    MalformedCredential,

    /// Access token signature does not verify against the signing secret
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Access token past its expiry time
    #[error("Token expired")]
    TokenExpired,

    /// Access token subject is not a parseable user id
    #[error("Malformed token subject")]
    MalformedSubject,

    /// Password does not correspond to the stored hash
    #[error("Invalid password")]
    CredentialMismatch,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Refresh token not found
    #[error("Refresh token not found")]
    SessionNotFound,

    /// Refresh token revoked or past its expiry time
    #[error("Session expired or revoked")]
    SessionExpired,

    /// Requester does not own the resource, or service key mismatch
    #[error("Forbidden")]
    Forbidden,

    /// Storage error from the session store
    #[error("Database error: {0}")]
    PersistenceFailure(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailure,

    /// Token signing failed
    #[error("Token signing failed")]
    SigningFailure,

    /// Secure random source unavailable
    #[error("Random source unavailable")]
    EntropyFailure,
}

impl AuthError {
    /// Whether this error was caused by the caller's credentials rather than
    /// an internal fault.
    ///
    /// Callers map credential faults to a precise unauthorized/forbidden
    /// response and internal faults to a generic failure response. Identity
    /// resolution is all-or-nothing: no variant here carries a partial
    /// identity.
    pub fn is_credential_fault(&self) -> bool {
        !matches!(
            self,
            AuthError::PersistenceFailure(_)
                | AuthError::HashingFailure
                | AuthError::SigningFailure
                | AuthError::EntropyFailure
        )
    }

    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and crypto errors are sanitized to prevent information
    /// disclosure about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::PersistenceFailure(_)
            | AuthError::HashingFailure
            | AuthError::SigningFailure
            | AuthError::EntropyFailure => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
