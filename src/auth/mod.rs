//! Authentication module providing credential verification, token issuance,
//! and request authorization.
//!
//! This module implements the authentication core with:
//! - Argon2id password hashing with per-hash random salts
//! - Stateless HS256 access tokens (one-hour maximum expiry)
//! - Opaque, server-side revocable refresh tokens (60-day expiry)
//! - Bearer and service-key extraction from authorization header values
//! - Per-resource ownership checks for mutating operations
//!
//! ## Example
//!
//! ```no_run
//! use aviary_auth::auth::{AuthManager, LoginRequest};
//! use aviary_auth::db::{Database, DatabaseConfig, PgSessionStore};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::from_env()).await?;
//!     let store = Arc::new(PgSessionStore::new(db.pool().clone()));
//!     let auth = AuthManager::new(
//!         store,
//!         "signing-secret-at-least-32-chars!".to_string(),
//!         "service-integration-key".to_string(),
//!     );
//!
//!     // Resolve an inbound request to a user identity.
//!     let user_id = auth.authenticate_access(Some("Bearer eyJhbGciOi..."))?;
//!     println!("authenticated as {user_id}");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod guard;
pub mod headers;
pub mod manager;
pub mod models;
pub mod password;
pub mod token;

pub use errors::{AuthError, AuthResult};
pub use guard::check_ownership;
pub use headers::{authorize_service_key, extract_bearer, extract_service_key};
pub use manager::AuthManager;
pub use models::{
    LoginRequest, LoginSession, RefreshTokenRecord, RefreshedToken, RegisterRequest, User, UserId,
    UserRecord,
};
pub use token::AccessTokenClaims;
