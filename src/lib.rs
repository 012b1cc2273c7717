//! # Aviary Auth
//!
//! Token-based authentication and authorization core for the Aviary
//! content service.
//!
//! This library authenticates users by password, issues short-lived signed
//! access tokens, manages long-lived opaque refresh tokens with server-side
//! revocation, and enforces per-resource ownership checks before mutating
//! operations. The surrounding application (routing, JSON mapping, static
//! files) calls into this core to resolve a request to a user identity.
//!
//! ## Architecture
//!
//! - **Credential hashing**: Argon2id with per-hash random salts
//! - **Access tokens**: stateless HS256 JWTs, validated in O(1) with no
//!   store lookup, one-hour maximum lifetime
//! - **Refresh tokens**: opaque 256-bit random values persisted through the
//!   [`db::SessionStore`] collaborator, revocable server-side
//! - **Service-key gate**: static shared-secret check for trusted
//!   server-to-server calls (billing webhook)
//!
//! ## Core Modules
//!
//! - [`auth`]: token codec, credential hashing, header parsing, ownership
//!   guard, and the [`auth::AuthManager`] orchestrating the login, refresh,
//!   and revoke flows
//! - [`db`]: session store trait and its PostgreSQL implementation
//! - [`config`]: process configuration (signing secret, service key)
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
//!     let session = auth
//!         .login(LoginRequest {
//!             email: "walt@example.com".to_string(),
//!             password: "hunter2".to_string(),
//!             expires_in_secs: None,
//!         })
//!         .await?;
//!     println!("access token: {}", session.access_token);
//!     Ok(())
//! }
//! ```

/// Authentication core: tokens, credentials, header parsing, ownership.
pub mod auth;
pub use auth::{AuthError, AuthManager, AuthResult};

/// Process configuration.
pub mod config;
pub use config::AuthConfig;

/// Persistence collaborator for users and refresh tokens.
pub mod db;
pub use db::SessionStore;
