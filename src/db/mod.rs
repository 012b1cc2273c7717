//! Database module providing PostgreSQL connection pooling and the session
//! store collaborator.
//!
//! The authentication core does not own storage: it talks to a
//! [`SessionStore`] for user credential records and refresh tokens. This
//! module provides the pool wrapper, its configuration, and the PostgreSQL
//! implementation of the store.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     email         TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     created_at    TIMESTAMP NOT NULL DEFAULT NOW(),
//!     updated_at    TIMESTAMP NOT NULL DEFAULT NOW(),
//!     is_upgraded   BOOLEAN NOT NULL DEFAULT FALSE
//! );
//!
//! CREATE TABLE refresh_tokens (
//!     token      TEXT PRIMARY KEY,
//!     user_id    UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
//!     created_at TIMESTAMP NOT NULL DEFAULT NOW(),
//!     expires_at TIMESTAMP NOT NULL,
//!     revoked_at TIMESTAMP
//! );
//! ```

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

pub mod config;
pub mod repository;

pub use config::DatabaseConfig;
pub use repository::{PgSessionStore, SessionStore};

/// Database connection pool wrapper
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// # Arguments
    ///
    /// * `config` - Database configuration
    ///
    /// # Returns
    ///
    /// * `Result<Database, sqlx::Error>` - Database instance or error
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect(&config.database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check if the database connection is healthy
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        self.pool.close().await;
    }
}
