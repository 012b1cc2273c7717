//! Session store trait and its PostgreSQL implementation.
//!
//! The trait abstracts the persistence collaborator the authentication core
//! depends on, enabling dependency injection and an in-memory mock for
//! tests. The core assumes at-least read-your-writes consistency per token;
//! the store's own consistency is its own responsibility.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::auth::errors::{AuthError, AuthResult};
use crate::auth::models::{RefreshTokenRecord, UserId, UserRecord};

/// Persistence operations for user credential records and refresh tokens
///
/// All failures surface immediately as errors; the core performs no internal
/// retries.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new user with a hashed credential
    async fn create_user(&self, email: &str, password_hash: &str) -> AuthResult<UserRecord>;

    /// Fetch a user's credential record by email
    ///
    /// Fails with `AuthError::UserNotFound` if no such user exists.
    async fn get_user_by_email(&self, email: &str) -> AuthResult<UserRecord>;

    /// Replace a user's email and password hash
    async fn update_user_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<UserRecord>;

    /// Mark a user as upgraded-tier
    async fn set_tier_flag(&self, user_id: UserId) -> AuthResult<()>;

    /// Insert a new refresh token record
    ///
    /// The core does not check for collisions; the storage layer's
    /// uniqueness constraint on the token column is the backstop.
    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()>;

    /// Look up a refresh token record by its opaque value
    ///
    /// Fails with `AuthError::SessionNotFound` if absent.
    async fn lookup_refresh_token(&self, token: &str) -> AuthResult<RefreshTokenRecord>;

    /// Stamp every refresh token belonging to `user_id` as revoked
    ///
    /// Records are retained, not deleted.
    async fn revoke_refresh_tokens(&self, user_id: UserId) -> AuthResult<()>;

    /// Delete all users (refresh tokens cascade). Dev/test reset only.
    async fn delete_all_users(&self) -> AuthResult<()>;
}

/// Default PostgreSQL implementation of [`SessionStore`]
pub struct PgSessionStore {
    pool: PgPool,
}

impl PgSessionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn user_from_row(row: &sqlx::postgres::PgRow) -> UserRecord {
        UserRecord {
            id: row.get("id"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            updated_at: row.get::<chrono::NaiveDateTime, _>("updated_at").and_utc(),
            is_upgraded: row.get("is_upgraded"),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create_user(&self, email: &str, password_hash: &str) -> AuthResult<UserRecord> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at, is_upgraded
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(Self::user_from_row(&row))
    }

    async fn get_user_by_email(&self, email: &str) -> AuthResult<UserRecord> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, created_at, updated_at, is_upgraded
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::UserNotFound)?;

        Ok(Self::user_from_row(&row))
    }

    async fn update_user_credentials(
        &self,
        user_id: UserId,
        email: &str,
        password_hash: &str,
    ) -> AuthResult<UserRecord> {
        let row = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, created_at, updated_at, is_upgraded
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::UserNotFound)?;

        Ok(Self::user_from_row(&row))
    }

    async fn set_tier_flag(&self, user_id: UserId) -> AuthResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_upgraded = TRUE, updated_at = NOW() WHERE id = $1",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    async fn create_refresh_token(
        &self,
        token: &str,
        user_id: UserId,
        expires_at: DateTime<Utc>,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn lookup_refresh_token(&self, token: &str) -> AuthResult<RefreshTokenRecord> {
        let row = sqlx::query(
            r#"
            SELECT user_id, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AuthError::SessionNotFound)?;

        Ok(RefreshTokenRecord {
            user_id: row.get("user_id"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
            expires_at: row.get::<chrono::NaiveDateTime, _>("expires_at").and_utc(),
            revoked_at: row
                .get::<Option<chrono::NaiveDateTime>, _>("revoked_at")
                .map(|dt| dt.and_utc()),
        })
    }

    async fn revoke_refresh_tokens(&self, user_id: UserId) -> AuthResult<()> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_all_users(&self) -> AuthResult<()> {
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }
}

/// Mock implementation for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// In-memory [`SessionStore`] with the same contracts as the Postgres
    /// implementation.
    pub struct MemorySessionStore {
        users: Mutex<HashMap<UserId, UserRecord>>,
        tokens: Mutex<HashMap<String, RefreshTokenRecord>>,
    }

    impl Default for MemorySessionStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MemorySessionStore {
        pub fn new() -> Self {
            Self {
                users: Mutex::new(HashMap::new()),
                tokens: Mutex::new(HashMap::new()),
            }
        }

        /// Fetch a user row directly, bypassing the trait.
        pub fn user_record(&self, user_id: UserId) -> Option<UserRecord> {
            self.users.lock().unwrap().get(&user_id).cloned()
        }

        /// Fetch a refresh token row directly, bypassing the trait.
        pub fn refresh_token_record(&self, token: &str) -> Option<RefreshTokenRecord> {
            self.tokens.lock().unwrap().get(token).cloned()
        }

        /// Number of persisted refresh token records.
        pub fn refresh_token_count(&self) -> usize {
            self.tokens.lock().unwrap().len()
        }

        /// Seed a refresh token row directly, e.g. an already-expired one.
        pub fn insert_refresh_token(&self, token: &str, record: RefreshTokenRecord) {
            self.tokens.lock().unwrap().insert(token.to_string(), record);
        }
    }

    #[async_trait]
    impl SessionStore for MemorySessionStore {
        async fn create_user(&self, email: &str, password_hash: &str) -> AuthResult<UserRecord> {
            let now = Utc::now();
            let record = UserRecord {
                id: Uuid::new_v4(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                created_at: now,
                updated_at: now,
                is_upgraded: false,
            };

            self.users.lock().unwrap().insert(record.id, record.clone());
            Ok(record)
        }

        async fn get_user_by_email(&self, email: &str) -> AuthResult<UserRecord> {
            self.users
                .lock()
                .unwrap()
                .values()
                .find(|u| u.email == email)
                .cloned()
                .ok_or(AuthError::UserNotFound)
        }

        async fn update_user_credentials(
            &self,
            user_id: UserId,
            email: &str,
            password_hash: &str,
        ) -> AuthResult<UserRecord> {
            let mut users = self.users.lock().unwrap();
            let record = users.get_mut(&user_id).ok_or(AuthError::UserNotFound)?;
            record.email = email.to_string();
            record.password_hash = password_hash.to_string();
            record.updated_at = Utc::now();
            Ok(record.clone())
        }

        async fn set_tier_flag(&self, user_id: UserId) -> AuthResult<()> {
            let mut users = self.users.lock().unwrap();
            let record = users.get_mut(&user_id).ok_or(AuthError::UserNotFound)?;
            record.is_upgraded = true;
            record.updated_at = Utc::now();
            Ok(())
        }

        async fn create_refresh_token(
            &self,
            token: &str,
            user_id: UserId,
            expires_at: DateTime<Utc>,
        ) -> AuthResult<()> {
            self.tokens.lock().unwrap().insert(
                token.to_string(),
                RefreshTokenRecord {
                    user_id,
                    created_at: Utc::now(),
                    expires_at,
                    revoked_at: None,
                },
            );
            Ok(())
        }

        async fn lookup_refresh_token(&self, token: &str) -> AuthResult<RefreshTokenRecord> {
            self.tokens
                .lock()
                .unwrap()
                .get(token)
                .cloned()
                .ok_or(AuthError::SessionNotFound)
        }

        async fn revoke_refresh_tokens(&self, user_id: UserId) -> AuthResult<()> {
            let now = Utc::now();
            for record in self.tokens.lock().unwrap().values_mut() {
                if record.user_id == user_id && record.revoked_at.is_none() {
                    record.revoked_at = Some(now);
                }
            }
            Ok(())
        }

        async fn delete_all_users(&self) -> AuthResult<()> {
            self.users.lock().unwrap().clear();
            self.tokens.lock().unwrap().clear();
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::Duration;

        #[tokio::test]
        async fn test_mock_user_lifecycle() {
            let store = MemorySessionStore::new();

            let created = store.create_user("walt@example.com", "hash").await.unwrap();
            let fetched = store.get_user_by_email("walt@example.com").await.unwrap();
            assert_eq!(fetched.id, created.id);
            assert!(!fetched.is_upgraded);

            store.set_tier_flag(created.id).await.unwrap();
            let fetched = store.get_user_by_email("walt@example.com").await.unwrap();
            assert!(fetched.is_upgraded);
        }

        #[tokio::test]
        async fn test_mock_unknown_user_is_not_found() {
            let store = MemorySessionStore::new();
            let err = store.get_user_by_email("nobody@example.com").await.unwrap_err();
            assert!(matches!(err, AuthError::UserNotFound));
        }

        #[tokio::test]
        async fn test_mock_revoke_stamps_only_the_owners_tokens() {
            let store = MemorySessionStore::new();
            let alice = store.create_user("alice@example.com", "hash").await.unwrap();
            let bob = store.create_user("bob@example.com", "hash").await.unwrap();

            let expires = Utc::now() + Duration::hours(1);
            store.create_refresh_token("alice-token", alice.id, expires).await.unwrap();
            store.create_refresh_token("bob-token", bob.id, expires).await.unwrap();

            store.revoke_refresh_tokens(alice.id).await.unwrap();

            let alices = store.lookup_refresh_token("alice-token").await.unwrap();
            assert!(alices.revoked_at.is_some());

            let bobs = store.lookup_refresh_token("bob-token").await.unwrap();
            assert!(bobs.revoked_at.is_none());
        }

        #[tokio::test]
        async fn test_mock_reset_clears_everything() {
            let store = MemorySessionStore::new();
            let user = store.create_user("walt@example.com", "hash").await.unwrap();
            store
                .create_refresh_token("t", user.id, Utc::now() + Duration::hours(1))
                .await
                .unwrap();

            store.delete_all_users().await.unwrap();

            assert!(store.get_user_by_email("walt@example.com").await.is_err());
            assert_eq!(store.refresh_token_count(), 0);
        }
    }
}
