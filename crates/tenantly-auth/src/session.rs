//! Session store
//!
//! Persistent mapping from opaque bearer token to user and expiry. Expiry is
//! enforced lazily on lookup and in bulk by [`SessionStore::cleanup_expired`];
//! all state lives in the database, so concurrent requests need no
//! coordination beyond the pool.

use sqlx::SqlitePool;
use time::{Duration, OffsetDateTime};
use tracing::debug;
use ulid::Ulid;

use crate::error::AuthError;
use crate::token::generate_session_token;
use crate::user::{User, UserRow};

/// Default session lifetime when configuration says nothing else.
pub const DEFAULT_SESSION_TTL_DAYS: i64 = 30;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Session {
    pub id: String,
    pub token: String,
    pub user_id: String,
    /// Unix seconds; the session is valid only while `now < expires_at`.
    pub expires_at: i64,
    pub created_at: i64,
}

/// A valid session joined with the safe projection of its owner.
#[derive(Debug, Clone)]
pub struct SessionWithUser {
    pub session: Session,
    pub user: User,
}

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(pool: SqlitePool, ttl: Duration) -> Self {
        Self { pool, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a token and persist a new session expiring `ttl` from now.
    pub async fn create(&self, user_id: &str) -> Result<Session, AuthError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let session = Session {
            id: Ulid::new().to_string(),
            token: generate_session_token(),
            user_id: user_id.to_string(),
            expires_at: now + self.ttl.whole_seconds(),
            created_at: now,
        };

        sqlx::query(
            "INSERT INTO sessions (id, token, user_id, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&session.id)
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(session)
    }

    /// Look up a session by exact token.
    ///
    /// An expired row, or a row whose owner no longer exists, is deleted as
    /// a side effect and reported as absent.
    pub async fn get(&self, token: &str) -> Result<Option<SessionWithUser>, AuthError> {
        let session = sqlx::query_as::<_, Session>(
            "SELECT id, token, user_id, expires_at, created_at FROM sessions WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(session) = session else {
            return Ok(None);
        };

        let now = OffsetDateTime::now_utc().unix_timestamp();
        if session.expires_at <= now {
            debug!(session_id = %session.id, "removing expired session on lookup");
            self.delete(token).await?;
            return Ok(None);
        }

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, name, tenant_id, onboarding_completed, email_verified, created_at
             FROM users WHERE id = ?",
        )
        .bind(&session.user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(user) = user else {
            // Owner gone; the row is dead weight even before it expires.
            self.delete(token).await?;
            return Ok(None);
        };

        Ok(Some(SessionWithUser {
            session,
            user: user.into(),
        }))
    }

    /// Remove every row matching the token. Absent rows are not an error.
    pub async fn delete(&self, token: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Revoke every session a user owns, e.g. after a password change.
    pub async fn delete_all_for_user(&self, user_id: &str) -> Result<(), AuthError> {
        sqlx::query("DELETE FROM sessions WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Bulk-delete every expired row, returning how many were removed.
    ///
    /// A single DELETE statement, so concurrent or repeated sweeps are safe.
    pub async fn cleanup_expired(&self) -> Result<u64, AuthError> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
