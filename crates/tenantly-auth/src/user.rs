//! Credential store

use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;
use ulid::Ulid;

use crate::error::AuthError;

/// Full user row including the password hash. Stays inside this crate's
/// callers; it is never serialized.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub tenant_id: Option<String>,
    pub onboarding_completed: bool,
    pub email_verified: bool,
    pub created_at: i64,
}

/// Safe projection of a user, the only shape that crosses the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub tenant_id: Option<String>,
    pub onboarding_completed: bool,
    pub email_verified: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            tenant_id: row.tenant_id,
            onboarding_completed: row.onboarding_completed,
            email_verified: row.email_verified,
        }
    }
}

/// Persistent store for user identities and credentials.
///
/// Constructed once at startup and injected into [`crate::AuthService`];
/// uniqueness of `email` is enforced by the table's UNIQUE index, not by a
/// lookup in this store.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user. New accounts start without a tenant and with
    /// onboarding and email verification pending.
    ///
    /// A concurrent insert with the same email loses against the UNIQUE
    /// index and surfaces as [`AuthError::EmailTaken`].
    pub async fn create(
        &self,
        email: &str,
        password_hash: Option<&str>,
        name: Option<&str>,
    ) -> Result<UserRow, AuthError> {
        let id = Ulid::new().to_string();
        let created_at = OffsetDateTime::now_utc().unix_timestamp();

        let result = sqlx::query(
            "INSERT INTO users (id, email, password_hash, name, tenant_id, onboarding_completed, email_verified, created_at)
             VALUES (?, ?, ?, ?, NULL, 0, 0, ?)",
        )
        .bind(&id)
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(created_at)
        .execute(&self.pool)
        .await;

        if let Err(e) = result {
            return Err(match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::EmailTaken,
                other => AuthError::Database(other),
            });
        }

        Ok(UserRow {
            id,
            email: email.to_string(),
            password_hash: password_hash.map(str::to_string),
            name: name.map(str::to_string),
            tenant_id: None,
            onboarding_completed: false,
            email_verified: false,
            created_at,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, AuthError> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, name, tenant_id, onboarding_completed, email_verified, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<UserRow>, AuthError> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, name, tenant_id, onboarding_completed, email_verified, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}
