//! Authentication gateway core
//!
//! Composes the credential store, hashing and the session store into the
//! operations the HTTP layer exposes. Every operation is one
//! request-scoped transaction against the database; nothing is cached in
//! memory between requests.

use sqlx::SqlitePool;
use time::Duration;
use tracing::{error, info, warn};
use validator::Validate;

use crate::error::AuthError;
use crate::password::{hash_password, verify_password};
use crate::session::{Session, SessionStore, SessionWithUser};
use crate::user::{User, UserStore};

/// Input for account creation.
#[derive(Debug, Validate)]
pub struct SignUpInput {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub name: Option<String>,
}

/// Input for password sign-in.
#[derive(Debug)]
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// The authentication gateway, constructed once at startup with the shared
/// pool and injected wherever authentication is needed.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    sessions: SessionStore,
}

impl AuthService {
    pub fn new(pool: SqlitePool, session_ttl: Duration) -> Self {
        Self {
            users: UserStore::new(pool.clone()),
            sessions: SessionStore::new(pool, session_ttl),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Create a new account. Does not sign the user in; the caller must
    /// follow with [`AuthService::sign_in`].
    ///
    /// Email uniqueness is decided by the storage UNIQUE index, so two
    /// concurrent sign-ups with one email resolve to exactly one success
    /// and one [`AuthError::EmailTaken`].
    pub async fn sign_up(&self, input: SignUpInput) -> Result<User, AuthError> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::InvalidInput(
                "email and password are required".to_string(),
            ));
        }

        input.validate()?;

        // Fixed case policy: emails are stored and compared lowercased.
        let email = input.email.trim().to_lowercase();
        let name = input.name.as_deref().filter(|n| !n.trim().is_empty());

        let digest = hash_password(&input.password)?;
        let row = self.users.create(&email, Some(&digest), name).await?;

        info!(user_id = %row.id, "user registered");

        Ok(row.into())
    }

    /// Exchange credentials for a fresh session.
    ///
    /// Unknown email, password-less account and wrong password all surface
    /// as the same [`AuthError::InvalidCredentials`] so the response never
    /// reveals whether the account exists.
    pub async fn sign_in(&self, input: SignInInput) -> Result<(Session, User), AuthError> {
        let email = input.email.trim().to_lowercase();

        let Some(row) = self.users.find_by_email(&email).await? else {
            warn!("sign-in attempt for unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        let Some(digest) = row.password_hash.as_deref() else {
            warn!(user_id = %row.id, "sign-in attempt for password-less account");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(&input.password, digest) {
            warn!(user_id = %row.id, "sign-in attempt with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.sessions.create(&row.id).await?;

        info!(user_id = %row.id, "user signed in");

        Ok((session, row.into()))
    }

    /// Best-effort session teardown; a failed delete is logged and swallowed
    /// so the caller can still clear the cookie and report success.
    pub async fn sign_out(&self, token: &str) {
        if let Err(e) = self.sessions.delete(token).await {
            error!(error = %e, "failed to delete session on sign-out");
        }
    }

    /// Resolve a bearer token to its session and owner, if still valid.
    pub async fn session(&self, token: &str) -> Result<Option<SessionWithUser>, AuthError> {
        self.sessions.get(token).await
    }
}
