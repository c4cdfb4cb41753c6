use thiserror::Error;

/// Failures surfaced by the authentication core.
///
/// The web layer owns the translation to HTTP status codes; stores signal
/// not-found with `Option` and password checks with `bool`, so every variant
/// here is either a caller mistake or a genuinely exceptional condition.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Caller-supplied data failed shape or length checks.
    #[error("{0}")]
    InvalidInput(String),

    /// Another user already owns this email address.
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email, password-less account or wrong password. One fixed
    /// message for all three so responses never reveal account existence.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The hashing primitive itself failed; the cause is logged, never shown.
    #[error("password hashing failed")]
    Hash,
}

impl From<validator::ValidationErrors> for AuthError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AuthError::InvalidInput(errors.to_string())
    }
}
