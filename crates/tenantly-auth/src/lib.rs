//! Authentication core for tenantly
//!
//! Credential storage, password hashing, session-token minting and the
//! session store, composed by [`AuthService`] into the sign-up / sign-in /
//! sign-out / get-session operations the web layer exposes.

pub mod error;
pub mod password;
pub mod service;
pub mod session;
pub mod token;
pub mod user;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, SignInInput, SignUpInput};
pub use session::{Session, SessionStore, SessionWithUser, DEFAULT_SESSION_TTL_DAYS};
pub use token::generate_session_token;
pub use user::{User, UserStore};
