pub mod auth;

pub use auth::{clear_session_cookie, require_auth, session_cookie, CurrentUser, SESSION_COOKIE_NAME};
