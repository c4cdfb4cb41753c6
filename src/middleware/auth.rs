//! Session-cookie authentication guard for Axum

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tenantly_auth::{Session, User};
use time::Duration;
use tracing::{debug, error, warn};

use crate::error::AppError;
use crate::routes::AppState;

/// Cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "tenantly_session";

/// Authenticated caller, inserted into request extensions by [`require_auth`].
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub session: Session,
    pub user: User,
}

/// Build the session cookie set on sign-in.
pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(ttl)
        .build()
}

/// Build the clearing cookie: empty value, immediate expiry.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}

/// Authentication middleware guarding protected routes
///
/// Extracts the session cookie, resolves it through the session store and
/// inserts [`CurrentUser`] for handlers. Missing, invalid and expired
/// sessions all get 401 with the cookie cleared; clearing happens on every
/// denial, including after lookup failures.
pub async fn require_auth(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    let Some(token) = token else {
        warn!("request to protected route without session cookie");
        return deny(jar);
    };

    match state.auth.session(&token).await {
        Ok(Some(found)) => {
            debug!(user_id = %found.user.id, "request authenticated");
            request.extensions_mut().insert(CurrentUser {
                session: found.session,
                user: found.user,
            });
            next.run(request).await
        }
        Ok(None) => {
            warn!("invalid or expired session token");
            deny(jar)
        }
        Err(e) => {
            error!(error = %e, "session lookup failed");
            let jar = jar.add(clear_session_cookie());
            (jar, AppError::from(e)).into_response()
        }
    }
}

fn deny(jar: CookieJar) -> Response {
    let jar = jar.add(clear_session_cookie());
    (
        jar,
        AppError::Unauthorized("authentication required".to_string()),
    )
        .into_response()
}
