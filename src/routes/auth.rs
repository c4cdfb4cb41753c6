//! Authentication route handlers

use axum::{extract::State, Json};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use tenantly_auth::{Session, SignInInput, SignUpInput, User};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::info;

use super::AppState;
use crate::error::AppError;
use crate::middleware::{clear_session_cookie, session_cookie, SESSION_COOKIE_NAME};

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session metadata as it appears on the wire.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub session_token: String,
    pub expires: String,
}

impl SessionPayload {
    fn new(session: &Session) -> Result<Self, AppError> {
        let expires = OffsetDateTime::from_unix_timestamp(session.expires_at)
            .map_err(|e| AppError::Internal(format!("invalid session expiry: {e}")))?
            .format(&Rfc3339)
            .map_err(|e| AppError::Internal(format!("failed to format session expiry: {e}")))?;

        Ok(Self {
            session_token: session.token.clone(),
            expires,
        })
    }
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Serialize)]
pub struct SignInResponse {
    pub success: bool,
    pub session: SessionPayload,
    pub user: User,
}

#[derive(Serialize)]
pub struct SignOutResponse {
    pub success: bool,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub session: Option<SessionPayload>,
    pub user: Option<User>,
}

/// POST /auth/sign-up - Create an account
///
/// Does not create a session; the client signs in separately.
#[tracing::instrument(skip(state, body), fields(email = %body.email))]
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<Json<SignUpResponse>, AppError> {
    let user = state
        .auth
        .sign_up(SignUpInput {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;

    Ok(Json(SignUpResponse {
        success: true,
        user,
    }))
}

/// POST /auth/sign-in - Exchange credentials for a session cookie
#[tracing::instrument(skip(state, jar, body), fields(email = %body.email))]
pub async fn sign_in(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignInRequest>,
) -> Result<(CookieJar, Json<SignInResponse>), AppError> {
    let (session, user) = state
        .auth
        .sign_in(SignInInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = jar.add(session_cookie(
        &session.token,
        state.auth.sessions().ttl(),
        state.config.auth.cookie_secure,
    ));

    Ok((
        jar,
        Json(SignInResponse {
            success: true,
            session: SessionPayload::new(&session)?,
            user,
        }),
    ))
}

/// POST /auth/sign-out - Best-effort session teardown
///
/// The cookie is cleared and success reported whether or not a session
/// existed or its deletion went through.
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SignOutResponse>) {
    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    if let Some(token) = token {
        state.auth.sign_out(&token).await;
        info!("user signed out");
    }

    let jar = jar.add(clear_session_cookie());
    (jar, Json(SignOutResponse { success: true }))
}

/// GET /auth/session - Resolve the cookie to session + user, if any
///
/// A stale cookie is cleared and reported as no session rather than as an
/// error.
pub async fn session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<SessionResponse>), AppError> {
    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    let Some(token) = token else {
        return Ok((
            jar,
            Json(SessionResponse {
                session: None,
                user: None,
            }),
        ));
    };

    match state.auth.session(&token).await? {
        Some(found) => {
            let payload = SessionPayload::new(&found.session)?;
            Ok((
                jar,
                Json(SessionResponse {
                    session: Some(payload),
                    user: Some(found.user),
                }),
            ))
        }
        None => {
            let jar = jar.add(clear_session_cookie());
            Ok((
                jar,
                Json(SessionResponse {
                    session: None,
                    user: None,
                }),
            ))
        }
    }
}
