//! User profile route handlers

use axum::{Extension, Json};
use tenantly_auth::User;

use crate::middleware::CurrentUser;

/// GET /users/me - Safe projection of the authenticated user
pub async fn me(Extension(current): Extension<CurrentUser>) -> Json<User> {
    Json(current.user)
}
