use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tenantly_auth::AuthService;

mod auth;
mod health;
mod locations;
mod tenants;
mod users;

pub use auth::{SessionPayload, SessionResponse, SignInResponse, SignOutResponse, SignUpResponse};

use crate::middleware::require_auth;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub pool: SqlitePool,
    pub auth: AuthService,
}

pub fn router(state: AppState) -> Router {
    // Tenant-scoped CRUD and profile routes sit behind the session guard
    let protected = Router::new()
        .route("/users/me", get(users::me))
        .route("/tenants/current", get(tenants::current))
        .route(
            "/locations",
            get(locations::list).post(locations::create),
        )
        .route(
            "/locations/{id}",
            get(locations::detail)
                .put(locations::update)
                .delete(locations::remove),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(state.pool.clone())
        .merge(
            Router::new()
                // Authentication endpoints (public)
                .route("/auth/sign-up", post(auth::sign_up))
                .route("/auth/sign-in", post(auth::sign_in))
                .route("/auth/sign-out", post(auth::sign_out))
                .route("/auth/session", get(auth::session))
                .merge(protected)
                .with_state(state),
        )
}
