pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod queries;
pub mod routes;
pub mod scheduler;

pub use crate::config::Config;
pub use crate::db::create_pool;
pub use crate::routes::AppState;

/// Create app router for testing
///
/// This function creates the Axum router with all routes configured,
/// useful for integration testing without starting the full server.
pub async fn create_app(pool: sqlx::SqlitePool) -> anyhow::Result<axum::Router> {
    use crate::config::{AuthConfig, DatabaseConfig, ObservabilityConfig, ServerConfig};
    use tenantly_auth::AuthService;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            secret: "test-secret-key-minimum-32-characters".to_string(),
            session_ttl_days: 30,
            cookie_secure: false,
        },
        observability: ObservabilityConfig::default(),
    };

    let auth = AuthService::new(
        pool.clone(),
        time::Duration::days(config.auth.session_ttl_days),
    );

    let state = AppState { config, pool, auth };

    Ok(routes::router(state))
}
