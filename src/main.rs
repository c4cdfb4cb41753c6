use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::migrate::MigrateDatabase;
use tenantly::routes::AppState;
use tenantly_auth::{AuthService, SessionStore};
use time::Duration;
use tower_http::trace::TraceLayer;

/// tenantly - Multi-tenant SaaS starter
#[derive(Parser)]
#[command(name = "tenantly")]
#[command(about = "Multi-tenant SaaS starter with session-cookie authentication", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Delete expired sessions once and exit
    CleanupSessions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = tenantly::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize tracing + logging
    tenantly::observability::init_observability(
        "tenantly",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => serve_command(config, host, port).await,
        Commands::Migrate => migrate_command(config).await,
        Commands::Reset => reset_command(config).await,
        Commands::CleanupSessions => cleanup_sessions_command(config).await,
    }
}

#[tracing::instrument(skip(config))]
async fn serve_command(
    config: tenantly::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting tenantly server...");

    // Use CLI overrides if provided, otherwise use config
    let host = host_override.unwrap_or_else(|| config.server.host.clone());
    let port = port_override.unwrap_or(config.server.port);

    // Set up database connection pool with optimized PRAGMAs
    let pool =
        tenantly::db::create_pool(&config.database.url, config.database.max_connections).await?;

    // The gateway is built once here and injected everywhere via state
    let auth = AuthService::new(
        pool.clone(),
        Duration::days(config.auth.session_ttl_days),
    );

    // Periodic expired-session sweep
    let sched = tenantly::scheduler::session_cleanup(auth.sessions())
        .await
        .map_err(|e| anyhow::anyhow!("failed to build session cleanup job: {e}"))?;
    sched
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("failed to start session cleanup job: {e}"))?;

    let state = AppState { config, pool, auth };

    let app = tenantly::routes::router(state).layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so in-flight requests can drain
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }
}

#[tracing::instrument(skip(config))]
async fn migrate_command(config: tenantly::Config) -> Result<()> {
    tracing::info!("Running database migrations...");

    // Create database if it doesn't exist
    if !sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::info!("Database does not exist, creating: {}", config.database.url);
        sqlx::Sqlite::create_database(&config.database.url).await?;
    }

    let pool = tenantly::db::create_pool(&config.database.url, 1).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    tracing::info!("Migrations completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn reset_command(config: tenantly::Config) -> Result<()> {
    tracing::info!("Resetting database...");

    // Drop database if it exists
    if sqlx::Sqlite::database_exists(&config.database.url).await? {
        tracing::warn!("Dropping existing database: {}", config.database.url);
        sqlx::Sqlite::drop_database(&config.database.url).await?;
        tracing::info!("Database dropped successfully");
    } else {
        tracing::info!("Database does not exist, nothing to drop");
    }

    // Run migrate command to recreate and apply migrations
    migrate_command(config).await?;

    tracing::info!("Database reset completed successfully");

    Ok(())
}

#[tracing::instrument(skip(config))]
async fn cleanup_sessions_command(config: tenantly::Config) -> Result<()> {
    let pool = tenantly::db::create_pool(&config.database.url, 1).await?;

    let sessions = SessionStore::new(pool, Duration::days(config.auth.session_ttl_days));
    let count = sessions.cleanup_expired().await?;

    tracing::info!(count, "expired sessions removed");

    Ok(())
}
