use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use merch_api::config::ServerConfig;
use merch_api::router::build_app_router;
use merch_api::state::AppState;
use merch_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "merch_api=debug,merch_db=info,tower_http=debug";

/// `RUST_LOG` overrides the filter; `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Connect, verify, and migrate. Any failure aborts startup.
async fn prepare_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = merch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    merch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    merch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!(connections = pool.size(), "Database ready, migrations applied");
    pool
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        metrics_window_days = config.metrics_window_days,
        cors_origins = ?config.cors_origins,
        "Configuration loaded"
    );

    let pool = prepare_database().await;
    let app = build_app_router(
        AppState {
            pool: pool.clone(),
            config: Arc::new(config.clone()),
        },
        &config,
    );

    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Shutdown complete");
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
        "SIGINT"
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
        "SIGTERM"
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<&str>();

    let signal = tokio::select! {
        name = interrupt => name,
        name = terminate => name,
    };
    tracing::info!(signal, "Shutting down gracefully");
}
