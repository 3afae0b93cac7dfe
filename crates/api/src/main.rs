use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use inci_core::store::{InMemoryStore, VolunteerStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inci_api::config::ServerConfig;
use inci_api::router::build_app_router;
use inci_api::seed::seed_demo_data;
use inci_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inci_api=debug,inci_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        upload_dir = %config.upload_dir.display(),
        "Loaded server configuration",
    );

    // --- Store ---
    let (store, backend): (Arc<dyn VolunteerStore>, &'static str) =
        match config.database_url.as_deref() {
            Some(database_url) => {
                let pool = inci_db::create_pool(database_url)
                    .await
                    .expect("Failed to connect to database");
                tracing::info!("Database connection pool created");

                inci_db::health_check(&pool)
                    .await
                    .expect("Database health check failed");
                tracing::info!("Database health check passed");

                inci_db::run_migrations(&pool)
                    .await
                    .expect("Failed to run database migrations");
                tracing::info!("Database migrations applied");

                (Arc::new(inci_db::PgStore::new(pool)), "postgres")
            }
            None => {
                tracing::warn!("DATABASE_URL not set, data lives in memory and is lost on exit");
                (Arc::new(InMemoryStore::new()), "memory")
            }
        };

    // --- Demo data ---
    if config.seed_demo_data {
        seed_demo_data(store.as_ref(), Utc::now().date_naive())
            .await
            .expect("Failed to seed demo data");
    }

    // --- Router ---
    let state = AppState::new(store, backend, Arc::new(config.clone()));
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, storage = backend, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
