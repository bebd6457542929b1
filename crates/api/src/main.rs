use std::net::SocketAddr;
use std::sync::Arc;

use stencil_api::config::{ServerConfig, StoreBackend};
use stencil_api::router::build_app_router;
use stencil_api::state::AppState;
use stencil_db::store::{
    MemoryTemplateStore, MemoryUserStore, PgTemplateStore, PgUserStore, TemplateStore, UserStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "Server failed");
        std::process::exit(1);
    }
}

/// Install the global subscriber. `LOG_FORMAT=json` switches to JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stencil_api=debug,tower_http=debug".into());

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run() -> Result<(), BoxError> {
    // --- Configuration ---
    let config = ServerConfig::from_env()?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Stores ---
    let (template_store, user_store) = build_stores(&config.store).await?;

    // --- Router ---
    let addr = SocketAddr::new(config.host.parse()?, config.port);
    let app = build_app_router(
        AppState::new(config.clone(), template_store, user_store),
        &config,
    );

    // --- Start server ---
    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Connect the configured backend and return its template and user stores.
async fn build_stores(
    backend: &StoreBackend,
) -> Result<(Arc<dyn TemplateStore>, Arc<dyn UserStore>), BoxError> {
    match backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = stencil_db::create_pool(database_url, *max_connections).await?;
            tracing::info!(max_connections, "Database connection pool created");

            stencil_db::health_check(&pool).await?;
            tracing::info!("Database health check passed");

            stencil_db::run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            let templates: Arc<dyn TemplateStore> = Arc::new(PgTemplateStore::new(pool.clone()));
            let users: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool));
            Ok((templates, users))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory stores; data is lost on restart");
            let templates: Arc<dyn TemplateStore> = Arc::new(MemoryTemplateStore::new());
            let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            Ok((templates, users))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
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
