use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inventory_guest::admin_api::AdminApiClient;
use inventory_guest::background::cart_expiry;
use inventory_guest::cart_store::CartStore;
use inventory_guest::config::GuestConfig;
use inventory_guest::router::build_app_router;
use inventory_guest::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_guest=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = GuestConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        admin_api_url = %config.admin_api_url,
        "Loaded guest configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = inventory_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    inventory_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    inventory_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Admin API ---
    let admin_api = AdminApiClient::new(
        config.admin_api_url.clone(),
        Duration::from_secs(config.admin_api_timeout_secs),
    )
    .expect("Failed to build admin API client");

    // --- Carts ---
    let carts = Arc::new(CartStore::new(config.cart_ttl()));
    let cancel = CancellationToken::new();
    let expiry_handle = tokio::spawn(cart_expiry::run(
        carts.clone(),
        cart_expiry::SWEEP_INTERVAL,
        cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        admin_api: Arc::new(admin_api),
        carts,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting guest storefront");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    cancel.cancel();
    if let Err(e) = expiry_handle.await {
        tracing::error!(error = %e, "Cart expiry job panicked");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
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
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
