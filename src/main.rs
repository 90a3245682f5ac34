//! Estate Hub Server: real-estate listing API.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, fmt};

use estate_core::config::AppConfig;
use estate_core::error::{AppError, ErrorKind};
use estate_core::traits::storage::StorageProvider;

#[tokio::main]
async fn main() {
    let env = std::env::var("ESTATE_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");
    if config.auth.uses_default_secret() {
        tracing::warn!(
            "auth.jwt_secret is the built-in placeholder; set ESTATE__AUTH__JWT_SECRET before deploying"
        );
    }

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Estate Hub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database pool + schema ───────────────────────────
    let db = estate_database::DatabasePool::connect(&config.database).await?;

    estate_database::schema::ensure_schema(db.pool()).await;

    // ── Step 2: Photo storage ────────────────────────────────────
    let provider = estate_storage::LocalStorageProvider::new(&config.storage.upload_dir).await?;
    tracing::info!(
        upload_dir = %provider.root().display(),
        public_path = %config.storage.public_path,
        "Photo storage ready"
    );
    let storage: Arc<dyn StorageProvider> = Arc::new(provider);

    // ── Step 3: Services + router ────────────────────────────────
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let bootstrap_admin = config.auth.bootstrap_admin.clone();

    let state = estate_api::AppState::new(config, db.clone(), storage);

    if let Some(admin) = bootstrap_admin {
        if let Err(e) = state.auth_service.ensure_bootstrap_admin(&admin).await {
            tracing::error!(error = %e, "Failed to create bootstrap admin");
        }
    }

    let app = estate_api::build_app(state);

    // ── Step 4: Serve ────────────────────────────────────────────
    let listener = TcpListener::bind(&bind_addr).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to bind {bind_addr}"),
            e,
        )
    })?;

    estate_api::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
