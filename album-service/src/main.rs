//! album-service - REST backend for the album catalog
//!
//! Serves CRUD endpoints under `/api/albums` over a SQLite album store.

use std::path::PathBuf;

use album_common::config::{self, ConfigOverrides, ServiceConfig, TomlConfig};
use album_service::{build_router, AppState};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for album-service
#[derive(Parser, Debug)]
#[command(name = "album-service")]
#[command(about = "REST backend for the album catalog")]
#[command(version)]
struct Args {
    /// Database connection string (sqlite://path/to/albums.db)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// TOML config file
    #[arg(short, long, env = "ALBUMS_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config file is read before tracing starts so it can set the log level
    let config_path = args.config.clone().unwrap_or_else(config::default_config_path);
    let file_config = config::load_toml_config(&config_path);
    let log_level = file_config
        .as_ref()
        .ok()
        .and_then(Option::as_ref)
        .and_then(|c| c.logging.level.clone())
        .unwrap_or_else(|| config::DEFAULT_LOG_LEVEL.to_string());

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=debug", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting album-service v{}", env!("CARGO_PKG_VERSION"));

    let file_config = match file_config.context("Failed to load config file")? {
        Some(file_config) => {
            info!("Loaded config file: {}", config_path.display());
            file_config
        }
        None => {
            warn!("Config file not found at {}, using defaults", config_path.display());
            TomlConfig::default()
        }
    };
    let config = ServiceConfig::resolve(
        ConfigOverrides {
            database_url: args.database_url,
            host: args.host,
            port: args.port,
        },
        file_config,
    );
    info!("Database: {}", config.database_url);

    let pool = match album_service::db::init_database_pool(&config.database_url).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {:#}", e);
            return Err(e);
        }
    };

    let app = build_router(AppState::new(pool));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("album-service listening on http://{}", addr);
    info!("Health check: http://{}/api/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
