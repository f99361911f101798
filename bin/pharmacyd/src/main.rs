//! `pharmacyd` — the pharmacy management server binary.
//!
//! Usage:
//!   pharmacyd -c <config.toml> [--listen <addr>]
//!
//! Startup is fail-fast: a missing or weak JWT secret, an empty data
//! directory or a missing bootstrap admin hash refuse to start the
//! process, since no request could ever be served correctly.

mod bootstrap;
mod config;
mod login;
mod routes;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use pharmacy_auth::{PolicyRegistry, TokenConfig, TokenService};
use pharmacy_rx::repo::Repositories;
use pharmacy_sql::{SQLStore, SqliteStore};

use config::ServerConfig;
use routes::AppState;

/// Pharmacy management server.
#[derive(Parser, Debug)]
#[command(name = "pharmacyd", about = "Pharmacy management server")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short = 'c', long = "config", required = true)]
    config: String,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config_path = std::path::PathBuf::from(&cli.config);
    info!("Loading configuration from {}", config_path.display());
    let server_config = ServerConfig::load(&config_path)?;
    bootstrap::verify_config(&server_config)?;

    // Token service and policy table: immutable for the process lifetime.
    let tokens = Arc::new(TokenService::new(TokenConfig {
        secret: server_config.jwt.secret.clone(),
        issuer: server_config.jwt.issuer.clone(),
        audience: server_config.jwt.audience.clone(),
        expire_secs: server_config.jwt.expire_secs,
    })?);
    let policies = Arc::new(PolicyRegistry::with_defaults()?);

    // Storage.
    let data_dir = std::path::PathBuf::from(&server_config.storage.data_dir);
    std::fs::create_dir_all(&data_dir)?;
    let sql: Arc<dyn SQLStore> = Arc::new(
        SqliteStore::open(&data_dir.join("pharmacy.sqlite"))
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );
    let repos = Arc::new(Repositories::new(sql).map_err(|e| anyhow::anyhow!("{}", e))?);

    bootstrap::ensure_admin(&repos, &server_config)?;

    let app = routes::build_router(AppState {
        repos,
        policies,
        tokens,
    });

    let listener = tokio::net::TcpListener::bind(&cli.listen).await?;
    info!("pharmacyd listening on {}", cli.listen);
    axum::serve(listener, app).await?;

    Ok(())
}
