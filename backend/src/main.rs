//! Incident tracker entry-point: loads settings, prepares the SQLite store
//! and serves the REST API.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use incident_tracker::domain::ConfiguredLoginService;
use incident_tracker::inbound::http::health::HealthState;
use incident_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use incident_tracker::server::{ServerConfig, create_server, shutdown};
use incident_tracker::settings::AppSettings;
use ortho_config::OrthoConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let credentials = settings.credentials()?;
    let bind_addr = settings.bind_addr()?;
    let cors_origins = settings.cors_origins()?;
    let database_url = settings.database_url();

    run_pending_migrations(database_url)
        .await
        .wrap_err_with(|| format!("failed to migrate {database_url}"))?;

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.pool_max_size()?))
        .await
        .wrap_err("failed to build connection pool")?;

    let config = ServerConfig::new(
        bind_addr,
        pool,
        Arc::new(ConfiguredLoginService::new(credentials)),
    )
    .with_cors_origins(cors_origins);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, "incident tracker listening");

    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if actix_web::rt::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, draining");
            shutdown(health_state, handle).await;
        }
    });
    server.await.wrap_err("server terminated with an error")
}
