//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use civicdesk::inbound::http::health::HealthState;
use civicdesk::outbound::persistence::{DbPool, run_migrations_blocking};

use server::{Adapters, ServerConfig, ServerSettings, create_server};

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

    let settings =
        ServerSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let cors = settings
        .cors_policy()
        .wrap_err("invalid CIVICDESK_CORS_ORIGINS")?;
    let pool = connect(&settings).await?;
    let adapters = Adapters::select(pool.as_ref());

    if settings.reconcile_sequences {
        let report = adapters
            .reconcile()
            .await
            .map_err(|err| eyre!("sequence reconciliation failed: {err}"))?;
        if !report.malformed.is_empty() {
            warn!(
                malformed = report.malformed.len(),
                "stored identifiers skipped during reconciliation"
            );
        }
    }

    let config = ServerConfig::new(settings.bind_addr()).with_cors(cors);
    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "starting HTTP server");
    let server = create_server(health_state, &adapters, config)
        .wrap_err("failed to start HTTP server")?;
    server.await.wrap_err("HTTP server stopped with an error")
}

/// Apply migrations and open the pool when a database URL is configured.
async fn connect(settings: &ServerSettings) -> Result<Option<DbPool>> {
    let Some(pool_config) = settings.pool_config() else {
        return Ok(None);
    };
    if settings.run_migrations {
        let applied = run_migrations_blocking(pool_config.database_url().to_owned())
            .await
            .wrap_err("failed to apply migrations")?;
        info!(applied, "database migrations complete");
    }
    let pool = DbPool::new(pool_config)
        .await
        .wrap_err("failed to build connection pool")?;
    Ok(Some(pool))
}
