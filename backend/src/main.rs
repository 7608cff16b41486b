//! Backend entry-point: loads settings, prepares the store and serves HTTP.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use ortho_config::OrthoConfig as _;
use server::{AppSettings, ServerConfig, Store, create_server};
use workout_planner::inbound::http::health::HealthState;
use workout_planner::inbound::http::session_config::{BuildMode, session_settings_from_env};
use workout_planner::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Open the pool after applying pending migrations.
async fn connect_store(settings: &AppSettings, database_url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(database_url)
        .await
        .map_err(|err| std::io::Error::other(format!("database migration failed: {err}")))?;
    let pool = DbPool::new(
        PoolConfig::new(database_url).with_max_size(settings.db_max_connections()),
    )
    .await
    .map_err(|err| std::io::Error::other(format!("database pool failed: {err}")))?;
    info!(max_connections = settings.db_max_connections(), "database pool ready");
    Ok(pool)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let store = match settings.database_url.as_deref() {
        Some(database_url) => Store::Postgres(connect_store(&settings, database_url).await?),
        None => Store::Memory,
    };
    let config = ServerConfig::new(session, settings.bind_addr()).with_store(store);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::build_metrics());

    info!(addr = %settings.bind_addr(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
