//! Backend entry-point: loads settings and the token secret, prepares the
//! store, then serves the `/v1` API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::outbound::security::{BuildMode, token_secret_from_process};
use backend::settings::AppSettings;
use ortho_config::OrthoConfig;
use server::{ServerConfig, create_server};

async fn connect(database_url: &str, max_connections: u32) -> std::io::Result<DbPool> {
    let url = database_url.to_owned();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
        .await
        .map_err(|err| std::io::Error::other(format!("migration task failed: {err}")))?
        .map_err(std::io::Error::other)?;
    info!(applied, "database schema up to date");

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(std::io::Error::other)?;
    pool.ping().await.map_err(std::io::Error::other)?;
    Ok(pool)
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(std::io::Error::other)?;
    let token_secret = token_secret_from_process(BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(fingerprint = %token_secret.fingerprint(), "token secret loaded");

    let mut config = ServerConfig::new(settings.bind_addr(), token_secret);
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect(url, settings.db_max_connections()).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = settings.bind_addr(), "starting server");
    let server = create_server(health_state.clone(), config)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
