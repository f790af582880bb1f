//! Apply migrations and seed the default platform settings.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use connect::config::ConnectSettings;
use connect::outbound::persistence::{
    DbPool, DieselPlatformSettingRepository, PoolConfig, run_pending_migrations,
};
use connect::seeding::seed_platform_settings_on_startup;
use connect::telemetry::init_tracing;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{info, warn};

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = init_tracing() {
        warn!(%error, "tracing init failed");
    }

    let settings = ConnectSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("load configuration: {err}"))?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    runtime.block_on(run(settings))
}

async fn run(settings: ConnectSettings) -> Result<()> {
    let database_url = settings
        .database_url()
        .ok_or_else(|| eyre!("CONNECT_DATABASE_URL is required"))?
        .to_owned();

    let migration_url = database_url.clone();
    let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&migration_url))
        .await
        .wrap_err("join migration task")?
        .wrap_err("apply migrations")?;
    info!(count = applied.len(), versions = ?applied, "migrations applied");

    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("create database pool")?;
    let repository = Arc::new(DieselPlatformSettingRepository::new(pool));

    let report = seed_platform_settings_on_startup(&settings, repository)
        .await
        .wrap_err("seed default settings")?;
    if report.is_complete() {
        Ok(())
    } else {
        let keys: Vec<&str> = report.failed.iter().map(|f| f.key.as_str()).collect();
        Err(eyre!("failed to seed settings: {}", keys.join(", ")))
    }
}
