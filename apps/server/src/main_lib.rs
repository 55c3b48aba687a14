use std::sync::Arc;

use crate::config::Config;
use folio_core::portfolios::{PortfolioService, PortfolioServiceTrait};
use folio_core::utils::time_utils::SystemClock;
use folio_storage_sqlite::{db, portfolios::PortfolioRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool, writer));
    let portfolio_service = Arc::new(PortfolioService::new(
        portfolio_repository,
        Arc::new(SystemClock),
        config.view_timezone,
    ));
    tracing::info!("Daily view buckets use timezone {}", config.view_timezone);

    Ok(Arc::new(AppState { portfolio_service }))
}
