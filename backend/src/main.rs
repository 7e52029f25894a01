//! Backend entry-point: loads settings, wires the marketplace client and
//! starts the HTTP server.

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use price_search::domain::PriceSummaryService;
use price_search::inbound::http::health::HealthState;
use price_search::inbound::http::state::HttpState;
use price_search::outbound::finding::FindingHttpSource;
use price_search::server::{ServerConfig, create_server};
use price_search::settings::AppSettings;

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

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("failed to load settings: {error}"))?;
    let finding_config = settings.finding_config()?;
    let bind_addr = settings.bind_addr()?;
    let policy = settings.upstream_failure_policy();

    let source = FindingHttpSource::new(finding_config)
        .wrap_err("failed to build the marketplace HTTP client")?;
    let service = PriceSummaryService::with_policy(Arc::new(source), policy);
    let config = ServerConfig::new(bind_addr, HttpState::new(Arc::new(service)));

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    info!(%bind_addr, ?policy, "price search listening");
    server.await?;
    Ok(())
}
