//! Tests for server bootstrap and readiness signalling.

use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::web;
use rstest::{fixture, rstest};

use super::{ServerConfig, create_server};
use crate::domain::PriceSummaryService;
use crate::domain::ports::FixtureMarketplaceSearch;
use crate::inbound::http::health::HealthState;
use crate::inbound::http::state::HttpState;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn server_config() -> ServerConfig {
    let bind_addr: SocketAddr = "127.0.0.1:0".parse().expect("static socket address");
    let service = PriceSummaryService::new(Arc::new(FixtureMarketplaceSearch::default()));
    ServerConfig::new(bind_addr, HttpState::new(Arc::new(service)))
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) {
    assert!(!health_state.is_ready(), "state should start unready");

    let server = create_server(health_state.clone(), server_config).expect("server should bind");

    assert!(health_state.is_ready(), "state should be ready after bind");
    server.handle().stop(true).await;
}

#[rstest]
fn server_config_exposes_bind_addr(server_config: ServerConfig) {
    assert_eq!(server_config.bind_addr().port(), 0);
    assert!(server_config.bind_addr().ip().is_loopback());
}
