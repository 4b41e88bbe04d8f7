//! Roster entry-point: loads settings, seeds the store and serves the API.

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster::domain::{UserStore, UserStoreService};
use roster::inbound::http::health::HealthState;
use roster::server::{ServerConfig, create_server};
use roster::settings::RosterSettings;

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

    let settings = RosterSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let users = settings.initial_users().map_err(std::io::Error::other)?;
    info!(count = users.len(), "seeding user store");

    let service = Arc::new(UserStoreService::new(UserStore::with_users(users)));
    let health_state = web::Data::new(HealthState::new(service.clone()));
    let server = create_server(health_state.clone(), service, ServerConfig::new(bind_addr))?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
