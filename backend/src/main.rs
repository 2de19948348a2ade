//! Trip planner entry-point: loads settings, picks the record store and
//! serves the REST API.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use trip_planner::inbound::http::health::HealthState;
use trip_planner::inbound::http::session_config::{BuildMode, session_settings_from_env};
use trip_planner::server::{AppSettings, ServerConfig, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    run().await.map_err(|err| {
        error!(error = %err, "trip planner failed to start");
        std::io::Error::other(err.to_string())
    })
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = AppSettings::load_from_iter(std::env::args_os())?;
    let session = session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )?;
    let bind_addr = settings.bind_addr()?;
    let cors_allowed_origins = settings.cors_allowed_origins()?;
    let http_state = build_http_state(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state,
        http_state,
        ServerConfig {
            key: session.key,
            cookie_secure: session.cookie_secure,
            same_site: session.same_site,
            cors_allowed_origins,
            bind_addr,
        },
    )?;
    server.await?;
    Ok(())
}
