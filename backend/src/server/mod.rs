//! Server construction and middleware wiring.

pub mod config;
pub mod cors;

pub use config::{AppSettings, SettingsError};

use std::net::SocketAddr;
use std::sync::Arc;

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::{BoxBody, EitherBody};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use self::cors::cors_middleware;
use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::TripPlanRepository;
use crate::domain::{CredentialLoginService, TripPlanService};
use crate::inbound::http::auth::{login, logout};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::trip_plans;
use crate::outbound::memory::InMemoryTripPlanRepository;
use crate::outbound::persistence::{
    DbPool, DieselTripPlanRepository, MigrationError, PoolConfig, PoolError,
    run_pending_migrations,
};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Failures that stop the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("failed to start HTTP server: {0}")]
    Io(#[from] std::io::Error),
}

/// Cookie and socket settings for [`create_server`].
pub struct ServerConfig {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub cors_allowed_origins: Vec<String>,
    pub bind_addr: SocketAddr,
}

/// Everything an [`App`] instance needs; cloned once per worker.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
    pub cors_allowed_origins: Vec<String>,
}

/// Choose the record store and wire the domain services.
///
/// A configured database URL selects PostgreSQL, running migrations first
/// when enabled; otherwise records live in memory for the process lifetime.
///
/// # Errors
///
/// Returns [`StartupError`] for unusable settings, an unbuildable pool or a
/// failed migration.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let login_service = Arc::new(CredentialLoginService::new(settings.login_credentials()?));
    let repository: Arc<dyn TripPlanRepository> = match settings.database_url() {
        Some(url) => {
            if settings.run_migrations() {
                run_pending_migrations(url).await?;
            }
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()?),
            )
            .await?;
            info!("using PostgreSQL record store");
            Arc::new(DieselTripPlanRepository::new(pool))
        }
        None => {
            warn!("no database configured; trip plans are kept in memory only");
            Arc::new(InMemoryTripPlanRepository::new())
        }
    };

    let service = Arc::new(TripPlanService::new(repository, Arc::new(DefaultClock)));
    Ok(HttpState::new(login_service, service.clone(), service))
}

/// Build the application: CORS and trace middleware, session-scoped API,
/// health endpoints and Swagger UI in debug builds.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
        cors_allowed_origins,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(12)),
        )
        .build();

    let api = web::scope("/api/v1")
        .wrap(session)
        .service(login)
        .service(logout)
        .configure(trip_plans::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(cors_middleware(&cors_allowed_origins))
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Bind the HTTP server and mark the service ready.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        cors_allowed_origins,
        bind_addr,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        key,
        cookie_secure,
        same_site,
        cors_allowed_origins,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "trip planner listening");
    health_state.mark_ready();
    Ok(server)
}
