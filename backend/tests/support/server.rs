//! Live server harness shared by the behaviour suites.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the [`WorldFixture`] stops the
//! server even if a step panics.

use std::cell::RefCell;
use std::net::TcpListener;
use std::rc::Rc;
use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::dev::ServerHandle;
use actix_web::http::{Method, header};
use actix_web::{HttpServer, web};
use awc::Client;
use mockable::DefaultClock;
use serde_json::Value;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;
use trip_planner::domain::{
    CredentialLoginService, LoginCredentials, TRACE_ID_HEADER, TripPlanService,
};
use trip_planner::inbound::http::health::HealthState;
use trip_planner::inbound::http::state::HttpState;
use trip_planner::outbound::memory::InMemoryTripPlanRepository;
use trip_planner::server::{AppDependencies, build_app};

pub(crate) const USERNAME: &str = "justwravel";
pub(crate) const PASSWORD: &str = "justwravel";
pub(crate) const CLIENT_ORIGIN: &str = "http://localhost:3000";

pub(crate) struct TripPlannerWorld {
    pub(crate) runtime: Runtime,
    pub(crate) local: LocalSet,
    pub(crate) base_url: String,
    pub(crate) server: ServerHandle,
    pub(crate) last_status: Option<u16>,
    pub(crate) last_body: Option<Value>,
    pub(crate) last_trace_id: Option<String>,
    pub(crate) session_cookie: Option<String>,
    pub(crate) created_ids: Vec<String>,
    pub(crate) allowed_origin: Option<String>,
    pub(crate) allows_credentials: bool,
}

pub(crate) type SharedWorld = Rc<RefCell<TripPlannerWorld>>;

pub(crate) struct WorldFixture {
    world: SharedWorld,
}

impl WorldFixture {
    pub(crate) fn world(&self) -> SharedWorld {
        self.world.clone()
    }
}

impl Drop for WorldFixture {
    fn drop(&mut self) {
        let ctx = self.world.borrow();
        let server = ctx.server.clone();
        ctx.local.block_on(&ctx.runtime, async move {
            server.stop(true).await;
        });
    }
}

/// Start a server backed by the in-memory store.
pub(crate) fn world() -> WorldFixture {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime");
    let local = LocalSet::new();

    let (base_url, server) = local
        .block_on(&runtime, spawn_server(in_memory_state()))
        .expect("server starts");

    WorldFixture {
        world: Rc::new(RefCell::new(TripPlannerWorld {
            runtime,
            local,
            base_url,
            server,
            last_status: None,
            last_body: None,
            last_trace_id: None,
            session_cookie: None,
            created_ids: Vec::new(),
            allowed_origin: None,
            allows_credentials: false,
        })),
    }
}

fn in_memory_state() -> HttpState {
    let credentials = LoginCredentials::try_from_parts(USERNAME, PASSWORD).expect("credentials");
    let service = Arc::new(TripPlanService::new(
        Arc::new(InMemoryTripPlanRepository::new()),
        Arc::new(DefaultClock),
    ));
    HttpState::new(
        Arc::new(CredentialLoginService::new(credentials)),
        service.clone(),
        service,
    )
}

async fn spawn_server(http_state: HttpState) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
    let addr = listener.local_addr().map_err(|err| err.to_string())?;
    let deps = AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(http_state),
        key: Key::generate(),
        cookie_secure: false,
        same_site: SameSite::Lax,
        cors_allowed_origins: vec![CLIENT_ORIGIN.to_owned()],
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .disable_signals()
        .workers(1)
        .listen(listener)
        .map_err(|err| err.to_string())?
        .run();

    let handle = server.handle();
    actix_web::rt::spawn(server);

    Ok((format!("http://{addr}"), handle))
}

/// One request issued by a step.
pub(crate) struct RequestSpec<'a> {
    pub(crate) method: Method,
    pub(crate) path: &'a str,
    pub(crate) payload: Option<Value>,
    pub(crate) with_cookie: bool,
}

/// Send `spec`, recording status, trace id, body and any new session cookie.
pub(crate) fn perform(world: &SharedWorld, spec: RequestSpec<'_>) {
    let RequestSpec {
        method,
        path,
        payload,
        with_cookie,
    } = spec;
    let cookie = if with_cookie {
        world.borrow().session_cookie.clone()
    } else {
        None
    };

    let (status, trace_id, set_cookie, body) = {
        let ctx = world.borrow();
        let url = format!("{}{path}", ctx.base_url);
        ctx.local.block_on(&ctx.runtime, async move {
            let mut request = Client::default().request(method, url);
            if let Some(cookie) = cookie {
                request = request.insert_header((header::COOKIE, cookie));
            }
            let mut response = match payload {
                Some(payload) => request.send_json(&payload).await.expect("request"),
                None => request.send().await.expect("request"),
            };
            let status = response.status().as_u16();
            let header_value = |name: &str| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned)
            };
            let trace_id = header_value(TRACE_ID_HEADER);
            let set_cookie = header_value(header::SET_COOKIE.as_str())
                .and_then(|raw| raw.split(';').next().map(str::to_owned));
            let bytes = response.body().await.expect("response body");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("json body")
            };
            (status, trace_id, set_cookie, body)
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.last_trace_id = trace_id;
    ctx.last_body = Some(body);
    if set_cookie.is_some() {
        ctx.session_cookie = set_cookie;
    }
}

/// Log in with the configured account and keep the session cookie.
pub(crate) fn login(world: &SharedWorld) {
    perform(
        world,
        RequestSpec {
            method: Method::POST,
            path: "/api/v1/login",
            payload: Some(serde_json::json!({"username": USERNAME, "password": PASSWORD})),
            with_cookie: false,
        },
    );
    assert_eq!(world.borrow().last_status, Some(200), "login succeeds");
}

/// Send a CORS preflight for `method` on the trips collection from `origin`.
pub(crate) fn preflight(world: &SharedWorld, origin: &str, method: &str) {
    let (status, allowed_origin, allows_credentials) = {
        let ctx = world.borrow();
        let url = format!("{}/api/v1/trips", ctx.base_url);
        let origin = origin.to_owned();
        let method = method.to_owned();
        ctx.local.block_on(&ctx.runtime, async move {
            let response = Client::default()
                .request(Method::OPTIONS, url)
                .insert_header((header::ORIGIN, origin))
                .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, method))
                .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type"))
                .send()
                .await
                .expect("preflight request");
            let header_value = |name: header::HeaderName| {
                response
                    .headers()
                    .get(name)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_owned)
            };
            (
                response.status().as_u16(),
                header_value(header::ACCESS_CONTROL_ALLOW_ORIGIN),
                header_value(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).as_deref() == Some("true"),
            )
        })
    };

    let mut ctx = world.borrow_mut();
    ctx.last_status = Some(status);
    ctx.allowed_origin = allowed_origin;
    ctx.allows_credentials = allows_credentials;
}
