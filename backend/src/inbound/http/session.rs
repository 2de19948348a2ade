//! Session helpers keeping handlers free of `actix-session` details.
//!
//! The session cookie only ever holds the authenticated username.

use actix_session::{Session, SessionExt};
use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AuthenticatedUser, Error};

pub(crate) const USERNAME_KEY: &str = "username";

/// Newtype exposing login-oriented session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Session attached to a request seen by middleware.
    pub fn from_service_request(req: &ServiceRequest) -> Self {
        Self(req.get_session())
    }

    /// Start a fresh session for `user`.
    ///
    /// The session id is renewed so a pre-login cookie cannot be reused.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, user.username())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Username stored in the session, if any.
    ///
    /// Undecodable cookies are treated as anonymous.
    pub fn username(&self) -> Option<String> {
        match self.0.get::<String>(USERNAME_KEY) {
            Ok(Some(username)) if !username.trim().is_empty() => Some(username),
            Ok(_) => None,
            Err(error) => {
                warn!(%error, "unreadable session cookie");
                None
            }
        }
    }

    /// Username or `401 Unauthorized`.
    pub fn require_user(&self) -> Result<String, Error> {
        self.username()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
