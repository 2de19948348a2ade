//! Driving port for the login gate.
//!
//! Inbound adapters authenticate through this port so handler tests can swap
//! in a fixture instead of real credentials.

use async_trait::async_trait;

use crate::domain::{AuthenticatedUser, Error, LoginCredentials};

/// Use-case port for checking login credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the identity to keep in the session.
    async fn authenticate(&self, credentials: &LoginCredentials)
    -> Result<AuthenticatedUser, Error>;
}

/// Fixture authenticator accepting `operator` / `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthenticatedUser, Error> {
        if credentials.username() == "operator" && credentials.password() == "password" {
            Ok(AuthenticatedUser::new(credentials.username()))
        } else {
            Err(Error::unauthorized("invalid credentials"))
        }
    }
}
