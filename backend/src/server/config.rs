//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TRIP_PLANNER_*` environment variables, command-line
//! flags and configuration files, in OrthoConfig's usual precedence.

use std::net::SocketAddr;

use actix_web::http::Uri;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::cors::DEFAULT_CORS_ORIGIN;
use crate::domain::{LoginCredentials, LoginValidationError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_LOGIN: &str = "justwravel";

/// Startup settings for the trip planner server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TRIP_PLANNER")]
pub struct AppSettings {
    /// Socket address to listen on, `0.0.0.0:4000` when unset.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without it records live in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Apply embedded migrations before serving; on unless set to false.
    pub run_migrations: Option<bool>,
    pub login_username: Option<String>,
    pub login_password: Option<String>,
    /// Comma-separated browser origins allowed to call the API with
    /// credentials, `http://localhost:3000` when unset.
    pub cors_allowed_origins: Option<String>,
}

/// Settings that parse but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
    #[error("invalid login account: {0}")]
    Login(#[from] LoginValidationError),
    #[error("invalid CORS origin '{value}': expected scheme://host[:port]")]
    CorsOrigin { value: String },
}

impl AppSettings {
    /// Listening address.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether embedded migrations run at startup.
    #[must_use]
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Pool size.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ZeroConnections`] for a zero pool size.
    pub fn db_max_connections(&self) -> Result<u32, SettingsError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(SettingsError::ZeroConnections),
            size => Ok(size),
        }
    }

    /// The single account allowed to log in.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Login`] when either value is blank.
    pub fn login_credentials(&self) -> Result<LoginCredentials, SettingsError> {
        let username = self.login_username.as_deref().unwrap_or(DEFAULT_LOGIN);
        let password = self.login_password.as_deref().unwrap_or(DEFAULT_LOGIN);
        Ok(LoginCredentials::try_from_parts(username, password)?)
    }

    /// Origins admitted by the CORS middleware.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::CorsOrigin`] for wildcards, paths or values
    /// that are not an `http`/`https` origin.
    pub fn cors_allowed_origins(&self) -> Result<Vec<String>, SettingsError> {
        let raw = self
            .cors_allowed_origins
            .as_deref()
            .unwrap_or(DEFAULT_CORS_ORIGIN);
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(parse_origin)
            .collect()
    }
}

fn parse_origin(value: &str) -> Result<String, SettingsError> {
    let invalid = || SettingsError::CorsOrigin {
        value: value.to_owned(),
    };
    let uri: Uri = value.parse().map_err(|_| invalid())?;
    let scheme_ok = matches!(uri.scheme_str(), Some("http" | "https"));
    // An origin has no path, so a trailing slash would never match.
    let bare = uri.path() == "/" && uri.query().is_none() && !value.ends_with('/');
    if scheme_ok && uri.host().is_some() && bare {
        Ok(value.to_owned())
    } else {
        Err(invalid())
    }
}
