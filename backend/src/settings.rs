//! Application settings loaded via OrthoConfig.
//!
//! Values are read from CLI flags, `INCIDENTS_*` environment variables and an
//! optional configuration file. Everything except the credential pair has a
//! default.

use std::fmt;
use std::net::{IpAddr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::{Deserialize, Deserializer};

use crate::domain::LoginCredentials;
use crate::inbound::http::cors::{CorsConfigError, DEFAULT_ALLOWED_ORIGIN, parse_allowed_origins};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "incident_tracker.db";
const DEFAULT_POOL_MAX_SIZE: u32 = 8;

/// Problems found while resolving settings at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("{env} must be set")]
    Missing { env: &'static str },
    #[error("invalid host `{value}`: expected an IP address")]
    InvalidHost { value: String },
    #[error("pool max size must be at least 1")]
    EmptyPool,
    #[error(transparent)]
    Cors(#[from] CorsConfigError),
}

/// Runtime configuration for the incident tracker.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "INCIDENTS")]
pub struct AppSettings {
    /// IP address to bind the HTTP listener to.
    pub host: Option<String>,
    /// TCP port for the HTTP listener.
    #[ortho_config(default = DEFAULT_PORT)]
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: Option<String>,
    /// Maximum number of pooled SQLite connections.
    #[ortho_config(default = DEFAULT_POOL_MAX_SIZE)]
    pub pool_max_size: u32,
    /// Username accepted by the Basic credential check.
    pub auth_username: Option<String>,
    /// Password accepted by the Basic credential check.
    pub auth_password: Option<String>,
    /// CORS allow-list. The environment form is comma-separated.
    #[ortho_config(skip_cli)]
    #[serde(default, deserialize_with = "origin_list")]
    pub cors_allowed_origins: Option<Vec<String>>,
}

/// A single origin string or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum OriginList {
    One(String),
    Many(Vec<String>),
}

fn origin_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<OriginList>::deserialize(deserializer)?.map(|list| match list {
            OriginList::One(origin) => vec![origin],
            OriginList::Many(origins) => origins,
        }),
    )
}

impl fmt::Debug for AppSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("pool_max_size", &self.pool_max_size)
            .field("auth_username", &self.auth_username)
            .field(
                "auth_password",
                &self.auth_password.as_ref().map(|_| "<redacted>"),
            )
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl AppSettings {
    /// Socket address for the listener.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| SettingsError::InvalidHost {
            value: host.to_owned(),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// SQLite database path, falling back to `incident_tracker.db`.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool size. Zero is rejected.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size {
            0 => Err(SettingsError::EmptyPool),
            size => Ok(size),
        }
    }

    /// The single credential pair accepted by the API.
    ///
    /// # Errors
    /// Fails when either half is missing or empty.
    pub fn credentials(&self) -> Result<LoginCredentials, SettingsError> {
        let username = required(self.auth_username.as_deref(), "INCIDENTS_AUTH_USERNAME")?;
        let password = required(self.auth_password.as_deref(), "INCIDENTS_AUTH_PASSWORD")?;
        Ok(LoginCredentials::new(username, password))
    }

    /// Parsed CORS allow-list, falling back to `http://localhost:3000`.
    pub fn cors_origins(&self) -> Result<Vec<String>, SettingsError> {
        let Some(entries) = self.cors_allowed_origins.as_deref() else {
            return Ok(vec![DEFAULT_ALLOWED_ORIGIN.to_owned()]);
        };
        let mut origins = Vec::with_capacity(entries.len());
        for entry in entries {
            origins.extend(parse_allowed_origins(entry)?);
        }
        Ok(origins)
    }
}

fn required<'a>(value: Option<&'a str>, env: &'static str) -> Result<&'a str, SettingsError> {
    value
        .filter(|value| !value.is_empty())
        .ok_or(SettingsError::Missing { env })
}
