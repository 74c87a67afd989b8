//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::sync::Arc;

use crate::domain::ports::LoginService;
use crate::inbound::http::cors::DEFAULT_ALLOWED_ORIGIN;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: DbPool,
    pub(crate) login: Arc<dyn LoginService>,
    pub(crate) cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Construct a server configuration around the incident store and the
    /// credential check guarding it.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, db_pool: DbPool, login: Arc<dyn LoginService>) -> Self {
        Self {
            bind_addr,
            db_pool,
            login,
            cors_origins: vec![DEFAULT_ALLOWED_ORIGIN.to_owned()],
        }
    }

    /// Replace the CORS allow-list.
    #[must_use]
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = origins;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// Origins allowed to make credentialed cross-origin requests.
    #[must_use]
    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }
}
