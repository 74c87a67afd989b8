//! Shared helpers for integration tests backed by a temporary SQLite file.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use incident_tracker::domain::ports::LoginService;
use incident_tracker::domain::{ConfiguredLoginService, LoginCredentials};
use incident_tracker::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tempfile::TempDir;

pub const USERNAME: &str = "oncall";
pub const PASSWORD: &str = "pager-duty";

/// A migrated database file that lives as long as the struct.
pub struct TestDatabase {
    pub pool: DbPool,
    pub database_url: String,
    _dir: TempDir,
}

impl TestDatabase {
    /// Create a fresh database file, apply migrations and open a pool.
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let database_url = dir
            .path()
            .join("incidents.db")
            .to_string_lossy()
            .into_owned();
        run_pending_migrations(&database_url)
            .await
            .expect("migrations apply");
        let pool = DbPool::new(PoolConfig::new(database_url.clone()).with_max_size(4))
            .await
            .expect("pool builds");
        Self {
            pool,
            database_url,
            _dir: dir,
        }
    }
}

/// Login service accepting [`USERNAME`] and [`PASSWORD`].
pub fn login_service() -> Arc<dyn LoginService> {
    Arc::new(ConfiguredLoginService::new(LoginCredentials::new(
        USERNAME, PASSWORD,
    )))
}

/// Encode a `Basic` authorization header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}
