//! SQLite persistence adapters using Diesel ORM.
//!
//! Concrete implementations of domain repository ports backed by SQLite via
//! Diesel, with async access through `diesel-async` and `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel models and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the table definition
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database errors map to
//!   [`IncidentRepositoryError`](crate::domain::ports::IncidentRepositoryError).
//!
//! # Example
//!
//! ```no_run
//! use incident_tracker::outbound::persistence::{
//!     DbPool, DieselIncidentRepository, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! run_pending_migrations("incident_tracker.db").await?;
//! let pool = DbPool::new(PoolConfig::new("incident_tracker.db")).await?;
//! let repo = DieselIncidentRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_incident_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_incident_repository::DieselIncidentRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError, SqliteConn};
