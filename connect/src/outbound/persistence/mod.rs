//! PostgreSQL persistence adapters using Diesel.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs and the table schema stay private to this module, and
//! every database failure is mapped to the port's error type.
//!
//! # Example
//!
//! ```no_run
//! use connect::outbound::persistence::{DbPool, DieselPlatformSettingRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/connect")).await?;
//! let repository = DieselPlatformSettingRepository::new(pool);
//! # let _ = repository;
//! # Ok(())
//! # }
//! ```

mod diesel_application_repository;
mod diesel_platform_setting_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_platform_setting_repository::DieselPlatformSettingRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
