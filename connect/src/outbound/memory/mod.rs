//! In-process repository adapters.
//!
//! Lets the domain services run without PostgreSQL. Data lives only as long
//! as the adapter.

mod application_repository;
mod platform_setting_repository;

pub use application_repository::InMemoryApplicationRepository;
pub use platform_setting_repository::InMemoryPlatformSettingRepository;
