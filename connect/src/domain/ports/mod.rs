//! Domain ports for the hexagonal boundary.
//!
//! The API ports are driven by the client state layer; the repository ports
//! are driven by the platform settings and application services.

mod macros;
pub(crate) use macros::define_port_error;

mod api_error;
mod application_repository;
mod community_api;
mod event_api;
mod platform_setting_repository;
mod profile_api;
mod report_api;

pub use api_error::ApiError;
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{
    ApplicationRepository, ApplicationRepositoryError, FixtureApplicationRepository,
};
pub use community_api::CommunityApi;
#[cfg(test)]
pub use community_api::MockCommunityApi;
pub use event_api::EventApi;
#[cfg(test)]
pub use event_api::MockEventApi;
#[cfg(test)]
pub use platform_setting_repository::MockPlatformSettingRepository;
pub use platform_setting_repository::{
    FixturePlatformSettingRepository, PlatformSettingRepository, PlatformSettingRepositoryError,
};
#[cfg(test)]
pub use profile_api::MockProfileApi;
pub use profile_api::ProfileApi;
#[cfg(test)]
pub use report_api::MockReportApi;
pub use report_api::ReportApi;
