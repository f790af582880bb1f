//! Domain records, ports, and services.
//!
//! Purpose: define the strongly typed records exchanged with the Connect API,
//! the ports the client and server layers drive, and the services that own
//! platform settings and job applications.
//!
//! Public surface:
//! - Client records: [`Community`], [`Event`], [`UserProfile`], [`Report`].
//! - Server records: [`PlatformSetting`], [`Application`].
//! - Credentials: [`Session`] and [`BearerToken`].
//! - Errors: [`Error`] with a stable [`ErrorCode`].

pub mod application;
pub mod application_service;
pub mod community;
pub mod error;
pub mod event;
pub mod ids;
pub mod notification;
pub mod platform_setting;
pub mod platform_settings_service;
pub mod ports;
pub mod report;
pub mod session;
pub mod settings_seeding;
pub mod validation;

pub use self::application::{
    Application, ApplicationId, ApplicationStatus, UnknownApplicationStatus,
};
pub use self::application_service::ApplicationService;
pub use self::community::{Community, CommunityDraft, Group, NewGroup, NewPost, Post};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::event::{Announcement, Event, EventDraft, NewAnnouncement};
pub use self::ids::{IdValidationError, ResourceId};
pub use self::notification::{
    Notification, NotificationReadState, ProfileUpdate, UserProfile, unread_count,
};
pub use self::platform_setting::{
    PlatformSetting, SETTING_KEY_MAX, SettingCategory, SettingKey, SettingKeyError,
    UnknownSettingCategory,
};
pub use self::platform_settings_service::PlatformSettingsService;
pub use self::report::{
    ActionTaken, NewReport, Report, ReportResolution, ReportStatus, ReportStatusUpdate,
    ReportTarget,
};
pub use self::session::{BearerToken, Session, SessionError};
pub use self::settings_seeding::{PlatformSettingsSeeder, SeedFailure, SeedReport};
pub use self::validation::DraftValidationError;
pub(crate) use self::validation::require_text;
