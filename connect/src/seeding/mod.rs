//! Startup wiring for default platform settings.

mod startup;

pub use startup::{StartupSeedingError, load_registry, seed_platform_settings_on_startup};
