//! Startup seeding orchestration.

use std::sync::Arc;

use default_settings::{RegistryError, SettingsRegistry};
use mockable::DefaultClock;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ConnectSettings;
use crate::domain::ports::PlatformSettingRepository;
use crate::domain::{PlatformSettingsSeeder, SeedReport};

/// Errors returned while preparing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// The registry could not be loaded.
    #[error("settings registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Load the configured registry, or the built-in one when no path is set.
///
/// # Errors
///
/// Returns [`StartupSeedingError::Registry`] when the file cannot be read or
/// fails validation.
pub fn load_registry(settings: &ConnectSettings) -> Result<SettingsRegistry, StartupSeedingError> {
    let registry = match settings.settings_registry_path.as_deref() {
        Some(path) => {
            info!(path = %path.display(), "loading settings registry override");
            SettingsRegistry::from_file(path)?
        }
        None => SettingsRegistry::builtin()?,
    };
    Ok(registry)
}

/// Seed missing default settings through `repository`.
///
/// Entry failures do not abort the run; they are logged and returned in the
/// report.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
///
/// use connect::config::ConnectSettings;
/// use connect::outbound::memory::InMemoryPlatformSettingRepository;
/// use connect::seeding::seed_platform_settings_on_startup;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let settings = ConnectSettings::local();
/// let repository = Arc::new(InMemoryPlatformSettingRepository::new());
/// let report = seed_platform_settings_on_startup(&settings, repository).await?;
/// assert!(report.is_complete());
/// # Ok(())
/// # }
/// ```
pub async fn seed_platform_settings_on_startup<R>(
    settings: &ConnectSettings,
    repository: Arc<R>,
) -> Result<SeedReport, StartupSeedingError>
where
    R: PlatformSettingRepository,
{
    let registry = load_registry(settings)?;
    let seeder = PlatformSettingsSeeder::new(repository, Arc::new(DefaultClock));
    let report = seeder.seed(&registry).await;

    if report.is_complete() {
        info!(
            registry_version = registry.version(),
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            "default settings seeded"
        );
    } else {
        warn!(
            registry_version = registry.version(),
            inserted = report.inserted.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "default settings seeded with failures"
        );
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::{fixture, rstest};
    use tempfile::NamedTempFile;

    use super::*;
    use crate::outbound::memory::InMemoryPlatformSettingRepository;

    #[fixture]
    fn settings() -> ConnectSettings {
        ConnectSettings::local()
    }

    #[rstest]
    #[tokio::test]
    async fn builtin_registry_is_used_without_override(settings: ConnectSettings) {
        let repository = Arc::new(InMemoryPlatformSettingRepository::new());

        let report = seed_platform_settings_on_startup(&settings, Arc::clone(&repository))
            .await
            .expect("seeding runs");

        let builtin = SettingsRegistry::builtin().expect("builtin registry");
        assert_eq!(report.inserted.len(), builtin.settings().len());
        assert_eq!(repository.len().await, builtin.settings().len());
    }

    #[rstest]
    #[tokio::test]
    async fn registry_override_is_read_from_disk(mut settings: ConnectSettings) {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{"version": 1, "settings": [{{"key": "siteName", "value": "Campus"}}]}}"#
        )
        .expect("write registry");
        settings.settings_registry_path = Some(file.path().to_path_buf());
        let repository = Arc::new(InMemoryPlatformSettingRepository::new());

        let report = seed_platform_settings_on_startup(&settings, repository)
            .await
            .expect("seeding runs");

        assert_eq!(report.inserted, vec!["siteName"]);
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_override_is_an_error(mut settings: ConnectSettings) {
        settings.settings_registry_path = Some("/nonexistent/settings.json".into());
        let repository = Arc::new(InMemoryPlatformSettingRepository::new());

        let err = seed_platform_settings_on_startup(&settings, repository)
            .await
            .expect_err("missing file rejected");

        assert!(matches!(err, StartupSeedingError::Registry(_)));
    }
}
