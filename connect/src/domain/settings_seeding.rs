//! Seeding of default platform settings.
//!
//! Each registry entry is handled on its own: a failure is logged and
//! recorded, and seeding moves on to the next entry. Nothing is wrapped in a
//! transaction, so a partial run leaves the successful inserts in place and a
//! re-run fills in the rest.

use std::sync::Arc;

use default_settings::{DefaultSetting, SettingsRegistry};
use mockable::Clock;
use tracing::{debug, warn};

use crate::domain::PlatformSetting;
use crate::domain::ports::PlatformSettingRepository;

/// A registry entry that could not be seeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedFailure {
    /// Key as written in the registry.
    pub key: String,
    /// Why the entry was not seeded.
    pub reason: String,
}

/// Summary of one seeding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Keys written by this run.
    pub inserted: Vec<String>,
    /// Keys that already existed.
    pub skipped: Vec<String>,
    /// Entries that failed.
    pub failed: Vec<SeedFailure>,
}

impl SeedReport {
    /// Whether every entry was either inserted or already present.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

enum EntryOutcome {
    Inserted,
    Skipped,
}

/// Inserts missing default settings.
#[derive(Clone)]
pub struct PlatformSettingsSeeder<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PlatformSettingsSeeder<R> {
    /// Create a seeder writing through `repository`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> PlatformSettingsSeeder<R>
where
    R: PlatformSettingRepository,
{
    /// Insert every registry entry whose key is not stored yet.
    pub async fn seed(&self, registry: &SettingsRegistry) -> SeedReport {
        let mut report = SeedReport::default();
        for default in registry.settings() {
            match self.seed_one(default).await {
                Ok(EntryOutcome::Inserted) => {
                    debug!(key = %default.key, "default setting inserted");
                    report.inserted.push(default.key.clone());
                }
                Ok(EntryOutcome::Skipped) => {
                    debug!(key = %default.key, "default setting already present");
                    report.skipped.push(default.key.clone());
                }
                Err(reason) => {
                    warn!(key = %default.key, %reason, "failed to seed default setting");
                    report.failed.push(SeedFailure {
                        key: default.key.clone(),
                        reason,
                    });
                }
            }
        }
        report
    }

    async fn seed_one(&self, default: &DefaultSetting) -> Result<EntryOutcome, String> {
        let setting = PlatformSetting::from_default(default, self.clock.utc())
            .map_err(|err| err.to_string())?;

        let existing = self
            .repository
            .find_by_key(&setting.key)
            .await
            .map_err(|err| err.to_string())?;
        if existing.is_some() {
            return Ok(EntryOutcome::Skipped);
        }

        let inserted = self
            .repository
            .insert_if_absent(&setting)
            .await
            .map_err(|err| err.to_string())?;
        Ok(if inserted {
            EntryOutcome::Inserted
        } else {
            EntryOutcome::Skipped
        })
    }
}
