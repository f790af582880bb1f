//! `PlatformSettingRepository` backed by a sorted map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::domain::ports::{PlatformSettingRepository, PlatformSettingRepositoryError};
use crate::domain::{PlatformSetting, SettingKey};

/// Platform settings held in memory, ordered by key.
#[derive(Debug, Default)]
pub struct InMemoryPlatformSettingRepository {
    settings: RwLock<BTreeMap<String, PlatformSetting>>,
}

impl InMemoryPlatformSettingRepository {
    /// Empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored settings.
    pub async fn len(&self) -> usize {
        self.settings.read().await.len()
    }

    /// Whether nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.settings.read().await.is_empty()
    }
}

#[async_trait]
impl PlatformSettingRepository for InMemoryPlatformSettingRepository {
    async fn find_by_key(
        &self,
        key: &SettingKey,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        Ok(self.settings.read().await.get(key.as_ref()).cloned())
    }

    async fn list(
        &self,
        public_only: bool,
    ) -> Result<Vec<PlatformSetting>, PlatformSettingRepositoryError> {
        Ok(self
            .settings
            .read()
            .await
            .values()
            .filter(|setting| !public_only || setting.is_public)
            .cloned()
            .collect())
    }

    async fn insert_if_absent(
        &self,
        setting: &PlatformSetting,
    ) -> Result<bool, PlatformSettingRepositoryError> {
        let mut settings = self.settings.write().await;
        if settings.contains_key(setting.key.as_ref()) {
            return Ok(false);
        }
        settings.insert(setting.key.to_string(), setting.clone());
        Ok(true)
    }

    async fn update_value(
        &self,
        key: &SettingKey,
        value: &Value,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        let mut settings = self.settings.write().await;
        Ok(settings.get_mut(key.as_ref()).map(|setting| {
            setting.value = value.clone();
            setting.updated_at = updated_at;
            setting.clone()
        }))
    }
}
