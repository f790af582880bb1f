//! Port for platform setting persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{PlatformSetting, SettingKey};

use super::define_port_error;

define_port_error! {
    /// Errors raised by platform setting repository adapters.
    pub enum PlatformSettingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "platform setting repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "platform setting repository query failed: {message}",
    }
}

/// Port for reading and writing platform settings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlatformSettingRepository: Send + Sync {
    /// Find a setting by key.
    async fn find_by_key(
        &self,
        key: &SettingKey,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError>;

    /// List settings ordered by key, optionally restricted to public ones.
    async fn list(
        &self,
        public_only: bool,
    ) -> Result<Vec<PlatformSetting>, PlatformSettingRepositoryError>;

    /// Insert a setting unless its key already exists.
    ///
    /// Returns `true` when a row was written.
    async fn insert_if_absent(
        &self,
        setting: &PlatformSetting,
    ) -> Result<bool, PlatformSettingRepositoryError>;

    /// Replace the value of an existing setting.
    ///
    /// Returns `None` when the key does not exist.
    async fn update_value(
        &self,
        key: &SettingKey,
        value: &Value,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError>;
}

/// Fixture implementation for tests that do not exercise settings storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePlatformSettingRepository;

#[async_trait]
impl PlatformSettingRepository for FixturePlatformSettingRepository {
    async fn find_by_key(
        &self,
        _key: &SettingKey,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        Ok(None)
    }

    async fn list(
        &self,
        _public_only: bool,
    ) -> Result<Vec<PlatformSetting>, PlatformSettingRepositoryError> {
        Ok(Vec::new())
    }

    async fn insert_if_absent(
        &self,
        _setting: &PlatformSetting,
    ) -> Result<bool, PlatformSettingRepositoryError> {
        Ok(true)
    }

    async fn update_value(
        &self,
        _key: &SettingKey,
        _value: &Value,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<PlatformSetting>, PlatformSettingRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_finds_nothing() {
        let repo = FixturePlatformSettingRepository;
        let key = SettingKey::new("siteName").expect("valid key");

        let found = repo.find_by_key(&key).await.expect("fixture lookup succeeds");
        assert!(found.is_none());

        let updated = repo
            .update_value(&key, &json!("Other"), Utc::now())
            .await
            .expect("fixture update succeeds");
        assert!(updated.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = PlatformSettingRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
