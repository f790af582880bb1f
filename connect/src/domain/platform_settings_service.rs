//! Read and update access to platform settings.

use std::sync::Arc;

use mockable::Clock;
use serde_json::Value;
use tracing::info;

use crate::domain::ports::{PlatformSettingRepository, PlatformSettingRepositoryError};
use crate::domain::{Error, PlatformSetting, SettingKey};

fn map_repository_error(error: PlatformSettingRepositoryError) -> Error {
    match error {
        PlatformSettingRepositoryError::Connection { message } => Error::service_unavailable(
            format!("platform setting repository unavailable: {message}"),
        ),
        PlatformSettingRepositoryError::Query { message } => {
            Error::internal(format!("platform setting repository error: {message}"))
        }
    }
}

fn parse_key(raw: &str) -> Result<SettingKey, Error> {
    SettingKey::new(raw)
        .map_err(|err| Error::invalid_request(format!("invalid setting key: {err}")))
}

/// Service exposing platform settings to consumers and administrators.
#[derive(Clone)]
pub struct PlatformSettingsService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PlatformSettingsService<R> {
    /// Create a service over `repository`.
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

impl<R> PlatformSettingsService<R>
where
    R: PlatformSettingRepository,
{
    /// Fetch one setting by key.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a malformed key, `NotFound` when absent.
    pub async fn get(&self, key: &str) -> Result<PlatformSetting, Error> {
        let key = parse_key(key)?;
        self.repository
            .find_by_key(&key)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("setting {key} not found")))
    }

    /// List settings ordered by key.
    pub async fn list(&self, public_only: bool) -> Result<Vec<PlatformSetting>, Error> {
        self.repository
            .list(public_only)
            .await
            .map_err(map_repository_error)
    }

    /// Replace the value of an existing setting.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` for a malformed key, `NotFound` when absent.
    pub async fn update(&self, key: &str, value: Value) -> Result<PlatformSetting, Error> {
        let key = parse_key(key)?;
        let updated = self
            .repository
            .update_value(&key, &value, self.clock.utc())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("setting {key} not found")))?;
        info!(key = %updated.key, "platform setting updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use mockable::DefaultClock;
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::SettingCategory;
    use crate::domain::ports::MockPlatformSettingRepository;

    fn site_name(value: Value) -> PlatformSetting {
        PlatformSetting {
            key: SettingKey::new("siteName").expect("valid key"),
            value,
            category: SettingCategory::General,
            description: None,
            is_public: true,
            updated_at: chrono::Utc::now(),
        }
    }

    fn service(
        repo: MockPlatformSettingRepository,
    ) -> PlatformSettingsService<MockPlatformSettingRepository> {
        PlatformSettingsService::new(Arc::new(repo), Arc::new(DefaultClock))
    }

    #[rstest]
    #[tokio::test]
    async fn get_returns_stored_setting() {
        let mut repo = MockPlatformSettingRepository::new();
        repo.expect_find_by_key()
            .withf(|key| key.as_ref() == "siteName")
            .times(1)
            .return_once(|_| Ok(Some(site_name(json!("Connect")))));

        let setting = service(repo).get("siteName").await.expect("setting found");
        assert_eq!(setting.value, json!("Connect"));
    }

    #[rstest]
    #[case("missingKey", ErrorCode::NotFound)]
    #[case("bad key", ErrorCode::InvalidRequest)]
    #[tokio::test]
    async fn get_reports_missing_and_malformed_keys(#[case] key: &str, #[case] code: ErrorCode) {
        let mut repo = MockPlatformSettingRepository::new();
        repo.expect_find_by_key().returning(|_| Ok(None));

        let error = service(repo).get(key).await.expect_err("lookup fails");
        assert_eq!(error.code(), code);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_unknown_key_is_not_found() {
        let mut repo = MockPlatformSettingRepository::new();
        repo.expect_update_value().times(1).return_once(|_, _, _| Ok(None));

        let error = service(repo)
            .update("siteTagline", json!("hello"))
            .await
            .expect_err("update fails");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[tokio::test]
    async fn update_returns_new_value() {
        let mut repo = MockPlatformSettingRepository::new();
        repo.expect_update_value()
            .withf(|key, value, _| key.as_ref() == "siteName" && *value == json!("Campus Connect"))
            .times(1)
            .return_once(|_, value, _| Ok(Some(site_name(value.clone()))));

        let setting = service(repo)
            .update("siteName", json!("Campus Connect"))
            .await
            .expect("update succeeds");
        assert_eq!(setting.value, json!("Campus Connect"));
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_are_service_unavailable() {
        let mut repo = MockPlatformSettingRepository::new();
        repo.expect_list()
            .return_once(|_| Err(PlatformSettingRepositoryError::connection("refused")));

        let error = service(repo).list(true).await.expect_err("list fails");
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
