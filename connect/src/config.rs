//! Connect configuration loaded via OrthoConfig.

use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `api_base_url` is not an absolute URL.
    #[error("invalid API base URL '{value}': {message}")]
    InvalidApiBaseUrl {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Settings shared by the client stores and the seeding tool.
///
/// Values come from CLI flags, `CONNECT_*` environment variables and
/// configuration files, in that order of precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONNECT")]
pub struct ConnectSettings {
    /// Base URL of the Connect REST API.
    #[ortho_config(default = String::from(DEFAULT_API_BASE_URL))]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[ortho_config(default = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
    /// PostgreSQL URL used for platform settings and applications.
    pub database_url: Option<String>,
    /// Registry file replacing the built-in default settings.
    pub settings_registry_path: Option<PathBuf>,
}

impl ConnectSettings {
    /// Settings with every layer unset: the local development server, a
    /// 30 second timeout and no database.
    pub fn local() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            database_url: None,
            settings_registry_path: None,
        }
    }

    /// Configured API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiBaseUrl`] when the value does not parse.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.api_base_url).map_err(|err| ConfigError::InvalidApiBaseUrl {
            value: self.api_base_url.clone(),
            message: err.to_string(),
        })
    }

    /// Configured request timeout.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load_from_empty_args() -> ConnectSettings {
        ConnectSettings::load_from_iter([OsString::from("connect")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("CONNECT_API_BASE_URL", None::<String>),
            ("CONNECT_REQUEST_TIMEOUT_SECS", None::<String>),
            ("CONNECT_DATABASE_URL", None::<String>),
            ("CONNECT_SETTINGS_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("default parses").as_str(),
            "http://localhost:5000/"
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.api_base_url, ConnectSettings::local().api_base_url);
        assert!(settings.database_url().is_none());
        assert!(settings.settings_registry_path.is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            (
                "CONNECT_API_BASE_URL",
                Some("https://connect.example.org/".to_owned()),
            ),
            ("CONNECT_REQUEST_TIMEOUT_SECS", Some("5".to_owned())),
            (
                "CONNECT_DATABASE_URL",
                Some("postgres://connect@localhost/connect".to_owned()),
            ),
            (
                "CONNECT_SETTINGS_REGISTRY_PATH",
                Some("/tmp/settings.json".to_owned()),
            ),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.api_base_url().expect("override parses").host_str(),
            Some("connect.example.org")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            settings.database_url(),
            Some("postgres://connect@localhost/connect")
        );
        assert_eq!(
            settings.settings_registry_path,
            Some(PathBuf::from("/tmp/settings.json"))
        );
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let _guard = lock_env([
            ("CONNECT_API_BASE_URL", Some("not a url".to_owned())),
            ("CONNECT_REQUEST_TIMEOUT_SECS", None::<String>),
            ("CONNECT_DATABASE_URL", Some("   ".to_owned())),
            ("CONNECT_SETTINGS_REGISTRY_PATH", None::<String>),
        ]);

        let settings = load_from_empty_args();
        assert!(settings.database_url().is_none());
        assert!(matches!(
            settings.api_base_url(),
            Err(ConfigError::InvalidApiBaseUrl { .. })
        ));
    }
}
