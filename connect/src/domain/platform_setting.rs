//! Platform-wide settings tuned by administrators.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use default_settings::{CategorySeed, DefaultSetting};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Longest accepted setting key.
pub const SETTING_KEY_MAX: usize = 64;

/// Validation errors for [`SettingKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingKeyError {
    /// Key was empty.
    #[error("setting key must not be empty")]
    Empty,
    /// Key exceeded [`SETTING_KEY_MAX`] characters.
    #[error("setting key must be at most {max} characters")]
    TooLong {
        /// Maximum length.
        max: usize,
    },
    /// Key contained a character outside `[A-Za-z0-9_.-]`.
    #[error("setting key contains invalid character {character:?}")]
    InvalidCharacter {
        /// First offending character.
        character: char,
    },
}

/// Unique key of a platform setting, e.g. `siteName`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SettingKey(String);

impl SettingKey {
    /// Validate and wrap a key.
    ///
    /// # Examples
    /// ```
    /// use connect::domain::SettingKey;
    ///
    /// assert!(SettingKey::new("siteName").is_ok());
    /// assert!(SettingKey::new("site name").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, SettingKeyError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(SettingKeyError::Empty);
        }
        if raw.chars().count() > SETTING_KEY_MAX {
            return Err(SettingKeyError::TooLong {
                max: SETTING_KEY_MAX,
            });
        }
        if let Some(character) = raw
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')))
        {
            return Err(SettingKeyError::InvalidCharacter { character });
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for SettingKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SettingKey {
    type Error = SettingKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SettingKey> for String {
    fn from(value: SettingKey) -> Self {
        value.0
    }
}

/// Grouping used on the administration screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingCategory {
    /// Site identity and registration.
    #[default]
    General,
    /// Colours and presentation.
    Appearance,
    /// Profile visibility.
    Privacy,
    /// Notification delivery.
    Notifications,
    /// Operational switches.
    System,
}

impl SettingCategory {
    /// Storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Appearance => "appearance",
            Self::Privacy => "privacy",
            Self::Notifications => "notifications",
            Self::System => "system",
        }
    }
}

impl From<CategorySeed> for SettingCategory {
    fn from(value: CategorySeed) -> Self {
        match value {
            CategorySeed::General => Self::General,
            CategorySeed::Appearance => Self::Appearance,
            CategorySeed::Privacy => Self::Privacy,
            CategorySeed::Notifications => Self::Notifications,
            CategorySeed::System => Self::System,
        }
    }
}

/// Raised when parsing an unknown category string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown setting category: {0}")]
pub struct UnknownSettingCategory(pub String);

impl FromStr for SettingCategory {
    type Err = UnknownSettingCategory;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "general" => Ok(Self::General),
            "appearance" => Ok(Self::Appearance),
            "privacy" => Ok(Self::Privacy),
            "notifications" => Ok(Self::Notifications),
            "system" => Ok(Self::System),
            other => Err(UnknownSettingCategory(other.to_owned())),
        }
    }
}

/// A stored platform setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformSetting {
    /// Unique key.
    pub key: SettingKey,
    /// Current value.
    pub value: Value,
    /// Administration grouping.
    pub category: SettingCategory,
    /// Explanation shown to administrators.
    pub description: Option<String>,
    /// Whether anonymous consumers may read it.
    pub is_public: bool,
    /// Time of the last write.
    pub updated_at: DateTime<Utc>,
}

impl PlatformSetting {
    /// Build a setting from a registry default, stamped with `now`.
    pub fn from_default(
        default: &DefaultSetting,
        now: DateTime<Utc>,
    ) -> Result<Self, SettingKeyError> {
        Ok(Self {
            key: SettingKey::new(default.key.clone())?,
            value: default.value.clone(),
            category: default.category.into(),
            description: default.description.clone(),
            is_public: default.is_public,
            updated_at: now,
        })
    }
}
