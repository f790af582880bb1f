//! Default setting entries.
//!
//! These types mirror the `connect` platform setting record without creating
//! a dependency on it; `connect` converts them at the point of use.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Category a default setting belongs to.
///
/// Mirrors the `connect` crate's `SettingCategory` enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySeed {
    /// Site identity and registration.
    #[default]
    General,
    /// Colours and presentation.
    Appearance,
    /// Profile visibility and data handling.
    Privacy,
    /// Delivery of notifications.
    Notifications,
    /// Operational switches and limits.
    System,
}

/// One default setting to be seeded when missing.
///
/// # Example
///
/// ```
/// use default_settings::{CategorySeed, DefaultSetting};
/// use serde_json::json;
///
/// let setting = DefaultSetting {
///     key: "maintenanceMode".to_owned(),
///     value: json!(false),
///     category: CategorySeed::System,
///     description: None,
///     is_public: true,
/// };
///
/// assert_eq!(setting.key, "maintenanceMode");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSetting {
    /// Unique setting key.
    pub key: String,
    /// Default value, any JSON document.
    pub value: Value,
    /// Category used to group the setting in administration screens.
    #[serde(default)]
    pub category: CategorySeed,
    /// Optional explanation shown to administrators.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether unauthenticated consumers may read the setting.
    #[serde(default)]
    pub is_public: bool,
}
