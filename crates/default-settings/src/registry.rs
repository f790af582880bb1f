//! Settings registry parsing and validation.
//!
//! The registry is a versioned JSON document listing the settings that must
//! exist on a fresh platform. Validation rejects blank or padded keys and
//! repeated keys so seeding can treat the key as the identity of an entry.

use std::collections::BTreeSet;
use std::path::Path;

use cap_std::{ambient_authority, fs::Dir};
use serde::Deserialize;

use crate::error::RegistryError;
use crate::setting::DefaultSetting;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry compiled into the crate.
pub const BUILTIN_REGISTRY_JSON: &str = include_str!("../defaults.json");

/// A validated list of default settings.
///
/// # Example
///
/// ```
/// use default_settings::SettingsRegistry;
///
/// let registry = SettingsRegistry::builtin().expect("built-in registry is valid");
/// assert!(registry.find("siteName").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsRegistry {
    version: u32,
    settings: Vec<DefaultSetting>,
}

impl SettingsRegistry {
    /// Parses the registry shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the embedded document fails validation.
    pub fn builtin() -> Result<Self, RegistryError> {
        Self::from_json(BUILTIN_REGISTRY_JSON)
    }

    /// Parses a settings registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed or a category is unknown
    /// - The version is unsupported
    /// - The settings array is empty
    /// - A key is blank, padded, or repeated
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSettingsRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a settings registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let io_error = |message: String| RegistryError::IoError {
            path: path.to_path_buf(),
            message,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = path
            .file_name()
            .ok_or_else(|| io_error("registry path must be a file".to_owned()))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|e| io_error(e.to_string()))?;
        let contents = dir
            .read_to_string(Path::new(file_name))
            .map_err(|e| io_error(e.to_string()))?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSettingsRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.settings.is_empty() {
            return Err(RegistryError::EmptySettings);
        }

        let mut seen = BTreeSet::new();
        for (index, setting) in raw.settings.iter().enumerate() {
            let key = setting.key.as_str();
            if key.trim().is_empty() || key.trim() != key {
                return Err(RegistryError::InvalidKey {
                    index,
                    key: key.to_owned(),
                });
            }
            if !seen.insert(key) {
                return Err(RegistryError::DuplicateKey {
                    key: key.to_owned(),
                });
            }
        }

        Ok(Self {
            version: raw.version,
            settings: raw.settings,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns every default setting in declaration order.
    #[must_use]
    pub fn settings(&self) -> &[DefaultSetting] {
        &self.settings
    }

    /// Finds a default setting by key.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&DefaultSetting> {
        self.settings.iter().find(|setting| setting.key == key)
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSettingsRegistry {
    version: u32,
    settings: Vec<DefaultSetting>,
}
