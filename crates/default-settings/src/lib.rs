//! Default platform settings for Connect.
//!
//! This crate parses and validates the registry of settings that must exist
//! when the platform starts. It is independent of the `connect` domain types so the
//! registry can be inspected and tested without pulling in persistence.
//!
//! # Overview
//!
//! - A built-in registry ships with the crate ([`SettingsRegistry::builtin`]).
//! - Operators may override it with a JSON file
//!   ([`SettingsRegistry::from_file`]).
//! - Keys are unique and non-blank; categories are a closed set.
//!
//! # Example
//!
//! ```
//! use default_settings::{CategorySeed, SettingsRegistry};
//!
//! let json = r#"{
//!     "version": 1,
//!     "settings": [
//!         {"key": "siteName", "value": "Connect", "category": "general", "isPublic": true}
//!     ]
//! }"#;
//!
//! let registry = SettingsRegistry::from_json(json).expect("valid registry");
//! let site_name = registry.find("siteName").expect("setting exists");
//!
//! assert_eq!(site_name.value, serde_json::json!("Connect"));
//! assert_eq!(site_name.category, CategorySeed::General);
//! ```

mod error;
mod registry;
mod setting;

pub use error::RegistryError;
pub use registry::{BUILTIN_REGISTRY_JSON, SettingsRegistry};
pub use setting::{CategorySeed, DefaultSetting};
