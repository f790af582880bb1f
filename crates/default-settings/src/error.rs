//! Error types for the default-settings crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or validating a settings registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no settings.
    #[error("registry contains no settings")]
    EmptySettings,

    /// A setting key is blank or padded with whitespace.
    #[error("setting at index {index} has an invalid key: '{key}'")]
    InvalidKey {
        /// Index of the offending entry.
        index: usize,
        /// The rejected key.
        key: String,
    },

    /// The same key appears more than once.
    #[error("setting key '{key}' is declared more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
}
