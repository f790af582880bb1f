//! Opaque identifiers for server-owned records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned by identifier constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdValidationError {
    /// The identifier was empty or only whitespace.
    #[error("identifier must not be empty")]
    Empty,
    /// The identifier had leading or trailing whitespace.
    #[error("identifier must not contain surrounding whitespace")]
    Padded,
}

/// Identifier of a record owned by the Connect API.
///
/// The server chooses the format; the client only requires a non-blank,
/// unpadded string and never inspects its contents.
///
/// # Examples
/// ```
/// use connect::domain::ResourceId;
///
/// let id = ResourceId::new("65f1c0ffee").expect("valid id");
/// assert_eq!(id.as_ref(), "65f1c0ffee");
/// assert!(ResourceId::new(" ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourceId(String);

impl ResourceId {
    /// Validate and construct a [`ResourceId`].
    pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(IdValidationError::Empty);
        }
        if id.trim() != id {
            return Err(IdValidationError::Padded);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ResourceId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ResourceId> for String {
    fn from(value: ResourceId) -> Self {
        value.0
    }
}

impl TryFrom<String> for ResourceId {
    type Error = IdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
