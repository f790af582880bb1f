//! Request credentials passed explicitly to every API operation.
//!
//! There is no ambient session: callers hold a [`Session`] and hand it to each
//! operation they dispatch. The token is zeroised on drop and never printed;
//! logs carry a truncated SHA-256 fingerprint instead.

use std::fmt;

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::ResourceId;

/// Length of the token fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Errors raised when constructing a [`BearerToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The token was empty or whitespace.
    #[error("bearer token must not be empty")]
    EmptyToken,
    /// The token contained whitespace and cannot be sent in a header.
    #[error("bearer token must not contain whitespace")]
    WhitespaceInToken,
}

/// Bearer token issued by the Connect API at login.
#[derive(Clone)]
pub struct BearerToken(Zeroizing<String>);

impl BearerToken {
    /// Validate and wrap a raw token.
    ///
    /// # Examples
    /// ```
    /// use connect::domain::BearerToken;
    ///
    /// let token = BearerToken::new("eyJhbGciOi.payload.sig").expect("valid token");
    /// assert_eq!(token.fingerprint().len(), 16);
    /// assert!(BearerToken::new("two words").is_err());
    /// ```
    pub fn new(raw: impl Into<String>) -> Result<Self, SessionError> {
        let raw = Zeroizing::new(raw.into());
        if raw.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if raw.chars().any(char::is_whitespace) {
            return Err(SessionError::WhitespaceInToken);
        }
        Ok(Self(raw))
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Truncated SHA-256 fingerprint, safe to log.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BearerToken")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Credentials and identity of the signed-in user.
#[derive(Debug, Clone)]
pub struct Session {
    token: BearerToken,
    user_id: Option<ResourceId>,
}

impl Session {
    /// Create a session for a token whose owner is not yet known.
    pub fn new(token: BearerToken) -> Self {
        Self {
            token,
            user_id: None,
        }
    }

    /// Record the user the token belongs to.
    pub fn with_user_id(mut self, user_id: ResourceId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Token sent with every request.
    pub fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Signed-in user, when known.
    pub fn user_id(&self) -> Option<&ResourceId> {
        self.user_id.as_ref()
    }
}
