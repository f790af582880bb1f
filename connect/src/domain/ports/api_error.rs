//! Error type shared by the Connect API ports.
//!
//! `Display` is the user-visible message a slice stores in its `error`
//! field, so every variant renders only its message.

use super::define_port_error;
use crate::domain::DraftValidationError;

define_port_error! {
    /// Failure of a single Connect API call.
    pub enum ApiError {
        /// The request never produced a response (connect failure, timeout).
        Transport { message: String } => "{message}",
        /// The server answered with a non-success status.
        Server { status: u16, message: String } => "{message}",
        /// The server rejected the bearer token.
        Unauthorized { message: String } => "{message}",
        /// A draft failed a local check; no request was sent.
        Validation { message: String } => "{message}",
        /// A success response body could not be decoded.
        Decode { message: String } => "{message}",
        /// The caller cancelled the operation before it settled.
        Cancelled => "operation cancelled",
        /// Any other client-side failure.
        Internal { message: String } => "{message}",
    }
}

impl ApiError {
    /// HTTP status behind the error, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized { .. } => Some(401),
            _ => None,
        }
    }
}

impl From<DraftValidationError> for ApiError {
    fn from(value: DraftValidationError) -> Self {
        Self::validation(value.to_string())
    }
}
