//! Error types for GetMac operations.
//!
//! Every failure is returned to the immediate caller. When a response was
//! received before the failure, it travels inside the error so callers can
//! inspect status, headers and body.

use thiserror::Error;

use crate::response::RawResponse;

/// Main error type for GetMac operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Request body could not be serialized; nothing was sent
    #[error("Failed to encode request body: {0}")]
    Encoding(String),

    /// Request could not be built, or the network exchange failed
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Exchange succeeded but returned a status other than the expected one
    #[error("Unexpected status code: {status}")]
    UnexpectedStatus {
        /// Observed HTTP status code
        status: u16,
        /// Raw response as received
        response: Box<RawResponse>,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response: {message}")]
    Decoding {
        /// Decoder error message
        message: String,
        /// Raw response as received
        response: Box<RawResponse>,
    },

    /// No resource carries the requested name
    #[error("Not found: {name}")]
    NotFound {
        /// Requested name
        name: String,
        /// Response the lookup scanned
        response: Box<RawResponse>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Specialized result type for GetMac operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Encoding(_) => "ENCODING_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            Self::Decoding { .. } => "DECODING_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::ConfigError(_) => "CONFIG_ERROR",
        }
    }

    /// Returns the raw response attached to this error, if one was received.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::UnexpectedStatus { response, .. }
            | Self::Decoding { response, .. }
            | Self::NotFound { response, .. } => Some(response),
            Self::Encoding(_) | Self::Transport(_) | Self::ConfigError(_) => None,
        }
    }

    /// Returns the HTTP status of the attached response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.response().map(|response| response.status().as_u16())
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Transport(format!("request timed out: {err}"))
        } else if err.is_builder() {
            Self::Transport(format!("invalid request: {err}"))
        } else {
            Self::Transport(err.to_string())
        }
    }
}

// Only request serialization converts implicitly; decode failures carry the
// response and are built by `RawResponse::json`.
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}
