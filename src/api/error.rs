//! Dialogue service error types

use thiserror::Error;

/// Failed exchange with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Decode, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Protocol, message)
    }

    /// Classify a non-2xx response
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        if status.is_server_error() {
            Self::new(ApiErrorKind::ServerError, format!("Server error ({status}): {body}"))
        } else {
            Self::new(ApiErrorKind::ClientError, format!("HTTP {status}: {body}"))
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::timeout(format!("Request timeout: {e}"))
        } else if e.is_connect() {
            ApiError::network(format!("Connection failed: {e}"))
        } else if e.is_decode() {
            ApiError::decode(format!("Failed to read response: {e}"))
        } else {
            ApiError::network(format!("Request failed: {e}"))
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Connection refused, reset, DNS
    Network,
    /// No response within the configured limit
    Timeout,
    /// 5xx
    ServerError,
    /// Any other non-2xx
    ClientError,
    /// Body was not the expected JSON
    Decode,
    /// Well-formed response for the wrong session
    Protocol,
}
