//! Errors surfaced by the backend API client.
//!
//! Messages are deliberately generic. Response bodies and transport details
//! are logged after sanitization, never carried in the error text.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response
    #[error("{operation}: the server could not be reached")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status
    #[error("{operation} (HTTP {status})")]
    Status { operation: &'static str, status: u16 },
    /// The response body did not have the expected shape
    #[error("{operation}: unexpected response from the server")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// The server rejected the credentials; stored tokens were cleared
    #[error("Authentication required, please log in again")]
    Unauthorized,
    /// The access token expired and could not be refreshed
    #[error("Session expired, please log in again")]
    RefreshFailed,
    /// The client could not be constructed
    #[error("API client configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to log in again.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::RefreshFailed)
    }
}
