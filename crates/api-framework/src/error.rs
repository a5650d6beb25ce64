//! # Framework Errors
//!
//! This module defines the common error types used throughout the API framework.
//! Every wrapper, whatever resource it talks to, fails with a [`FrameworkError`];
//! resource-specific clients map it into their own error type.

use crate::envelope::ApiErrorBody;

/// Errors that can occur while issuing a request or unwrapping its envelope.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameworkError {
    /// The request never produced a response (connection refused, timeout, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A non-2xx response whose body was not an error envelope.
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The server answered with an envelope carrying an error.
    ///
    /// Displays as the server-supplied message only.
    #[error("{0}")]
    Api(ApiErrorBody),

    /// The response body could not be decoded into the expected envelope.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A query filter failed strict validation.
    #[error("Invalid query filter: {0}")]
    InvalidFilter(String),

    /// A required path or query parameter was missing or blank.
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A single-entity endpoint answered without a payload.
    #[error("Response carried no data")]
    EmptyPayload,
}

impl FrameworkError {
    /// The server-supplied error body, when the failure came from an envelope.
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            FrameworkError::Api(body) => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FrameworkError {
    fn from(e: reqwest::Error) -> Self {
        FrameworkError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FrameworkError {
    fn from(e: serde_json::Error) -> Self {
        FrameworkError::Decode(e.to_string())
    }
}

impl From<url::ParseError> for FrameworkError {
    fn from(e: url::ParseError) -> Self {
        FrameworkError::Transport(format!("invalid url: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_server_message_only() {
        let err = FrameworkError::Api(ApiErrorBody::new("not found", "404"));
        assert_eq!(err.to_string(), "not found");
        assert_eq!(err.api_error().map(|b| b.code.as_str()), Some("404"));
    }

    #[test]
    fn non_api_errors_have_no_body() {
        assert!(FrameworkError::EmptyPayload.api_error().is_none());
    }
}
