//! Error type shared by every typed client in this crate.

use api_framework::{ApiErrorBody, FrameworkError};
use thiserror::Error;

/// Errors that can occur while talking to the meal-planning API.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ClientError {
    /// The server answered with an error envelope; displays the server's message.
    #[error("{0}")]
    Api(ApiErrorBody),

    /// A required ID or search term was blank, so nothing was sent.
    #[error("{0} is required")]
    MissingParameter(String),

    /// A query filter failed strict validation.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No usable response: connection, timeout, unexpected status or body.
    #[error("Communication error: {0}")]
    Communication(String),

    /// Settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// The server-supplied error, if this failure came from an envelope.
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            ClientError::Api(body) => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.api_error().is_some_and(|body| body.code == "404")
    }
}

impl From<FrameworkError> for ClientError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::Api(body) => ClientError::Api(body),
            FrameworkError::MissingParameter(name) => ClientError::MissingParameter(name),
            FrameworkError::InvalidFilter(msg) => ClientError::InvalidRequest(msg),
            other @ (FrameworkError::Transport(_)
            | FrameworkError::Status { .. }
            | FrameworkError::Decode(_)
            | FrameworkError::EmptyPayload) => ClientError::Communication(other.to_string()),
        }
    }
}

impl From<String> for ClientError {
    fn from(msg: String) -> Self {
        ClientError::Communication(msg)
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_error_keeps_server_message() {
        let err = ClientError::from(FrameworkError::Api(ApiErrorBody::new("not found", "404")));
        assert_eq!(err.to_string(), "not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_parameter_reads_like_a_requirement() {
        let err = ClientError::from(FrameworkError::MissingParameter("recipeID".into()));
        assert_eq!(err.to_string(), "recipeID is required");
        assert!(!err.is_not_found());
    }

    #[test]
    fn transport_failures_become_communication_errors() {
        let err = ClientError::from(FrameworkError::Transport("connection refused".into()));
        assert_eq!(
            err,
            ClientError::Communication("Transport error: connection refused".into())
        );
    }
}
