//! # Transport Seam
//!
//! The only thing the rest of the framework needs from an HTTP client: send an
//! [`ApiRequest`] and hand back status and body bytes. [`crate::http::ReqwestTransport`]
//! is the production implementation, [`crate::mock::MockTransport`] the test one.

use async_trait::async_trait;

use crate::error::FrameworkError;
use crate::request::ApiRequest;

/// Status code and undecoded body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests to the API.
///
/// Implementations must not retry and must not interpret the body; a response
/// with any status is `Ok`. Only failures to obtain a response are errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FrameworkError>;
}
