//! Reqwest-backed [`HttpTransport`].
//!
//! Owns connection details only: base URL, default headers, timeout and the
//! cookie jar. Envelope decoding happens in [`crate::client::ApiClient`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use tracing::{debug, trace};

use crate::error::FrameworkError;
use crate::request::ApiRequest;
use crate::transport::{HttpTransport, RawResponse};

pub const DEFAULT_CLIENT_NAME: &str = "DDB-Service-Client";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const REQUEST_SOURCE: &str = "webapp";

const X_REQUEST_SOURCE: &str = "x-request-source";
const X_SERVICE_CLIENT: &str = "x-service-client";

/// Identity and limits applied to every request.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    /// Sent as `X-Service-Client`.
    pub client_name: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub oauth2_token: Option<String>,
    pub timeout: Duration,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            client_name: DEFAULT_CLIENT_NAME.to_owned(),
            oauth2_token: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Transport that talks to one API host.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    headers: Vec<(String, String)>,
}

impl ReqwestTransport {
    /// Builds a transport with default options.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` does not parse or the reqwest client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, FrameworkError> {
        Self::with_options(base_url, TransportOptions::default())
    }

    pub fn with_options(base_url: &str, options: TransportOptions) -> Result<Self, FrameworkError> {
        let base_url = Url::parse(base_url)?;
        let headers = default_headers(&options);

        let mut header_map = HeaderMap::new();
        for (name, value) in &headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FrameworkError::Transport(format!("invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FrameworkError::Transport(format!("invalid header value: {e}")))?;
            header_map.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(header_map)
            .timeout(options.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url,
            headers,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, FrameworkError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}{}", request.path))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

fn default_headers(options: &TransportOptions) -> Vec<(String, String)> {
    let mut headers = vec![
        (CONTENT_TYPE.as_str().to_owned(), "application/json".to_owned()),
        (X_REQUEST_SOURCE.to_owned(), REQUEST_SOURCE.to_owned()),
        (X_SERVICE_CLIENT.to_owned(), options.client_name.clone()),
    ];
    if let Some(token) = options.oauth2_token.as_deref().filter(|t| !t.is_empty()) {
        headers.push((AUTHORIZATION.as_str().to_owned(), format!("Bearer {token}")));
    }
    headers
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FrameworkError> {
        let url = self.url_for(&request)?;
        debug!(method = %request.method, %url, "Sending request");
        trace!(curl = %request.to_curl(self.base_url.as_str(), &self.headers));

        let mut builder = self.client.request(request.method.into(), url);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
