//! # Mock Transport & Testing Guide
//!
//! `MockTransport` implements [`HttpTransport`] entirely in‑memory. You queue
//! the requests you expect together with the response each one should get,
//! hand [`MockTransport::client`] to the code under test, then call
//! [`MockTransport::verify`].
//!
//! ## When to use the mock vs a local server
//!
//! | Feature | MockTransport | Local stub server + `ReqwestTransport` |
//! |---------|---------------|----------------------------------------|
//! | **Speed** | Instant (in-memory) | Fast (binds a socket) |
//! | **Determinism** | 100% Deterministic | Subject to the network stack |
//! | **Checks** | Verb and path; query pairs and body when asked | Headers, cookies, timeouts |
//! | **Error Injection** | Easy (`return_transport_error`) | Hard |
//!
//! ## Example
//!
//! ```rust
//! use api_framework::mock::MockTransport;
//! use api_framework::{ApiRequest, Pagination, QueryFilter};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/api/v1/recipes").return_page(
//!         vec!["pasta", "soup"],
//!         Pagination { page: 1, limit: 20, total_count: 2, filtered_count: Some(2) },
//!     );
//!
//!     let request = ApiRequest::get("/api/v1/recipes").with_filter(&QueryFilter::default());
//!     let page = mock.client().fetch_list::<String>(request).await.unwrap();
//!     assert_eq!(page.total_count(), 2);
//!
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing Failure Scenarios
//!
//! ```rust
//! use api_framework::mock::MockTransport;
//! use api_framework::ApiRequest;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_get("/api/v1/recipes/r1").return_api_error("not found", "404");
//!
//!     let err = mock
//!         .client()
//!         .fetch::<serde_json::Value>(ApiRequest::get("/api/v1/recipes/r1"))
//!         .await
//!         .unwrap_err();
//!     assert_eq!(err.to_string(), "not found");
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde::Serialize;

use crate::client::ApiClient;
use crate::envelope::{ApiErrorBody, ApiResponse, Pagination};
use crate::error::FrameworkError;
use crate::request::{ApiRequest, Method};
use crate::transport::{HttpTransport, RawResponse};

/// One queued request and the response it gets.
#[derive(Debug)]
struct Expectation {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    response: Result<RawResponse, FrameworkError>,
}

impl Expectation {
    fn matches(&self, request: &ApiRequest) -> bool {
        self.method == request.method
            && self.path == request.path
            && self
                .query
                .iter()
                .all(|(key, value)| request.query_value(key) == Some(value.as_str()))
            && self
                .body
                .as_ref()
                .map_or(true, |body| request.body.as_ref() == Some(body))
    }
}

#[derive(Debug, Default)]
struct MockState {
    expectations: VecDeque<Expectation>,
    requests: Vec<ApiRequest>,
    mismatches: Vec<String>,
}

/// An in-memory transport with expectation tracking for fluent testing.
///
/// Expectations are consumed in order. A request that does not match the
/// next expectation fails with [`FrameworkError::Transport`] and is reported
/// by [`verify`](MockTransport::verify).
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Creates a new mock transport with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// An [`ApiClient`] backed by this mock; expectations stay shared.
    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            state: self.state.clone(),
        }
    }

    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    pub fn expect_put(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Put, path)
    }

    pub fn expect_delete(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Delete, path)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    /// The most recent request, if any.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.lock().requests.last().cloned()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.lock();
        if !state.mismatches.is_empty() {
            panic!("Unexpected requests: {:?}", state.mismatches);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, FrameworkError> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        let matches = state
            .expectations
            .front()
            .is_some_and(|e| e.matches(&request));
        if !matches {
            let description = format!(
                "{} {} query={:?} body={:?}",
                request.method, request.path, request.query, request.body
            );
            state.mismatches.push(description.clone());
            return Err(FrameworkError::Transport(format!(
                "unexpected request: {description}"
            )));
        }

        match state.expectations.pop_front() {
            Some(expectation) => expectation.response,
            None => Err(FrameworkError::Transport("no expectation left".into())),
        }
    }
}

/// Builder for one expectation; finish it with a `return_*` call.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    state: Arc<Mutex<MockState>>,
}

impl ExpectationBuilder {
    /// Also require the query pair `key=value`; other pairs are ignored.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Also require this exact JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    fn push(self, response: Result<RawResponse, FrameworkError>) {
        let mut state = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        state.expectations.push_back(Expectation {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            response,
        });
    }

    fn push_json<B: Serialize>(self, status: u16, body: &B) {
        let response = serde_json::to_vec(body)
            .map(|bytes| RawResponse::new(status, bytes))
            .map_err(FrameworkError::from);
        self.push(response);
    }

    /// Answers 200 with `data` as the envelope payload.
    pub fn return_data<T: Serialize>(self, data: T) {
        self.push_json(200, &ApiResponse::ok(data));
    }

    /// Answers 200 with a list payload and its pagination block.
    pub fn return_page<T: Serialize>(self, data: Vec<T>, pagination: Pagination) {
        self.push_json(200, &ApiResponse::ok(data).with_pagination(pagination));
    }

    /// Answers 200 with a complete envelope.
    pub fn return_envelope<T: Serialize>(self, envelope: ApiResponse<T>) {
        self.push_json(200, &envelope);
    }

    /// Answers 200 with an envelope carrying only an error.
    pub fn return_api_error(self, message: &str, code: &str) {
        self.push_json(
            200,
            &ApiResponse::<()>::failure(ApiErrorBody::new(message, code)),
        );
    }

    /// Answers with an arbitrary status and JSON body.
    pub fn return_json(self, status: u16, body: serde_json::Value) {
        self.push_json(status, &body);
    }

    /// Answers with an arbitrary status and raw body.
    pub fn return_raw(self, status: u16, body: impl Into<Vec<u8>>) {
        self.push(Ok(RawResponse::new(status, body.into())));
    }

    /// Fails without a response, as a refused connection would.
    pub fn return_transport_error(self, message: &str) {
        self.push(Err(FrameworkError::Transport(message.to_string())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn records_requests_in_order() {
        let mock = MockTransport::new();
        mock.expect_get("/a").return_data(1);
        mock.expect_delete("/b").return_raw(204, Vec::new());

        let client = mock.client();
        assert_eq!(client.fetch::<i32>(ApiRequest::get("/a")).await.unwrap(), 1);
        client.dispatch(ApiRequest::delete("/b")).await.unwrap();

        let paths: Vec<_> = mock.requests().into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/a", "/b"]);
        mock.verify();
    }

    #[tokio::test]
    async fn unexpected_request_fails_and_is_reported() {
        let mock = MockTransport::new();
        mock.expect_get("/a").return_data(1);

        let err = mock.client().send(ApiRequest::post("/a")).await.unwrap_err();
        assert!(matches!(err, FrameworkError::Transport(_)));

        let verified = std::panic::catch_unwind(|| mock.verify());
        assert!(verified.is_err());
    }

    #[tokio::test]
    async fn query_and_body_matchers_are_enforced() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/recipes/search")
            .with_query("q", "soup")
            .return_data(Vec::<i32>::new());
        mock.expect_post("/api/v1/recipes")
            .with_body(json!({"name": "pasta"}))
            .return_data(1);
        let client = mock.client();

        let wrong_query = ApiRequest::get("/api/v1/recipes/search").with_query([("q", "stew")]);
        assert!(client.send(wrong_query).await.is_err());

        let right_query = ApiRequest::get("/api/v1/recipes/search").with_query([("q", "soup"), ("page", "2")]);
        client.fetch::<Vec<i32>>(right_query).await.unwrap();

        let wrong_body = ApiRequest::post("/api/v1/recipes").with_body(&json!({"name": "pizza"})).unwrap();
        assert!(client.send(wrong_body).await.is_err());

        let right_body = ApiRequest::post("/api/v1/recipes").with_body(&json!({"name": "pasta"})).unwrap();
        assert_eq!(client.fetch::<i32>(right_body).await.unwrap(), 1);

        let verified = std::panic::catch_unwind(|| mock.verify());
        assert!(verified.is_err(), "mismatches must be reported");
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_panics_on_leftovers() {
        let mock = MockTransport::new();
        mock.expect_get("/never").return_json(200, json!({"data": null}));
        mock.verify();
    }

    #[tokio::test]
    async fn transport_error_is_propagated() {
        let mock = MockTransport::new();
        mock.expect_get("/down").return_transport_error("connection refused");
        let err = mock.client().fetch::<i32>(ApiRequest::get("/down")).await.unwrap_err();
        assert_eq!(err, FrameworkError::Transport("connection refused".into()));
    }
}
