//! # Generic Client
//!
//! [`ApiClient`] is the one request-and-unwrap helper every endpoint goes
//! through. [`ResourceClient`] binds it to a collection path and exposes the
//! standard list / search / get / create / update / archive calls.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::envelope::{self, ApiResponse};
use crate::error::FrameworkError;
use crate::page::QueryFilteredResult;
use crate::query::QueryFilter;
use crate::request::{path_segment, ApiRequest};
use crate::resource::{ApiResource, WritableResource};
use crate::transport::{HttpTransport, RawResponse};

pub const SEARCH_QUERY_KEY: &str = "q";

/// Shared handle to a transport plus the envelope rules.
///
/// Cheap to clone; every method issues exactly one request and never retries.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient").finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(transport: impl HttpTransport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, request: ApiRequest) -> Result<RawResponse, FrameworkError> {
        self.transport.send(request).await
    }

    /// Decoded envelope, returned even when it carries an error.
    pub async fn envelope<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, FrameworkError> {
        envelope::decode(self.send(request).await?)
    }

    /// Decoded envelope, failing on an envelope error.
    pub async fn fetch_envelope<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiResponse<T>, FrameworkError> {
        self.envelope(request).await?.into_checked()
    }

    /// Payload of a single-entity endpoint.
    pub async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, FrameworkError> {
        self.envelope(request).await?.into_data()
    }

    /// Page of a list endpoint.
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<QueryFilteredResult<T>, FrameworkError> {
        QueryFilteredResult::from_envelope(self.envelope(request).await?)
    }

    /// Issues a call whose payload, if any, is not needed.
    pub async fn dispatch(&self, request: ApiRequest) -> Result<(), FrameworkError> {
        self.envelope::<serde_json::Value>(request)
            .await?
            .into_checked()
            .map(|_| ())
    }
}

/// A type-safe client for one REST collection.
///
/// `path` is the already-interpolated collection path, e.g. `/api/v1/recipes`
/// or `/api/v1/recipes/r1/steps`.
pub struct ResourceClient<T: ApiResource> {
    api: ApiClient,
    path: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ApiResource> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            path: self.path.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: ApiResource> fmt::Debug for ResourceClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &T::NAME)
            .field("path", &self.path)
            .finish()
    }
}

impl<T: ApiResource> ResourceClient<T> {
    pub fn new(api: ApiClient, path: impl Into<String>) -> Self {
        Self {
            api,
            path: path.into(),
            _entity: PhantomData,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, id: &str) -> Result<String, FrameworkError> {
        Ok(format!("{}/{}", self.path, path_segment(T::ID_PARAM, id)?))
    }

    pub async fn list(&self, filter: &QueryFilter) -> Result<QueryFilteredResult<T>, FrameworkError> {
        let request = ApiRequest::get(self.path.as_str()).with_filter(filter);
        self.api.fetch_list(request).await
    }

    /// `GET <path>/search?q=<query>&<filter>`; a blank query fails before sending.
    pub async fn search(
        &self,
        query: &str,
        filter: &QueryFilter,
    ) -> Result<QueryFilteredResult<T>, FrameworkError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(FrameworkError::MissingParameter(SEARCH_QUERY_KEY.to_string()));
        }
        let request = ApiRequest::get(format!("{}/search", self.path))
            .with_query([(SEARCH_QUERY_KEY, query)])
            .with_filter(filter);
        self.api.fetch_list(request).await
    }

    pub async fn get(&self, id: &str) -> Result<T, FrameworkError> {
        let request = ApiRequest::get(self.item_path(id)?);
        self.api.fetch(request).await
    }

    pub async fn archive(&self, id: &str) -> Result<(), FrameworkError> {
        let request = ApiRequest::delete(self.item_path(id)?);
        debug!(resource = T::NAME, id, "Archiving");
        self.api.dispatch(request).await
    }
}

impl<T: WritableResource> ResourceClient<T> {
    pub async fn create(&self, input: &T::Create) -> Result<T, FrameworkError> {
        let request = ApiRequest::post(self.path.as_str()).with_body(input)?;
        self.api.fetch(request).await
    }

    pub async fn update(&self, id: &str, input: &T::Update) -> Result<T, FrameworkError> {
        let request = ApiRequest::put(self.item_path(id)?).with_body(input)?;
        self.api.fetch(request).await
    }
}
