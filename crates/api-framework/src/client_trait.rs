//! # ResourceApi Trait
//!
//! Provides a common interface for resource‑specific clients, adding default
//! CRUD methods built on top of a generic [`ResourceClient`].
use crate::{
    ApiResource, FrameworkError, QueryFilter, QueryFilteredResult, ResourceClient, WritableResource,
};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard endpoints.
///
/// Implementors supply the inner [`ResourceClient`] and an error mapping; list,
/// get and archive come for free. [`WritableApi`] and [`SearchableApi`] add
/// the endpoints only some collections have.
///
/// # Example
///
/// ```rust
/// use api_framework::{ApiResource, FrameworkError, ResourceApi, ResourceClient};
/// use serde::Deserialize;
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct Household { id: String, name: String }
///
/// impl ApiResource for Household {
///     const NAME: &'static str = "household";
///     const ID_PARAM: &'static str = "householdID";
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("household error: {0}")]
/// struct HouseholdError(String);
///
/// struct HouseholdClient {
///     inner: ResourceClient<Household>,
/// }
///
/// impl ResourceApi<Household> for HouseholdClient {
///     type Error = HouseholdError;
///
///     fn inner(&self) -> &ResourceClient<Household> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         HouseholdError(e.to_string())
///     }
/// }
///
/// async fn usage(client: HouseholdClient) {
///     // get() and archive() are provided automatically!
///     let _ = client.get("h1").await;
///     let _ = client.archive("h1").await;
/// }
/// ```
#[async_trait]
pub trait ResourceApi<T: ApiResource>: Send + Sync {
    /// The resource-specific error type.
    type Error: std::error::Error + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch one page of the collection.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn list(&self, filter: &QueryFilter) -> Result<QueryFilteredResult<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn get(&self, id: &str) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Archive (soft-delete) an entity by ID.
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn archive(&self, id: &str) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().archive(id).await.map_err(Self::map_error)
    }
}

/// Adds `POST` and `PUT` to collections that accept writes.
#[async_trait]
pub trait WritableApi<T: WritableResource>: ResourceApi<T> {
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn create(&self, input: &T::Create) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().create(input).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, input), fields(resource = T::NAME))]
    async fn update(&self, id: &str, input: &T::Update) -> Result<T, Self::Error> {
        tracing::debug!(?input, "Sending request");
        self.inner().update(id, input).await.map_err(Self::map_error)
    }
}

/// Adds the `/search` endpoint to collections that have one.
#[async_trait]
pub trait SearchableApi<T: ApiResource>: ResourceApi<T> {
    #[tracing::instrument(skip(self), fields(resource = T::NAME))]
    async fn search(
        &self,
        query: &str,
        filter: &QueryFilter,
    ) -> Result<QueryFilteredResult<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().search(query, filter).await.map_err(Self::map_error)
    }
}
