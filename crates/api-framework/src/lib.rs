//! # API Framework
//!
//! This crate provides the resource-agnostic building blocks for typed REST
//! clients that speak the `{data, pagination, error, details}` envelope.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ApiResource`]) - Your domain models and their create/update bodies
//! 2. **Transport Layer** ([`HttpTransport`]) - Moving bytes: [`ReqwestTransport`] in production, [`mock::MockTransport`] in tests
//! 3. **Interface Layer** ([`ApiClient`], [`ResourceClient`], [`ResourceApi`]) - Envelope rules and type-safe endpoints
//!
//! Endpoint logic is written **once**: [`ApiClient`] issues one request,
//! decodes the envelope, fails with the server's message on an envelope error
//! and otherwise returns the payload or a [`QueryFilteredResult`].
//!
//! ## Query Filters
//!
//! ```rust
//! use api_framework::{QueryFilter, SortDirection};
//!
//! let filter = QueryFilter::builder()
//!     .page(2)
//!     .limit(10)
//!     .sort(SortDirection::Descending)
//!     .build();
//!
//! let record = filter.as_record();
//! assert_eq!(record["page"], "2");
//! assert_eq!(record["limit"], "10");
//! assert_eq!(record["sort"], "desc");
//! assert!(!record.contains_key("search"));
//! ```
//!
//! ## Typed Clients
//!
//! ```rust
//! use api_framework::mock::MockTransport;
//! use api_framework::{ApiResource, ResourceClient, WritableResource};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
//! struct Recipe { id: String, name: String }
//! #[derive(Debug, Serialize)] struct RecipeCreate { name: String }
//! #[derive(Debug, Serialize)] struct RecipeUpdate { name: Option<String> }
//!
//! impl ApiResource for Recipe {
//!     const NAME: &'static str = "recipe";
//!     const ID_PARAM: &'static str = "recipeID";
//! }
//!
//! impl WritableResource for Recipe {
//!     type Create = RecipeCreate;
//!     type Update = RecipeUpdate;
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect_post("/api/v1/recipes")
//!         .return_data(Recipe { id: "r1".into(), name: "Soup".into() });
//!
//!     let recipes = ResourceClient::<Recipe>::new(mock.client(), "/api/v1/recipes");
//!     let created = recipes.create(&RecipeCreate { name: "Soup".into() }).await.unwrap();
//!     assert_eq!(created.id, "r1");
//!
//!     // Blank IDs never reach the network.
//!     assert!(recipes.get("  ").await.is_err());
//!     mock.verify();
//! }
//! ```
//!
//! ## Testing
//!
//! See the [`mock`] module for the expectation-based `MockTransport`.

pub mod client;
pub mod client_trait;
pub mod envelope;
pub mod error;
pub mod http;
pub mod mock;
pub mod page;
pub mod query;
pub mod request;
pub mod resource;
pub mod transport;

// Re-export core types for convenience
pub use client::{ApiClient, ResourceClient};
pub use client_trait::{ResourceApi, SearchableApi, WritableApi};
pub use envelope::{ApiErrorBody, ApiResponse, Pagination, ResponseDetails};
pub use error::FrameworkError;
pub use http::{ReqwestTransport, TransportOptions};
pub use page::QueryFilteredResult;
pub use query::{QueryFilter, QueryFilterBuilder, SortDirection};
pub use request::{interpolate, path_segment, ApiRequest, Method};
pub use resource::{ApiResource, WritableResource};
pub use transport::{HttpTransport, RawResponse};
