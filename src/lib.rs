//! # Meal Plan API Client
//!
//! Typed client for the meal-planning service's `/api/v1` REST surface.
//!
//! ## 🏗️ How It Fits Together
//!
//! The heavy lifting lives in the `api-framework` crate: the [`QueryFilter`]
//! that becomes flat query parameters, the response envelope, the
//! [`QueryFilteredResult`] page assembled from it, and the generic
//! `ResourceClient<T>` that issues exactly one request per call. This crate
//! adds the domain on top:
//!
//! - **[`model`]**: Pure data structures (recipes, meal plans, households,
//!   users, reference data) implementing `ApiResource`.
//! - **[`clients`]**: One client per collection. Standard endpoints come from
//!   the framework's `ResourceApi`/`WritableApi`/`SearchableApi` traits;
//!   extra endpoints such as [`UserClient::get_self`](clients::UserClient::get_self)
//!   are inherent methods.
//! - **[`session`]**: Pure cookie check deciding whether a page request
//!   proceeds or is redirected to login.
//! - **[`config`]**: [`ClientConfig`](config::ClientConfig) layered from
//!   defaults, a TOML file and `MEALPLAN_*` variables.
//! - **[`lifecycle`]**: [`ApiSystem`](lifecycle::ApiSystem) wiring every
//!   client to one transport, plus [`setup_tracing`](lifecycle::setup_tracing).
//!
//! ## 👩‍💻 Error Handling
//!
//! Every client fails with [`ClientError`]. An error envelope from the server
//! becomes [`ClientError::Api`] and displays as the server's message; data is
//! never returned alongside an error. A blank ID or search term fails with
//! [`ClientError::MissingParameter`] before anything is sent.
//!
//! ## 🚀 Quick Start
//!
//! ```no_run
//! use api_framework::{QueryFilter, ResourceApi, WritableApi};
//! use mealplan_client::config::ClientConfig;
//! use mealplan_client::lifecycle::ApiSystem;
//! use mealplan_client::model::RecipeCreationRequestInput;
//!
//! # async fn run() -> Result<(), mealplan_client::ClientError> {
//! let system = ApiSystem::new(&ClientConfig::load(None)?)?;
//!
//! let created = system.recipes.create(&RecipeCreationRequestInput::new("Shakshuka")).await?;
//! let steps = system.recipes.steps(&created.id)?.list(&QueryFilter::default()).await?;
//! println!("{} has {} steps", created.name, steps.total_count());
//! # Ok(())
//! # }
//! ```
//!
//! ### Running the Demo
//!
//! ```bash
//! MEALPLAN_BASE_URL=http://localhost:8000 RUST_LOG=debug cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test --workspace
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod session;

pub use api_framework::{QueryFilter, QueryFilteredResult};
pub use error::ClientError;
