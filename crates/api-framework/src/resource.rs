//! # ApiResource Trait
//!
//! The contract every REST entity (Recipe, MealPlan, ValidIngredient, …)
//! implements so the generic [`ResourceClient`](crate::ResourceClient) can
//! list, fetch and archive it. Collections that accept writes also implement
//! [`WritableResource`].

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// An entity served by a REST collection.
///
/// # Example
///
/// ```rust
/// use api_framework::{ApiResource, WritableResource};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Deserialize)]
/// struct Recipe { id: String, name: String }
///
/// #[derive(Debug, Serialize)]
/// struct RecipeCreate { name: String }
///
/// #[derive(Debug, Serialize)]
/// struct RecipeUpdate { name: Option<String> }
///
/// impl ApiResource for Recipe {
///     const NAME: &'static str = "recipe";
///     const ID_PARAM: &'static str = "recipeID";
/// }
///
/// impl WritableResource for Recipe {
///     type Create = RecipeCreate;
///     type Update = RecipeUpdate;
/// }
/// ```
pub trait ApiResource: DeserializeOwned + Debug + Send + Sync + 'static {
    /// Singular name used in logs.
    const NAME: &'static str;

    /// Name of the path parameter holding this entity's ID; reported when it is blank.
    const ID_PARAM: &'static str;
}

/// An entity whose collection accepts `POST` and `PUT`.
pub trait WritableResource: ApiResource {
    /// Request body for `POST <collection>`.
    type Create: Serialize + Debug + Send + Sync;

    /// Request body for `PUT <collection>/{id}`.
    type Update: Serialize + Debug + Send + Sync;
}
