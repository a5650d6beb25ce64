//! Type-safe wrappers around [`ResourceClient`](api_framework::ResourceClient).
//!
//! Each collection gets a `<Entity>Client` generated by `resource_client!`.
//! The generated client implements [`ResourceApi`](api_framework::ResourceApi)
//! and, when asked, [`WritableApi`](api_framework::WritableApi) and
//! [`SearchableApi`](api_framework::SearchableApi). Endpoints that don't fit
//! the collection shape are added as inherent methods in the per-resource files.

/// Declares `<$entity>Client` for a collection.
///
/// ```rust,ignore
/// resource_client!(Recipe, "/api/v1/recipes", writable, searchable);
/// resource_client!(RecipeStep, nested "/api/v1/recipes/{recipeID}/steps", "recipeID", writable);
/// ```
///
/// The `nested` form takes the parent ID in `new` and fails with
/// [`ClientError::MissingParameter`](crate::ClientError::MissingParameter)
/// when it is blank.
macro_rules! resource_client {
    (@impls $entity:ident) => {};
    (@impls $entity:ident, writable $(, $rest:ident)*) => {
        paste::paste! {
            impl api_framework::WritableApi<$entity> for [<$entity Client>] {}
        }
        resource_client!(@impls $entity $(, $rest)*);
    };
    (@impls $entity:ident, searchable $(, $rest:ident)*) => {
        paste::paste! {
            impl api_framework::SearchableApi<$entity> for [<$entity Client>] {}
        }
        resource_client!(@impls $entity $(, $rest)*);
    };

    (@common $entity:ident) => {
        paste::paste! {
            #[async_trait::async_trait]
            impl api_framework::ResourceApi<$entity> for [<$entity Client>] {
                type Error = $crate::ClientError;

                fn inner(&self) -> &api_framework::ResourceClient<$entity> {
                    &self.inner
                }

                fn map_error(e: api_framework::FrameworkError) -> Self::Error {
                    $crate::ClientError::from(e)
                }
            }
        }
    };

    ($entity:ident, nested $template:literal, $parent:literal $(, $flag:ident)*) => {
        paste::paste! {
            /// Client for a collection nested under one parent entity.
            #[derive(Debug, Clone)]
            pub struct [<$entity Client>] {
                inner: api_framework::ResourceClient<$entity>,
            }

            impl [<$entity Client>] {
                pub const PATH_TEMPLATE: &'static str = $template;

                pub fn new(
                    api: api_framework::ApiClient,
                    parent_id: &str,
                ) -> Result<Self, $crate::ClientError> {
                    let path = api_framework::interpolate(Self::PATH_TEMPLATE, &[($parent, parent_id)])?;
                    Ok(Self {
                        inner: api_framework::ResourceClient::new(api, path),
                    })
                }

                /// The interpolated collection path.
                pub fn path(&self) -> &str {
                    self.inner.path()
                }
            }
        }
        resource_client!(@common $entity);
        resource_client!(@impls $entity $(, $flag)*);
    };

    ($entity:ident, $path:literal $(, $flag:ident)*) => {
        paste::paste! {
            /// Client for one top-level collection.
            #[derive(Debug, Clone)]
            pub struct [<$entity Client>] {
                inner: api_framework::ResourceClient<$entity>,
            }

            impl [<$entity Client>] {
                pub const PATH: &'static str = $path;

                pub fn new(api: api_framework::ApiClient) -> Self {
                    Self {
                        inner: api_framework::ResourceClient::new(api, Self::PATH),
                    }
                }
            }
        }
        resource_client!(@common $entity);
        resource_client!(@impls $entity $(, $flag)*);
    };
}

pub mod auth_client;
pub mod household_client;
pub mod meal_plan_client;
pub mod recipe_client;
pub mod user_client;
pub mod valid_enumeration_clients;

pub use auth_client::*;
pub use household_client::*;
pub use meal_plan_client::*;
pub use recipe_client::*;
pub use user_client::*;
pub use valid_enumeration_clients::*;
