//! Pure data structures (DTOs) implementing [`ApiResource`](api_framework::ApiResource).

pub mod auth;
pub mod household;
pub mod meal_plan;
pub mod recipe;
pub mod user;
pub mod valid_enumerations;

pub use auth::*;
pub use household::*;
pub use meal_plan::*;
pub use recipe::*;
pub use user::*;
pub use valid_enumerations::*;
