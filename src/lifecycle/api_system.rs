use api_framework::{ApiClient, HttpTransport, ReqwestTransport};
use tracing::info;

use crate::clients::{
    AuthClient, HouseholdClient, MealPlanClient, RecipeClient, UserClient, ValidIngredientClient,
    ValidPreparationClient,
};
use crate::config::ClientConfig;
use crate::session::SessionGate;
use crate::ClientError;

/// Every typed client, wired to one shared transport.
///
/// `ApiSystem` is responsible for:
/// - **Transport Setup**: Building the reqwest transport from [`ClientConfig`]
///   (base URL, identity headers, bearer token, timeout, cookie jar)
/// - **Client Wiring**: Handing the same [`ApiClient`] to every resource client,
///   so session cookies set by one call are replayed by the next
/// - **Session Gate**: Exposing a [`SessionGate`] keyed on the configured cookie name
///
/// Nested collections (recipe steps, meal plan events) are reached through
/// their parent client, e.g. `system.recipes.steps("r1")?`.
///
/// # Example
///
/// ```no_run
/// use api_framework::{QueryFilter, ResourceApi};
/// use mealplan_client::config::ClientConfig;
/// use mealplan_client::lifecycle::ApiSystem;
///
/// # async fn run() -> Result<(), mealplan_client::ClientError> {
/// let system = ApiSystem::new(&ClientConfig::load(None)?)?;
///
/// let page = system.recipes.list(&QueryFilter::default()).await?;
/// for recipe in &page {
///     println!("{}", recipe.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiSystem {
    /// `/api/v1/recipes` and, via `steps()`, their steps
    pub recipes: RecipeClient,

    /// `/api/v1/meal_plans` and, via `events()`, their events
    pub meal_plans: MealPlanClient,

    /// `/api/v1/valid_ingredients`
    pub valid_ingredients: ValidIngredientClient,

    /// `/api/v1/valid_preparations`
    pub valid_preparations: ValidPreparationClient,

    /// `/api/v1/households`, plus the active household
    pub households: HouseholdClient,

    /// `/api/v1/users`, the session user, and registration
    pub users: UserClient,

    /// JWT login
    pub auth: AuthClient,

    /// Page-level cookie check
    pub session_gate: SessionGate,

    api: ApiClient,
}

impl ApiSystem {
    /// Builds a system that talks HTTP to `config.base_url`.
    ///
    /// # Errors
    ///
    /// [`ClientError::Communication`] when the base URL does not parse or the
    /// HTTP client cannot be constructed (e.g. a header value with control
    /// characters).
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::with_options(&config.base_url, config.transport_options())?;
        info!(base_url = %transport.base_url(), client = %config.client_name, "API system ready");
        Ok(Self::assemble(
            ApiClient::new(transport),
            SessionGate::new(config.session_cookie_name.clone()),
        ))
    }

    /// Builds a system on an arbitrary transport, e.g. a
    /// [`MockTransport`](api_framework::mock::MockTransport) in tests.
    pub fn with_transport(transport: impl HttpTransport + 'static) -> Self {
        Self::assemble(ApiClient::new(transport), SessionGate::default())
    }

    fn assemble(api: ApiClient, session_gate: SessionGate) -> Self {
        Self {
            recipes: RecipeClient::new(api.clone()),
            meal_plans: MealPlanClient::new(api.clone()),
            valid_ingredients: ValidIngredientClient::new(api.clone()),
            valid_preparations: ValidPreparationClient::new(api.clone()),
            households: HouseholdClient::new(api.clone()),
            users: UserClient::new(api.clone()),
            auth: AuthClient::new(api.clone()),
            session_gate,
            api,
        }
    }

    /// The shared request helper, for endpoints without a typed client.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
