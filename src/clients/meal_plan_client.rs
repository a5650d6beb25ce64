use tracing::{debug, instrument};

use crate::model::{MealPlan, MealPlanEvent};
use crate::ClientError;

resource_client!(MealPlan, "/api/v1/meal_plans", writable);
resource_client!(MealPlanEvent, nested "/api/v1/meal_plans/{mealPlanID}/events", "mealPlanID", writable);

impl MealPlanClient {
    /// Events of one meal plan.
    #[instrument(skip(self))]
    pub fn events(&self, meal_plan_id: &str) -> Result<MealPlanEventClient, ClientError> {
        debug!("Binding event client");
        MealPlanEventClient::new(self.inner.api().clone(), meal_plan_id)
    }
}
