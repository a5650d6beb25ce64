use api_framework::{ApiResource, WritableResource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a meal plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealPlanStatus {
    #[default]
    AwaitingVotes,
    Finalized,
}

/// Which meal of the day an event covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealName {
    Breakfast,
    SecondBreakfast,
    Brunch,
    Lunch,
    Supper,
    #[default]
    Dinner,
}

/// A household's plan for a stretch of meals, decided by vote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlan {
    pub id: String,
    pub notes: String,
    pub status: MealPlanStatus,
    pub voting_deadline: Option<DateTime<Utc>>,
    pub election_method: String,
    pub tasks_created: bool,
    pub grocery_list_initialized: bool,
    pub belongs_to_household: String,
    pub created_by_user: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub events: Vec<MealPlanEvent>,
}

impl MealPlan {
    pub fn is_finalized(&self) -> bool {
        self.status == MealPlanStatus::Finalized
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlanCreationRequestInput {
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<DateTime<Utc>>,
    pub election_method: String,
    pub events: Vec<MealPlanEventCreationRequestInput>,
}

impl MealPlanCreationRequestInput {
    pub fn new(voting_deadline: DateTime<Utc>) -> Self {
        Self {
            voting_deadline: Some(voting_deadline),
            election_method: "schulze".to_owned(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlanUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belongs_to_household: Option<String>,
}

impl ApiResource for MealPlan {
    const NAME: &'static str = "meal_plan";
    const ID_PARAM: &'static str = "mealPlanID";
}

impl WritableResource for MealPlan {
    type Create = MealPlanCreationRequestInput;
    type Update = MealPlanUpdateRequestInput;
}

/// One meal slot in a plan, nested under `/api/v1/meal_plans/{mealPlanID}/events`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlanEvent {
    pub id: String,
    pub notes: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub meal_name: MealName,
    pub belongs_to_meal_plan: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlanEventCreationRequestInput {
    pub notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub meal_name: MealName,
}

impl MealPlanEventCreationRequestInput {
    pub fn new(meal_name: MealName, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        Self {
            meal_name,
            starts_at: Some(starts_at),
            ends_at: Some(ends_at),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MealPlanEventUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meal_name: Option<MealName>,
}

impl ApiResource for MealPlanEvent {
    const NAME: &'static str = "meal_plan_event";
    const ID_PARAM: &'static str = "mealPlanEventID";
}

impl WritableResource for MealPlanEvent {
    type Create = MealPlanEventCreationRequestInput;
    type Update = MealPlanEventUpdateRequestInput;
}
