use api_framework::{ApiResource, WritableResource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidPreparation;

/// A recipe and its ordered steps.
///
/// # API Framework
/// Implements [`ApiResource`] and [`WritableResource`], so a
/// [`ResourceClient`](api_framework::ResourceClient) can list, search, fetch,
/// create, update and archive it under `/api/v1/recipes`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID")]
    pub inspired_by_recipe_id: Option<String>,
    pub minimum_estimated_portions: f32,
    pub maximum_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    pub created_by_user: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
    pub steps: Vec<RecipeStep>,
}

/// Payload for creating a new recipe.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeCreationRequestInput {
    pub name: String,
    pub slug: String,
    pub source: String,
    pub description: String,
    #[serde(rename = "inspiredByRecipeID", skip_serializing_if = "Option::is_none")]
    pub inspired_by_recipe_id: Option<String>,
    pub minimum_estimated_portions: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_portions: Option<f32>,
    pub portion_name: String,
    pub plural_portion_name: String,
    pub seal_of_approval: bool,
    pub eligible_for_meals: bool,
    pub steps: Vec<RecipeStepCreationRequestInput>,
}

/// Payload for updating an existing recipe; unset fields are left alone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_estimated_portions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_portions: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portion_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_portion_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_of_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eligible_for_meals: Option<bool>,
}

impl Recipe {
    /// Creates a new Recipe instance.
    ///
    /// # Notes
    /// The `id` field is left empty; the server assigns it.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            minimum_estimated_portions: 1.0,
            ..Self::default()
        }
    }
}

impl RecipeCreationRequestInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimum_estimated_portions: 1.0,
            ..Self::default()
        }
    }
}

impl From<&Recipe> for RecipeCreationRequestInput {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            slug: recipe.slug.clone(),
            source: recipe.source.clone(),
            description: recipe.description.clone(),
            inspired_by_recipe_id: recipe.inspired_by_recipe_id.clone(),
            minimum_estimated_portions: recipe.minimum_estimated_portions,
            maximum_estimated_portions: recipe.maximum_estimated_portions,
            portion_name: recipe.portion_name.clone(),
            plural_portion_name: recipe.plural_portion_name.clone(),
            seal_of_approval: recipe.seal_of_approval,
            eligible_for_meals: recipe.eligible_for_meals,
            steps: recipe.steps.iter().map(RecipeStepCreationRequestInput::from).collect(),
        }
    }
}

impl ApiResource for Recipe {
    const NAME: &'static str = "recipe";
    const ID_PARAM: &'static str = "recipeID";
}

impl WritableResource for Recipe {
    type Create = RecipeCreationRequestInput;
    type Update = RecipeUpdateRequestInput;
}

/// One step of a recipe, nested under `/api/v1/recipes/{recipeID}/steps`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStep {
    pub id: String,
    pub index: u32,
    pub preparation: ValidPreparation,
    pub minimum_estimated_time_in_seconds: Option<u32>,
    pub maximum_estimated_time_in_seconds: Option<u32>,
    pub minimum_temperature_in_celsius: Option<f32>,
    pub maximum_temperature_in_celsius: Option<f32>,
    pub notes: String,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub optional: bool,
    pub start_timer_automatically: bool,
    pub belongs_to_recipe: String,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepCreationRequestInput {
    pub index: u32,
    #[serde(rename = "preparationID")]
    pub preparation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_estimated_time_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_time_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_temperature_in_celsius: Option<f32>,
    pub notes: String,
    pub explicit_instructions: String,
    pub condition_expression: String,
    pub optional: bool,
    pub start_timer_automatically: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipeStepUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    #[serde(rename = "preparationID", skip_serializing_if = "Option::is_none")]
    pub preparation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_estimated_time_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_estimated_time_in_seconds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explicit_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
}

impl RecipeStepCreationRequestInput {
    pub fn new(index: u32, preparation_id: impl Into<String>) -> Self {
        Self {
            index,
            preparation_id: preparation_id.into(),
            ..Self::default()
        }
    }
}

impl From<&RecipeStep> for RecipeStepCreationRequestInput {
    fn from(step: &RecipeStep) -> Self {
        Self {
            index: step.index,
            preparation_id: step.preparation.id.clone(),
            minimum_estimated_time_in_seconds: step.minimum_estimated_time_in_seconds,
            maximum_estimated_time_in_seconds: step.maximum_estimated_time_in_seconds,
            minimum_temperature_in_celsius: step.minimum_temperature_in_celsius,
            maximum_temperature_in_celsius: step.maximum_temperature_in_celsius,
            notes: step.notes.clone(),
            explicit_instructions: step.explicit_instructions.clone(),
            condition_expression: step.condition_expression.clone(),
            optional: step.optional,
            start_timer_automatically: step.start_timer_automatically,
        }
    }
}

impl ApiResource for RecipeStep {
    const NAME: &'static str = "recipe_step";
    const ID_PARAM: &'static str = "recipeStepID";
}

impl WritableResource for RecipeStep {
    type Create = RecipeStepCreationRequestInput;
    type Update = RecipeStepUpdateRequestInput;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_server_shape_with_missing_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "id": "r1",
            "name": "Soup",
            "inspiredByRecipeID": "r0",
            "minimumEstimatedPortions": 4.0,
            "createdAt": "2024-03-01T12:00:00Z",
            "steps": [{"id": "s1", "index": 0, "preparation": {"id": "p1", "name": "dice"}}]
        }))
        .unwrap();

        assert_eq!(recipe.inspired_by_recipe_id.as_deref(), Some("r0"));
        assert_eq!(recipe.steps[0].preparation.name, "dice");
        assert!(recipe.archived_at.is_none());
        assert_eq!(recipe.slug, "");
    }

    #[test]
    fn update_input_omits_unset_fields() {
        let update = RecipeUpdateRequestInput {
            name: Some("Stew".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(update).unwrap(), json!({"name": "Stew"}));
    }

    #[test]
    fn creation_input_from_existing_recipe() {
        let mut recipe = Recipe::new("Soup", "Warm");
        recipe.steps.push(RecipeStep {
            index: 0,
            preparation: ValidPreparation::new("boil"),
            ..Default::default()
        });
        recipe.steps[0].preparation.id = "p1".into();

        let input = RecipeCreationRequestInput::from(&recipe);
        assert_eq!(input.name, "Soup");
        assert_eq!(input.steps[0].preparation_id, "p1");
        assert_eq!(serde_json::to_value(&input).unwrap()["steps"][0]["preparationID"], "p1");
    }
}
