//! Shared vocabularies: the ingredients and preparations recipes refer to.

use api_framework::{ApiResource, WritableResource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ingredient recipes can call for, with its dietary flags.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredient {
    pub id: String,
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub slug: String,
    pub shopping_suggestions: String,
    pub storage_instructions: String,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_liquid: bool,
    pub is_starch: bool,
    pub is_protein: bool,
    pub restrict_to_preparations: bool,
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl ValidIngredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when any of the common allergen flags is set.
    pub fn contains_allergen(&self) -> bool {
        self.contains_dairy
            || self.contains_peanut
            || self.contains_tree_nut
            || self.contains_egg
            || self.contains_wheat
            || self.contains_shellfish
            || self.contains_sesame
            || self.contains_fish
            || self.contains_gluten
            || self.contains_soy
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientCreationRequestInput {
    pub name: String,
    pub plural_name: String,
    pub description: String,
    pub warning: String,
    pub icon_path: String,
    pub slug: String,
    pub shopping_suggestions: String,
    pub storage_instructions: String,
    pub contains_dairy: bool,
    pub contains_peanut: bool,
    pub contains_tree_nut: bool,
    pub contains_egg: bool,
    pub contains_wheat: bool,
    pub contains_shellfish: bool,
    pub contains_sesame: bool,
    pub contains_fish: bool,
    pub contains_gluten: bool,
    pub contains_soy: bool,
    pub contains_alcohol: bool,
    pub animal_flesh: bool,
    pub animal_derived: bool,
    pub is_liquid: bool,
    pub is_starch: bool,
    pub is_protein: bool,
    pub restrict_to_preparations: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_ideal_storage_temperature_in_celsius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ideal_storage_temperature_in_celsius: Option<f32>,
}

impl ValidIngredientCreationRequestInput {
    pub fn new(name: impl Into<String>, plural_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural_name: plural_name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidIngredientUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_dairy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_peanut: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contains_gluten: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_flesh: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animal_derived: Option<bool>,
}

impl ApiResource for ValidIngredient {
    const NAME: &'static str = "valid_ingredient";
    const ID_PARAM: &'static str = "validIngredientID";
}

impl WritableResource for ValidIngredient {
    type Create = ValidIngredientCreationRequestInput;
    type Update = ValidIngredientUpdateRequestInput;
}

/// Something done to ingredients in a recipe step ("dice", "boil", …).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidPreparation {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon_path: String,
    pub past_tense: String,
    pub slug: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub minimum_ingredient_count: u32,
    pub maximum_ingredient_count: Option<u32>,
    pub minimum_instrument_count: u32,
    pub maximum_instrument_count: Option<u32>,
    pub minimum_vessel_count: u32,
    pub maximum_vessel_count: Option<u32>,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub condition_expression_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl ValidPreparation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minimum_ingredient_count: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidPreparationCreationRequestInput {
    pub name: String,
    pub description: String,
    pub icon_path: String,
    pub past_tense: String,
    pub slug: String,
    pub yields_nothing: bool,
    pub restrict_to_ingredients: bool,
    pub minimum_ingredient_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_ingredient_count: Option<u32>,
    pub minimum_instrument_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_instrument_count: Option<u32>,
    pub minimum_vessel_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_vessel_count: Option<u32>,
    pub temperature_required: bool,
    pub time_estimate_required: bool,
    pub condition_expression_required: bool,
    pub consumes_vessel: bool,
    pub only_for_vessels: bool,
}

impl ValidPreparationCreationRequestInput {
    pub fn new(name: impl Into<String>, past_tense: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            past_tense: past_tense.into(),
            minimum_ingredient_count: 1,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidPreparationUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_estimate_required: Option<bool>,
}

impl ApiResource for ValidPreparation {
    const NAME: &'static str = "valid_preparation";
    const ID_PARAM: &'static str = "validPreparationID";
}

impl WritableResource for ValidPreparation {
    type Create = ValidPreparationCreationRequestInput;
    type Update = ValidPreparationUpdateRequestInput;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allergen_flags() {
        let mut peanut = ValidIngredient::new("peanut");
        assert!(!peanut.contains_allergen());
        peanut.contains_peanut = true;
        assert!(peanut.contains_allergen());
    }

    #[test]
    fn preparation_defaults_require_one_ingredient() {
        let dice = ValidPreparationCreationRequestInput::new("dice", "diced");
        let body = serde_json::to_value(&dice).unwrap();
        assert_eq!(body["minimumIngredientCount"], 1);
        assert_eq!(body["pastTense"], "diced");
        assert!(body.get("maximumIngredientCount").is_none());
    }
}
