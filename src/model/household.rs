use api_framework::{ApiResource, WritableResource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::User;

/// A group of users who plan meals together.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Household {
    pub id: String,
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub billing_status: String,
    #[serde(rename = "subscriptionPlanID")]
    pub subscription_plan_id: Option<String>,
    pub belongs_to_user: String,
    pub members: Vec<HouseholdUserMembership>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

/// A user's seat in a household.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdUserMembership {
    pub id: String,
    pub belongs_to_user: Option<User>,
    pub belongs_to_household: String,
    pub household_role: String,
    pub default_household: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Household {
    /// Members whose user record came back with the membership.
    pub fn member_users(&self) -> impl Iterator<Item = &User> {
        self.members.iter().filter_map(|m| m.belongs_to_user.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdCreationRequestInput {
    pub name: String,
    pub contact_phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl HouseholdCreationRequestInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HouseholdUpdateRequestInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ApiResource for Household {
    const NAME: &'static str = "household";
    const ID_PARAM: &'static str = "householdID";
}

impl WritableResource for Household {
    type Create = HouseholdCreationRequestInput;
    type Update = HouseholdUpdateRequestInput;
}
