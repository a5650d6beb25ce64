//! Login and registration payloads. These endpoints live outside `/api/v1`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Credentials for `POST /users/login/jwt`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserLoginInput {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totp_token: Option<String>,
}

impl UserLoginInput {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            totp_token: None,
        }
    }

    pub fn with_totp(mut self, token: impl Into<String>) -> Self {
        self.totp_token = Some(token.into());
        self
    }
}

/// Token issued on a successful login.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JWTResponse {
    #[serde(rename = "userID")]
    pub user_id: String,
    #[serde(rename = "householdID")]
    pub household_id: String,
    pub token: String,
}

/// Body for `POST /users/`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRegistrationInput {
    pub username: String,
    pub password: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    pub household_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invitation_token: Option<String>,
    #[serde(rename = "invitationID", skip_serializing_if = "Option::is_none")]
    pub invitation_id: Option<String>,
}

impl UserRegistrationInput {
    pub fn new(
        username: impl Into<String>,
        email_address: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email_address: email_address.into(),
            password: password.into(),
            ..Self::default()
        }
    }
}

/// What the server returns after registration, including the TOTP enrolment secret.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserCreationResponse {
    #[serde(rename = "createdUserID")]
    pub created_user_id: String,
    pub username: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<DateTime<Utc>>,
    pub account_status: String,
    pub avatar: Option<String>,
    #[serde(rename = "twoFactorQRCode")]
    pub two_factor_qr_code: String,
    pub two_factor_secret: String,
    pub created_at: Option<DateTime<Utc>>,
}
