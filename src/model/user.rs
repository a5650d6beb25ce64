use api_framework::ApiResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Represents a registered user account.
///
/// Users are read-only through `/api/v1/users`; accounts are created through
/// the registration endpoint (see [`UserRegistrationInput`](super::UserRegistrationInput)).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub birthday: Option<DateTime<Utc>>,
    pub avatar: Option<String>,
    pub account_status: String,
    pub account_status_explanation: String,
    pub service_roles: String,
    pub requires_password_change: bool,
    pub email_address_verified_at: Option<DateTime<Utc>>,
    pub two_factor_secret_verified_at: Option<DateTime<Utc>>,
    pub password_last_changed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_updated_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Notes
    /// The `id` field is initialized as an empty string and will be set by the server.
    pub fn new(username: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email_address: email_address.into(),
            ..Self::default()
        }
    }

    /// "First Last", falling back to the username when no name is on file.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_owned()
        }
    }

    pub fn email_verified(&self) -> bool {
        self.email_address_verified_at.is_some()
    }

    pub fn two_factor_enabled(&self) -> bool {
        self.two_factor_secret_verified_at.is_some()
    }
}

impl ApiResource for User {
    const NAME: &'static str = "user";
    const ID_PARAM: &'static str = "userID";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_username() {
        let mut user = User::new("alice", "alice@example.com");
        assert_eq!(user.display_name(), "alice");

        user.first_name = "Alice".into();
        assert_eq!(user.display_name(), "Alice");

        user.last_name = "Liddell".into();
        assert_eq!(user.display_name(), "Alice Liddell");
    }
}
