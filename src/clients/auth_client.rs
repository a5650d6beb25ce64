use api_framework::{ApiClient, ApiRequest, ApiResponse, FrameworkError};
use tracing::{debug, info, instrument, warn};

use crate::model::{JWTResponse, UserLoginInput};
use crate::ClientError;

/// Server message meaning "password accepted, send the one-time code too".
pub const TOTP_REQUIRED: &str = "totp required";

/// Client for the login endpoints outside `/api/v1`.
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub const JWT_LOGIN_PATH: &'static str = "/users/login/jwt";

    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Exchanges credentials for a JWT.
    ///
    /// A TOTP challenge is not a failure: the envelope comes back with its
    /// `error` set so the caller can prompt for a code and retry with
    /// [`UserLoginInput::with_totp`]. Use [`needs_totp`] to check.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login_for_jwt(
        &self,
        input: &UserLoginInput,
    ) -> Result<ApiResponse<JWTResponse>, ClientError> {
        debug!("Sending request");
        let request = ApiRequest::post(Self::JWT_LOGIN_PATH).with_body(input)?;

        let envelope = match self.api.envelope::<JWTResponse>(request).await {
            Ok(envelope) => envelope,
            Err(FrameworkError::Api(error)) if is_totp_challenge(&error.message) => {
                ApiResponse::failure(error)
            }
            Err(e) => return Err(e.into()),
        };

        match &envelope.error {
            Some(error) if is_totp_challenge(&error.message) => {
                info!("TOTP code required");
                Ok(envelope)
            }
            Some(error) => {
                warn!(message = %error.message, "Login rejected");
                Err(ClientError::Api(error.clone()))
            }
            None => Ok(envelope),
        }
    }
}

fn is_totp_challenge(message: &str) -> bool {
    message.trim().to_lowercase() == TOTP_REQUIRED
}

/// Whether a login envelope is asking for a TOTP code.
pub fn needs_totp(envelope: &ApiResponse<JWTResponse>) -> bool {
    envelope
        .error
        .as_ref()
        .is_some_and(|error| is_totp_challenge(&error.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_framework::mock::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn successful_login_returns_token() {
        let mock = MockTransport::new();
        mock.expect_post("/users/login/jwt").return_data(JWTResponse {
            user_id: "u1".into(),
            household_id: "h1".into(),
            token: "jwt".into(),
        });

        let client = AuthClient::new(mock.client());
        let envelope = client
            .login_for_jwt(&UserLoginInput::new("alice", "pw"))
            .await
            .unwrap();

        assert!(!needs_totp(&envelope));
        assert_eq!(envelope.data.unwrap().token, "jwt");
        mock.verify();
    }

    #[tokio::test]
    async fn totp_challenge_is_not_an_error() {
        let mock = MockTransport::new();
        mock.expect_post("/users/login/jwt").return_api_error("TOTP Required", "");

        let client = AuthClient::new(mock.client());
        let envelope = client
            .login_for_jwt(&UserLoginInput::new("alice", "pw"))
            .await
            .unwrap();

        assert!(needs_totp(&envelope));
        mock.verify();
    }

    #[tokio::test]
    async fn totp_challenge_on_error_status_is_not_an_error() {
        let mock = MockTransport::new();
        mock.expect_post("/users/login/jwt")
            .return_json(401, json!({"error": {"message": "totp required"}}));

        let client = AuthClient::new(mock.client());
        let envelope = client
            .login_for_jwt(&UserLoginInput::new("alice", "pw"))
            .await
            .unwrap();

        assert!(needs_totp(&envelope));
        mock.verify();
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let mock = MockTransport::new();
        mock.expect_post("/users/login/jwt")
            .return_json(401, json!({"error": {"message": "invalid credentials", "code": 401}}));

        let client = AuthClient::new(mock.client());
        let err = client
            .login_for_jwt(&UserLoginInput::new("alice", "nope"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "invalid credentials");
        mock.verify();
    }

    #[tokio::test]
    async fn totp_token_is_sent_when_given() {
        let mock = MockTransport::new();
        mock.expect_post("/users/login/jwt").return_data(JWTResponse::default());

        let client = AuthClient::new(mock.client());
        let input = UserLoginInput::new("alice", "pw").with_totp("123456");
        client.login_for_jwt(&input).await.unwrap();

        assert_eq!(mock.last_request().unwrap().body.unwrap()["totpToken"], "123456");
        mock.verify();
    }
}
