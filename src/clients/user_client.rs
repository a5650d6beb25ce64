use api_framework::ApiRequest;
use tracing::{debug, info, instrument};

use crate::model::{User, UserCreationResponse, UserRegistrationInput};
use crate::ClientError;

resource_client!(User, "/api/v1/users", searchable);

impl UserClient {
    pub const SELF_PATH: &'static str = "/api/v1/users/self";
    pub const REGISTRATION_PATH: &'static str = "/users";

    /// The user the session belongs to.
    #[instrument(skip(self))]
    pub async fn get_self(&self) -> Result<User, ClientError> {
        debug!("Sending request");
        Ok(self.inner.api().fetch(ApiRequest::get(Self::SELF_PATH)).await?)
    }

    /// Registers a new account. Lives outside `/api/v1` and needs no session.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(
        &self,
        input: &UserRegistrationInput,
    ) -> Result<UserCreationResponse, ClientError> {
        debug!("Sending request");
        let request = ApiRequest::post(Self::REGISTRATION_PATH).with_body(input)?;
        let created: UserCreationResponse = self.inner.api().fetch(request).await?;
        info!(user_id = %created.created_user_id, "Registered");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_framework::mock::MockTransport;
    use api_framework::{Pagination, QueryFilter, ResourceApi, SearchableApi};

    #[tokio::test]
    async fn get_self_reads_the_session_user() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/users/self")
            .return_data(User::new("alice", "alice@example.com"));

        let client = UserClient::new(mock.client());
        let me = client.get_self().await.unwrap();

        assert_eq!(me.username, "alice");
        mock.verify();
    }

    #[tokio::test]
    async fn create_user_posts_registration() {
        let mock = MockTransport::new();
        let created = UserCreationResponse {
            created_user_id: "u9".into(),
            username: "bob".into(),
            ..Default::default()
        };
        mock.expect_post("/users").return_data(&created);

        let client = UserClient::new(mock.client());
        let input = UserRegistrationInput::new("bob", "bob@example.com", "correct horse");
        let response = client.create_user(&input).await.unwrap();

        assert_eq!(response.created_user_id, "u9");
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["emailAddress"], "bob@example.com");
        mock.verify();
    }

    #[tokio::test]
    async fn users_are_searchable() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/users/search").return_page(
            vec![User::new("alice", "a@example.com")],
            Pagination::default(),
        );

        let client = UserClient::new(mock.client());
        let page = client.search("ali", &QueryFilter::default()).await.unwrap();

        assert_eq!(page.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn not_found_surfaces_server_message() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/users/u404").return_api_error("user not found", "404");

        let client = UserClient::new(mock.client());
        let err = client.get("u404").await.unwrap_err();

        assert_eq!(err.to_string(), "user not found");
        assert!(err.is_not_found());
        mock.verify();
    }
}
