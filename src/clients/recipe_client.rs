use api_framework::ApiClient;
use tracing::{debug, instrument};

use crate::model::{Recipe, RecipeStep};
use crate::ClientError;

resource_client!(Recipe, "/api/v1/recipes", writable, searchable);
resource_client!(RecipeStep, nested "/api/v1/recipes/{recipeID}/steps", "recipeID", writable);

impl RecipeClient {
    /// Steps of one recipe. A blank `recipe_id` fails without building a client.
    #[instrument(skip(self))]
    pub fn steps(&self, recipe_id: &str) -> Result<RecipeStepClient, ClientError> {
        debug!("Binding step client");
        RecipeStepClient::new(self.api(), recipe_id)
    }

    fn api(&self) -> ApiClient {
        self.inner.api().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_framework::mock::MockTransport;
    use api_framework::{Pagination, QueryFilter, ResourceApi, SearchableApi, WritableApi};
    use crate::model::RecipeCreationRequestInput;

    #[tokio::test]
    async fn create_posts_to_the_collection() {
        let mock = MockTransport::new();
        let mut created = Recipe::new("Toast", "Bread, heated");
        created.id = "r1".into();
        mock.expect_post("/api/v1/recipes").return_data(&created);

        let client = RecipeClient::new(mock.client());
        let input = RecipeCreationRequestInput::new("Toast");
        let recipe = client.create(&input).await.unwrap();

        assert_eq!(recipe.id, "r1");
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.body.unwrap()["name"], "Toast");
        mock.verify();
    }

    #[tokio::test]
    async fn search_sends_trimmed_query() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/recipes/search")
            .return_page(vec![Recipe::new("Pancakes", "")], Pagination::default());

        let client = RecipeClient::new(mock.client());
        let page = client.search("  pan  ", &QueryFilter::default()).await.unwrap();

        assert_eq!(page.len(), 1);
        assert_eq!(mock.last_request().unwrap().query_value("q"), Some("pan"));
        mock.verify();
    }

    #[tokio::test]
    async fn blank_search_is_rejected_locally() {
        let mock = MockTransport::new();
        let client = RecipeClient::new(mock.client());

        let err = client.search("   ", &QueryFilter::default()).await.unwrap_err();

        assert_eq!(err, ClientError::MissingParameter("q".into()));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn steps_are_scoped_to_their_recipe() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/recipes/r1/steps/s1")
            .return_data(&RecipeStep::default());

        let client = RecipeClient::new(mock.client());
        let steps = client.steps("r1").unwrap();
        assert_eq!(steps.path(), "/api/v1/recipes/r1/steps");

        steps.get("s1").await.unwrap();
        mock.verify();
    }

    #[test]
    fn steps_need_a_recipe_id() {
        let client = RecipeClient::new(MockTransport::new().client());
        let err = client.steps(" ").unwrap_err();
        assert_eq!(err, ClientError::MissingParameter("recipeID".into()));
    }
}
