//! Clients for the admin-curated reference data recipes are built from.

use crate::model::{ValidIngredient, ValidPreparation};

resource_client!(ValidIngredient, "/api/v1/valid_ingredients", writable, searchable);
resource_client!(ValidPreparation, "/api/v1/valid_preparations", writable, searchable);

#[cfg(test)]
mod tests {
    use super::*;
    use api_framework::mock::MockTransport;
    use api_framework::{Pagination, QueryFilter, ResourceApi, SearchableApi, WritableApi};
    use crate::model::{ValidIngredientUpdateRequestInput, ValidPreparationCreationRequestInput};
    use crate::ClientError;

    #[tokio::test]
    async fn ingredient_search_merges_filter() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/valid_ingredients/search")
            .with_query("q", "gar")
            .with_query("limit", "5")
            .return_page(vec![ValidIngredient::new("garlic")], Pagination::default());

        let client = ValidIngredientClient::new(mock.client());
        let filter = QueryFilter::builder().limit(5).build();
        let page = client.search("gar", &filter).await.unwrap();

        assert_eq!(page.data()[0].name, "garlic");
        let sent = mock.last_request().unwrap();
        assert_eq!(sent.query_value("q"), Some("gar"));
        assert_eq!(sent.query_value("limit"), Some("5"));
        mock.verify();
    }

    #[tokio::test]
    async fn ingredient_update_only_sends_changed_fields() {
        let mock = MockTransport::new();
        mock.expect_put("/api/v1/valid_ingredients/vi1")
            .with_body(serde_json::json!({"name": "garlic"}))
            .return_data(ValidIngredient::new("garlic"));

        let client = ValidIngredientClient::new(mock.client());
        let input = ValidIngredientUpdateRequestInput {
            name: Some("garlic".into()),
            ..Default::default()
        };
        client.update("vi1", &input).await.unwrap();

        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body, serde_json::json!({"name": "garlic"}));
        mock.verify();
    }

    #[tokio::test]
    async fn preparation_create_surfaces_server_error() {
        let mock = MockTransport::new();
        mock.expect_post("/api/v1/valid_preparations")
            .return_api_error("name already taken", "409");

        let client = ValidPreparationClient::new(mock.client());
        let input = ValidPreparationCreationRequestInput::new("dice", "diced");
        let err = client.create(&input).await.unwrap_err();

        assert_eq!(err.to_string(), "name already taken");
        assert!(matches!(err, ClientError::Api(_)));
        mock.verify();
    }

    #[tokio::test]
    async fn preparation_get_rejects_blank_id() {
        let mock = MockTransport::new();
        let client = ValidPreparationClient::new(mock.client());

        let err = client.get("").await.unwrap_err();

        assert_eq!(err, ClientError::MissingParameter("validPreparationID".into()));
        assert!(mock.requests().is_empty());
    }
}
