use api_framework::ApiRequest;
use tracing::{debug, instrument};

use crate::model::Household;
use crate::ClientError;

resource_client!(Household, "/api/v1/households", writable);

impl HouseholdClient {
    pub const CURRENT_PATH: &'static str = "/api/v1/households/current";

    /// The household the session is currently acting in.
    #[instrument(skip(self))]
    pub async fn active_household(&self) -> Result<Household, ClientError> {
        debug!("Sending request");
        let request = ApiRequest::get(Self::CURRENT_PATH);
        Ok(self.inner.api().fetch(request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_framework::mock::MockTransport;
    use api_framework::ResourceApi;

    #[tokio::test]
    async fn active_household_reads_current() {
        let mock = MockTransport::new();
        let mut household = Household::default();
        household.id = "h1".into();
        household.name = "Home".into();
        mock.expect_get("/api/v1/households/current").return_data(&household);

        let client = HouseholdClient::new(mock.client());
        let current = client.active_household().await.unwrap();

        assert_eq!(current, household);
        mock.verify();
    }

    #[tokio::test]
    async fn missing_payload_is_a_communication_error() {
        let mock = MockTransport::new();
        mock.expect_get("/api/v1/households/h1").return_raw(200, Vec::new());

        let client = HouseholdClient::new(mock.client());
        let err = client.get("h1").await.unwrap_err();

        assert!(matches!(err, ClientError::Communication(_)));
        mock.verify();
    }
}
