use crate::http::fetch;
use crate::models::{RecommendationList, RecommendationQuery};
use crate::ApiResult;
use triqueta_auth::{ApiRequest, AuthenticatedApiClient};

/// `/recomendaciones`: personalised suggestions.
#[derive(Clone, Debug)]
pub struct RecommendationsService {
    client: AuthenticatedApiClient,
}

impl RecommendationsService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &RecommendationQuery) -> ApiResult<RecommendationList> {
        fetch(&self.client, query.apply(ApiRequest::get("recomendaciones"))).await
    }
}
