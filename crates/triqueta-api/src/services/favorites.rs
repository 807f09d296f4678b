//! `/favoritos`: the user's saved activities.

use crate::http::{execute, fetch};
use crate::models::{Favorite, FavoriteCheck, FavoriteFilters, FavoriteList};
use crate::ApiResult;
use serde::Deserialize;
use serde_json::json;
use triqueta_auth::{ApiRequest, AuthenticatedApiClient};
use uuid::Uuid;

#[derive(Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Clone, Debug)]
pub struct FavoritesService {
    client: AuthenticatedApiClient,
}

impl FavoritesService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    pub async fn add(&self, actividad_id: Uuid) -> ApiResult<Favorite> {
        fetch(
            &self.client,
            ApiRequest::post("favoritos").json(&json!({ "actividad_id": actividad_id }))?,
        )
        .await
    }

    pub async fn remove(&self, actividad_id: Uuid) -> ApiResult<()> {
        execute(
            &self.client,
            ApiRequest::delete(format!("favoritos/{}", actividad_id)),
        )
        .await?;
        Ok(())
    }

    pub async fn list(&self, filters: &FavoriteFilters) -> ApiResult<FavoriteList> {
        fetch(&self.client, filters.apply(ApiRequest::get("favoritos"))).await
    }

    pub async fn check(&self, actividad_id: Uuid) -> ApiResult<FavoriteCheck> {
        fetch(
            &self.client,
            ApiRequest::get(format!("favoritos/check/{}", actividad_id)),
        )
        .await
    }

    pub async fn count(&self) -> ApiResult<u64> {
        let response: CountResponse = fetch(&self.client, ApiRequest::get("favoritos/count")).await?;
        Ok(response.count)
    }
}
