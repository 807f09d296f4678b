//! `/actividades`: search, detail and admin CRUD.

use crate::http::{execute, fetch};
use crate::models::{Activity, ActivityCreate, ActivityFilters, ActivityList, ActivityUpdate};
use crate::ApiResult;
use tracing::debug;
use triqueta_auth::{ApiRequest, AuthenticatedApiClient};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct ActivitiesService {
    client: AuthenticatedApiClient,
}

impl ActivitiesService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, filters: &ActivityFilters) -> ApiResult<ActivityList> {
        let list: ActivityList =
            fetch(&self.client, filters.apply(ApiRequest::get("actividades"))).await?;
        debug!(
            returned = list.data.len(),
            total = list.pagination.total,
            "activities listed"
        );
        Ok(list)
    }

    pub async fn get(&self, id: Uuid) -> ApiResult<Activity> {
        fetch(&self.client, ApiRequest::get(format!("actividades/{}", id))).await
    }

    /// Admin only.
    pub async fn create(&self, activity: &ActivityCreate) -> ApiResult<Activity> {
        fetch(&self.client, ApiRequest::post("actividades").json(activity)?).await
    }

    /// Admin only.
    pub async fn update(&self, id: Uuid, changes: &ActivityUpdate) -> ApiResult<Activity> {
        fetch(
            &self.client,
            ApiRequest::put(format!("actividades/{}", id)).json(changes)?,
        )
        .await
    }

    /// Admin only.
    pub async fn delete(&self, id: Uuid) -> ApiResult<()> {
        execute(&self.client, ApiRequest::delete(format!("actividades/{}", id))).await?;
        Ok(())
    }

    /// Count a view towards the activity's popularity.
    pub async fn register_view(&self, id: Uuid) -> ApiResult<()> {
        execute(&self.client, ApiRequest::post(format!("actividades/{}/view", id))).await?;
        Ok(())
    }
}
