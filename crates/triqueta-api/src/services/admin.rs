//! `/admin`: dashboard, ETL jobs and activity moderation. Admin accounts only.

use crate::http::fetch;
use crate::models::{
    ApprovalResponse, DashboardMetrics, EtlExecution, EtlExecutionDetail, EtlStatus,
    EtlTriggerResponse, PendingActivity,
};
use crate::ApiResult;
use serde_json::{json, Value};
use tracing::info;
use triqueta_auth::{ApiRequest, AuthenticatedApiClient};

pub const DEFAULT_EXECUTIONS_LIMIT: u32 = 20;
pub const DEFAULT_PENDING_LIMIT: u32 = 50;

#[derive(Clone, Debug)]
pub struct AdminService {
    client: AuthenticatedApiClient,
}

impl AdminService {
    pub fn new(client: AuthenticatedApiClient) -> Self {
        Self { client }
    }

    pub async fn dashboard(&self) -> ApiResult<DashboardMetrics> {
        fetch(&self.client, ApiRequest::get("admin/dashboard")).await
    }

    /// Running or most recent ETL execution. 404 when none ever ran.
    pub async fn etl_status(&self) -> ApiResult<EtlStatus> {
        fetch(&self.client, ApiRequest::get("admin/etl/status")).await
    }

    pub async fn etl_executions(&self, limit: u32, offset: u32) -> ApiResult<Vec<EtlExecution>> {
        fetch(
            &self.client,
            ApiRequest::get("admin/etl/executions")
                .query("limit", limit)
                .query("offset", offset),
        )
        .await
    }

    pub async fn etl_execution(&self, execution_id: i64) -> ApiResult<EtlExecutionDetail> {
        fetch(
            &self.client,
            ApiRequest::get(format!("admin/etl/executions/{}", execution_id)),
        )
        .await
    }

    /// Queue an ETL run for `source` (`idrd`, `csv`, ...).
    pub async fn trigger_etl(
        &self,
        source: &str,
        config: Option<Value>,
    ) -> ApiResult<EtlTriggerResponse> {
        let response: EtlTriggerResponse = fetch(
            &self.client,
            ApiRequest::post("admin/etl/run").json(&json!({ "source": source, "config": config }))?,
        )
        .await?;
        info!(execution_id = response.execution_id, source, "etl run queued");
        Ok(response)
    }

    pub async fn pending_activities(
        &self,
        limit: u32,
        offset: u32,
    ) -> ApiResult<Vec<PendingActivity>> {
        fetch(
            &self.client,
            ApiRequest::get("admin/actividades/pendientes")
                .query("limit", limit)
                .query("offset", offset),
        )
        .await
    }

    pub async fn approve_activity(&self, activity_id: i64) -> ApiResult<ApprovalResponse> {
        self.moderate("admin/actividades/aprobar", activity_id).await
    }

    pub async fn reject_activity(&self, activity_id: i64) -> ApiResult<ApprovalResponse> {
        self.moderate("admin/actividades/rechazar", activity_id).await
    }

    async fn moderate(&self, path: &str, activity_id: i64) -> ApiResult<ApprovalResponse> {
        fetch(
            &self.client,
            ApiRequest::post(path).json(&json!({ "activity_id": activity_id }))?,
        )
        .await
    }
}
