use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMetrics {
    pub total: u64,
    pub active: u64,
    pub admins: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub total: u64,
    #[serde(default)]
    pub by_state: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_locality: BTreeMap<String, u64>,
    #[serde(default)]
    pub by_type: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopActivity {
    pub id: i64,
    pub nombre: String,
    pub total_favoritos: u64,
    pub total_vistas: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub total_favorites: u64,
    #[serde(default)]
    pub top_activities: Vec<TopActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlExecutionSummary {
    pub id: i64,
    pub status: String,
    pub source: String,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub records_loaded: u64,
    pub records_failed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlMetrics {
    pub total_executions: u64,
    pub success_executions: u64,
    pub success_rate: f64,
    #[serde(default)]
    pub last_executions: Vec<EtlExecutionSummary>,
}

/// Body of `GET /admin/dashboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub users: UserMetrics,
    pub activities: ActivityMetrics,
    pub engagement: EngagementMetrics,
    pub etl: EtlMetrics,
}

/// Body of `GET /admin/etl/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlStatus {
    pub id: i64,
    pub status: String,
    pub source: String,
    pub started_at: String,
    #[serde(default)]
    pub finished_at: Option<String>,
    pub records_extracted: u64,
    pub records_transformed: u64,
    pub records_loaded: u64,
    pub records_failed: u64,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Row of `GET /admin/etl/executions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlExecution {
    pub id: i64,
    pub status: String,
    pub source: String,
    pub started_at: String,
    #[serde(default)]
    pub finished_at: Option<String>,
    pub records_extracted: u64,
    pub records_transformed: u64,
    pub records_loaded: u64,
    pub records_failed: u64,
    #[serde(default)]
    pub error_message: Option<String>,
    pub triggered_by: String,
}

/// Body of `GET /admin/etl/executions/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlExecutionDetail {
    #[serde(flatten)]
    pub execution: EtlExecution,
    #[serde(default)]
    pub log_file_path: Option<String>,
    /// Job configuration as the JSON text it was submitted with.
    #[serde(default)]
    pub config: Option<String>,
}

/// Body of `POST /admin/etl/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EtlTriggerResponse {
    pub execution_id: i64,
    pub status: String,
    pub message: String,
}

/// Row of `GET /admin/actividades/pendientes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingActivity {
    pub id: i64,
    pub nombre: String,
    pub descripcion: String,
    pub tipo: String,
    pub localidad: String,
    pub direccion: String,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    #[serde(default)]
    pub horario: Option<String>,
    #[serde(default)]
    pub precio: Option<f64>,
    pub es_gratuita: bool,
    pub created_at: String,
    pub fuente: String,
}

/// Body of `POST /admin/actividades/{aprobar,rechazar}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalResponse {
    pub success: bool,
    pub message: String,
}
