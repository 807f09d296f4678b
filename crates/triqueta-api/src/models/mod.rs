//! Wire types for the typed services.

mod activity;
mod admin;
mod favorite;
mod recommendation;

pub use activity::{
    Activity, ActivityCreate, ActivityFilters, ActivityList, ActivitySummary, ActivityUpdate,
    Pagination,
};
pub use admin::{
    ActivityMetrics, ApprovalResponse, DashboardMetrics, EngagementMetrics, EtlExecution,
    EtlExecutionDetail, EtlExecutionSummary, EtlMetrics, EtlStatus, EtlTriggerResponse,
    PendingActivity, TopActivity, UserMetrics,
};
pub use favorite::{Favorite, FavoriteCheck, FavoriteFilters, FavoriteList, FavoriteWithActivity};
pub use recommendation::{
    Recommendation, RecommendationExplanation, RecommendationList, RecommendationQuery,
};
pub use triqueta_auth::{User, UserProfile};

use serde::{Deserialize, Deserializer, Serialize};

/// Decimal columns arrive either as JSON numbers or as strings ("12.50").
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Body of `PUT /users/me/profile`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre_completo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biografia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etiquetas_interes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localidad_preferida: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibilidad_horaria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nivel_actividad: Option<String>,
}
