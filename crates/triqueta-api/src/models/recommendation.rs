use serde::{Deserialize, Serialize};
use serde_json::Value;
use triqueta_auth::ApiRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationExplanation {
    pub reason: String,
    pub details: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub actividad: Value,
    /// 0 to 100.
    pub score: f64,
    pub explanation: RecommendationExplanation,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Recommendation {
    pub fn titulo(&self) -> Option<&str> {
        self.actividad.get("titulo").and_then(Value::as_str)
    }
}

/// Body of `GET /recomendaciones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationList {
    pub items: Vec<Recommendation>,
    pub total: u64,
    #[serde(default)]
    pub user_profile_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationQuery {
    pub limit: Option<u32>,
    pub tipo: Option<String>,
    pub localidad: Option<String>,
    pub exclude_favorited: Option<bool>,
}

impl RecommendationQuery {
    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("limit", self.limit)
            .query_opt("tipo", self.tipo.as_deref())
            .query_opt("localidad", self.localidad.as_deref())
            .query_opt("exclude_favorited", self.exclude_favorited)
    }
}
