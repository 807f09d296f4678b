use serde::{Deserialize, Serialize};
use serde_json::Value;
use triqueta_auth::ApiRequest;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    pub usuario_id: i64,
    pub actividad_id: Uuid,
    pub fecha_guardado: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteWithActivity {
    pub id: Uuid,
    pub usuario_id: i64,
    pub actividad_id: Uuid,
    pub fecha_guardado: String,
    /// Full activity document, when the server embeds it.
    #[serde(default)]
    pub actividad: Option<Value>,
}

impl FavoriteWithActivity {
    /// Title of the embedded activity, if any.
    pub fn titulo(&self) -> Option<&str> {
        self.actividad
            .as_ref()
            .and_then(|actividad| actividad.get("titulo"))
            .and_then(Value::as_str)
    }
}

/// Body of `GET /favoritos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteList {
    pub items: Vec<FavoriteWithActivity>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Body of `GET /favoritos/check/{actividad_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCheck {
    pub is_favorite: bool,
    /// Holds a placeholder rather than a UUID while an add is pending.
    #[serde(default)]
    pub favorito_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localidad: Option<String>,
}

impl FavoriteFilters {
    pub(crate) fn apply(&self, request: ApiRequest) -> ApiRequest {
        request
            .query_opt("page", self.page)
            .query_opt("page_size", self.page_size)
            .query_opt("tipo", self.tipo.as_deref())
            .query_opt("localidad", self.localidad.as_deref())
    }
}
