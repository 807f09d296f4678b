use super::lenient_f64;
use serde::{Deserialize, Serialize};
use triqueta_auth::ApiRequest;
use uuid::Uuid;

/// Full activity as returned by `GET /actividades/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion: String,
    pub tipo: String,
    pub fecha_inicio: String,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    pub ubicacion_direccion: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub ubicacion_lat: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub ubicacion_lng: f64,
    pub localidad: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub precio: f64,
    pub es_gratis: bool,
    #[serde(default)]
    pub nivel_actividad: Option<String>,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default)]
    pub contacto: Option<String>,
    #[serde(default)]
    pub enlace_externo: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    pub fuente: String,
    pub estado: String,
    #[serde(default)]
    pub popularidad_favoritos: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularidad_vistas: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularidad_normalizada: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Activity as it appears in listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub id: Uuid,
    pub titulo: String,
    pub descripcion_corta: String,
    #[serde(default)]
    pub imagen_url: Option<String>,
    pub fecha_inicio: String,
    pub localidad: String,
    pub tipo: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub precio: f64,
    pub es_gratis: bool,
    #[serde(default)]
    pub etiquetas: Vec<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub popularidad_normalizada: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

/// Body of `GET /actividades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityList {
    pub data: Vec<ActivitySummary>,
    pub pagination: Pagination,
}

/// Search, filter, paging and sort parameters for `GET /actividades`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActivityFilters {
    pub q: Option<String>,
    pub tipo: Option<String>,
    pub localidad: Option<String>,
    pub es_gratis: Option<bool>,
    pub nivel_actividad: Option<String>,
    pub fecha_desde: Option<String>,
    pub fecha_hasta: Option<String>,
    pub precio_min: Option<f64>,
    pub precio_max: Option<f64>,
    pub etiquetas: Vec<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ActivityFilters {
    /// Append the set filters as query parameters; tags repeat the key.
    pub(crate) fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        request = request
            .query_opt("q", self.q.as_deref())
            .query_opt("tipo", self.tipo.as_deref())
            .query_opt("localidad", self.localidad.as_deref())
            .query_opt("es_gratis", self.es_gratis)
            .query_opt("nivel_actividad", self.nivel_actividad.as_deref())
            .query_opt("fecha_desde", self.fecha_desde.as_deref())
            .query_opt("fecha_hasta", self.fecha_hasta.as_deref())
            .query_opt("precio_min", self.precio_min)
            .query_opt("precio_max", self.precio_max);
        for tag in &self.etiquetas {
            request = request.query("etiquetas", tag);
        }
        request
            .query_opt("page", self.page)
            .query_opt("page_size", self.page_size)
            .query_opt("sort_by", self.sort_by.as_deref())
            .query_opt("sort_order", self.sort_order.as_deref())
    }
}

/// Body of `POST /actividades`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityCreate {
    pub titulo: String,
    pub descripcion: String,
    pub tipo: String,
    pub fecha_inicio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    pub ubicacion_direccion: String,
    pub ubicacion_lat: f64,
    pub ubicacion_lng: f64,
    pub localidad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_gratis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel_actividad: Option<String>,
    pub etiquetas: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enlace_externo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
}

/// Body of `PUT /actividades/{id}`. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion_direccion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ubicacion_lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localidad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub es_gratis: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nivel_actividad: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etiquetas: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contacto: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enlace_externo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imagen_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filters_become_query_parameters() {
        let filters = ActivityFilters {
            q: Some("teatro".into()),
            es_gratis: Some(true),
            etiquetas: vec!["arte".into(), "musica".into()],
            page: Some(2),
            sort_order: Some("desc".into()),
            ..Default::default()
        };

        let request = filters.apply(ApiRequest::get("actividades"));
        let query: Vec<(&str, &str)> = request
            .query
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert_eq!(
            query,
            vec![
                ("q", "teatro"),
                ("es_gratis", "true"),
                ("etiquetas", "arte"),
                ("etiquetas", "musica"),
                ("page", "2"),
                ("sort_order", "desc"),
            ]
        );
    }

    #[test]
    fn test_empty_filters_add_nothing() {
        let request = ActivityFilters::default().apply(ApiRequest::get("actividades"));
        assert!(request.query.is_empty());
    }

    #[test]
    fn test_listing_decodes_decimal_strings() {
        let list: ActivityList = serde_json::from_value(json!({
            "data": [{
                "id": "6f1c2a8e-7d4b-4c1e-9a3b-2f5d8e9c0a11",
                "titulo": "Concierto",
                "descripcion_corta": "Orquesta filarmónica",
                "imagen_url": null,
                "fecha_inicio": "2025-03-01T19:00:00",
                "localidad": "Chapinero",
                "tipo": "cultura",
                "precio": "0.00",
                "es_gratis": true,
                "etiquetas": ["musica"],
                "popularidad_normalizada": "0.75"
            }],
            "pagination": {"total": 1, "page": 1, "page_size": 20, "total_pages": 1}
        }))
        .unwrap();

        assert_eq!(list.data.len(), 1);
        assert_eq!(list.data[0].precio, 0.0);
        assert_eq!(list.data[0].popularidad_normalizada, 0.75);
        assert_eq!(list.pagination.total_pages, 1);
    }
}
