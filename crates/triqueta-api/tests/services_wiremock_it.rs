use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use triqueta_api::models::{ActivityFilters, FavoriteFilters, RecommendationQuery};
use triqueta_api::{ApiError, TriquetaApi};
use triqueta_auth::{AuthenticatedApiClient, NoopNavigator, ReqwestTransport};
use triqueta_storage::{CredentialStore, CredentialsPair, MemoryStorage, TokenStore};
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACTIVITY_ID: &str = "6f1c2a8e-7d4b-4c1e-9a3b-2f5d8e9c0a11";

fn api_for(server: &MockServer) -> (TriquetaApi, Arc<CredentialStore>) {
    let tokens = Arc::new(CredentialStore::new(Arc::new(MemoryStorage::new())));
    tokens.set(&CredentialsPair::new("A1", "R1")).unwrap();

    let base = Url::parse(&format!("{}/api/v1", server.uri())).unwrap();
    let transport = ReqwestTransport::new(base, Duration::from_secs(10)).unwrap();
    let client = AuthenticatedApiClient::new(
        Arc::new(transport),
        tokens.clone(),
        Arc::new(NoopNavigator),
    );
    (TriquetaApi::new(client), tokens)
}

fn activity_id() -> Uuid {
    Uuid::parse_str(ACTIVITY_ID).unwrap()
}

#[tokio::test]
async fn activities_list_sends_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/actividades"))
        .and(query_param("tipo", "cultura"))
        .and(query_param("etiquetas", "arte"))
        .and(query_param("etiquetas", "musica"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": ACTIVITY_ID,
                "titulo": "Concierto",
                "descripcion_corta": "Orquesta",
                "imagen_url": null,
                "fecha_inicio": "2025-03-01T19:00:00",
                "localidad": "Chapinero",
                "tipo": "cultura",
                "precio": "15000.00",
                "es_gratis": false,
                "etiquetas": ["arte", "musica"],
                "popularidad_normalizada": 0.4
            }],
            "pagination": {"total": 1, "page": 1, "page_size": 5, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);
    let list = api
        .activities
        .list(&ActivityFilters {
            tipo: Some("cultura".into()),
            etiquetas: vec!["arte".into(), "musica".into()],
            page_size: Some(5),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.data[0].id, activity_id());
    assert_eq!(list.data[0].precio, 15000.0);
}

#[tokio::test]
async fn not_found_carries_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/actividades/{}", ACTIVITY_ID)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Actividad no encontrada"})),
        )
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);
    let err = api.activities.get(activity_id()).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.user_message(), "Actividad no encontrada");
}

#[tokio::test]
async fn validation_errors_are_joined() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/v1/users/me/profile"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                {"loc": ["body", "telefono"], "msg": "String should have at most 20 characters"},
                {"loc": ["body", "nivel_actividad"], "msg": "Input should be 'bajo', 'medio' or 'alto'"}
            ]
        })))
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);
    let err = api
        .users
        .update_profile(&Default::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 422, .. }));
    assert_eq!(
        err.user_message(),
        "String should have at most 20 characters, Input should be 'bajo', 'medio' or 'alto'"
    );
}

#[tokio::test]
async fn favorites_endpoints() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/favoritos"))
        .and(header("authorization", "Bearer A1"))
        .and(body_json(json!({"actividad_id": ACTIVITY_ID})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "0b7e3f42-1c2d-4e5f-8a9b-0c1d2e3f4a5b",
            "usuario_id": 7,
            "actividad_id": ACTIVITY_ID,
            "fecha_guardado": "2025-03-01T10:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/favoritos/count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 4})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/favoritos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [],
            "total": 4,
            "page": 2,
            "page_size": 20,
            "total_pages": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);

    let favorite = api.favorites.add(activity_id()).await.unwrap();
    assert_eq!(favorite.actividad_id, activity_id());

    assert_eq!(api.favorites.count().await.unwrap(), 4);
    // Served from the cache the second time.
    assert_eq!(api.favorites.count().await.unwrap(), 4);

    let list = api
        .favorites
        .list(&FavoriteFilters {
            page: Some(2),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(list.total, 4);
}

#[tokio::test]
async fn recommendations_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/recomendaciones"))
        .and(query_param("limit", "3"))
        .and(query_param("exclude_favorited", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "actividad": {"id": ACTIVITY_ID, "titulo": "Ciclovía"},
                "score": 87.5,
                "explanation": {"reason": "tags", "details": "3 etiquetas en común"},
                "is_favorite": false
            }],
            "total": 1,
            "user_profile_complete": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);
    let list = api
        .recommendations
        .list(&RecommendationQuery {
            limit: Some(3),
            exclude_favorited: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.items[0].titulo(), Some("Ciclovía"));
    assert!(list.user_profile_complete);
}

#[tokio::test]
async fn admin_moderation_and_etl() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/admin/actividades/aprobar"))
        .and(body_json(json!({"activity_id": 12})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Activity 12 approved successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/admin/etl/run"))
        .and(body_json(json!({"source": "idrd", "config": null})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "execution_id": 9,
            "status": "pending",
            "message": "ETL execution 9 created. Job will run asynchronously."
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/admin/etl/executions"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let (api, _) = api_for(&server);

    let approval = api.admin.approve_activity(12).await.unwrap();
    assert!(approval.success);

    let run = api.admin.trigger_etl("idrd", None).await.unwrap();
    assert_eq!(run.execution_id, 9);

    let runs = api
        .admin
        .etl_executions(triqueta_api::DEFAULT_EXECUTIONS_LIMIT, 0)
        .await
        .unwrap();
    assert!(runs.is_empty());
}

#[tokio::test]
async fn delete_account_forgets_credentials() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v1/users/me"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (api, tokens) = api_for(&server);
    api.users.delete_account().await.unwrap();

    assert!(!tokens.is_authenticated().unwrap());
}
