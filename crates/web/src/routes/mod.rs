use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ApiDoc;
use crate::features::{athletes, categories, training_centers};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .nest("/categorias", categories::routes::routes())
        .nest("/centros_treinamento", training_centers::routes::routes())
        .nest("/atletas", athletes::routes::routes());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use tower::ServiceExt;
    use workout_storage::MemoryStore;

    use super::*;

    fn app() -> Router {
        router(AppState::new(Arc::new(MemoryStore::new())))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn athlete_payload(nome: &str, cpf: &str) -> Value {
        json!({
            "nome": nome,
            "cpf": cpf,
            "idade": 34,
            "peso": 80.5,
            "altura": 1.8,
            "sexo": "M",
            "categoria": { "nome": "CrossFit" },
            "centro_treinamento": { "nome": "CT King" }
        })
    }

    async fn seed(app: &Router) {
        let response = send(
            app,
            Method::POST,
            "/api/categorias",
            Some(json!({ "nome": "CrossFit" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            app,
            Method::POST,
            "/api/centros_treinamento",
            Some(json!({
                "nome": "CT King",
                "endereco": "Rua das Botas",
                "proprietario": "José"
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn health_check() {
        let response = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn category_round_trip() {
        let app = app();

        let response = send(
            &app,
            Method::POST,
            "/api/categorias",
            Some(json!({ "nome": "CrossFit" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert_eq!(created["nome"], "CrossFit");

        let id = created["id"].as_str().unwrap();
        let response = send(&app, Method::GET, &format!("/api/categorias/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, created);

        let response = send(&app, Method::GET, "/api/categorias", None).await;
        assert_eq!(body_json(response).await, json!([created]));
    }

    #[tokio::test]
    async fn unknown_category_id_is_404() {
        let uri = format!("/api/categorias/{}", uuid::Uuid::new_v4());
        let response = send(&app(), Method::GET, &uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Categoria não encontrada");
    }

    #[tokio::test]
    async fn closed_schema_rejects_unknown_fields() {
        let response = send(
            &app(),
            Method::POST,
            "/api/categorias",
            Some(json!({ "nome": "CrossFit", "nivel": 3 })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn constraint_failures_are_reported_per_field() {
        let response = send(
            &app(),
            Method::POST,
            "/api/centros_treinamento",
            Some(json!({
                "nome": "Um nome grande demais para caber",
                "endereco": "Rua das Botas",
                "proprietario": "José"
            })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"][0].as_str().unwrap().starts_with("nome"));
    }

    #[tokio::test]
    async fn nested_reference_failures_are_reported_with_their_path() {
        let app = app();
        seed(&app).await;
        let mut payload = athlete_payload("João", "01234567890");
        payload["categoria"]["nome"] = json!("Muito longa demais");

        let response = send(&app, Method::POST, "/api/atletas", Some(payload)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert!(
            body["details"][0]
                .as_str()
                .unwrap()
                .starts_with("categoria.nome")
        );
    }

    #[tokio::test]
    async fn athlete_lifecycle() {
        let app = app();
        seed(&app).await;

        let response = send(
            &app,
            Method::POST,
            "/api/atletas",
            Some(athlete_payload("João", "01234567890")),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = body_json(response).await;
        assert!(created["id"].is_string());
        assert!(created["created_at"].is_string());
        assert_eq!(created["categoria"]["nome"], "CrossFit");
        assert!(created.get("resumo").is_none());

        let id = created["id"].as_str().unwrap().to_string();

        let response = send(
            &app,
            Method::GET,
            "/api/atletas/busca-por-cpf/01234567890",
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["id"], id.as_str());

        let response = send(&app, Method::GET, "/api/atletas/busca-por-nome/Jo%C3%A3o", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/atletas/{id}"),
            Some(json!({ "nome": "Maria" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["nome"], "Maria");
        assert_eq!(updated["idade"], 34);
        assert_eq!(updated["cpf"], "01234567890");
        assert_eq!(updated["centro_treinamento"]["nome"], "CT King");

        let response = send(&app, Method::DELETE, &format!("/api/atletas/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, &format!("/api/atletas/{id}"), None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Atleta não encontrado");
    }

    #[tokio::test]
    async fn unknown_reference_is_400() {
        let app = app();
        seed(&app).await;
        let mut payload = athlete_payload("João", "01234567890");
        payload["categoria"]["nome"] = json!("Scale");

        let response = send(&app, Method::POST, "/api/atletas", Some(payload)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = send(&app, Method::GET, "/api/atletas", None).await;
        assert_eq!(body_json(response).await["total"], 0);
    }

    #[tokio::test]
    async fn duplicate_cpf_is_303() {
        let app = app();
        seed(&app).await;

        let first = send(
            &app,
            Method::POST,
            "/api/atletas",
            Some(athlete_payload("João", "01234567890")),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = send(
            &app,
            Method::POST,
            "/api/atletas",
            Some(athlete_payload("Maria", "01234567890")),
        )
        .await;
        assert_eq!(second.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            body_json(second).await["error"],
            "Já existe atleta cadastrado com CPF 01234567890"
        );
    }

    #[tokio::test]
    async fn patch_outside_the_update_schema_is_rejected() {
        let app = app();
        seed(&app).await;
        let created = body_json(
            send(
                &app,
                Method::POST,
                "/api/atletas",
                Some(athlete_payload("João", "01234567890")),
            )
            .await,
        )
        .await;
        let id = created["id"].as_str().unwrap();

        let response = send(
            &app,
            Method::PATCH,
            &format!("/api/atletas/{id}"),
            Some(json!({ "cpf": "99999999999" })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_unknown_athlete_is_404() {
        let uri = format!("/api/atletas/{}", uuid::Uuid::new_v4());
        let response = send(&app(), Method::DELETE, &uri, None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn listing_is_paginated_with_summaries() {
        let app = app();
        seed(&app).await;
        for (nome, cpf) in [("Ana", "1"), ("Bia", "2"), ("Caio", "3")] {
            let response = send(
                &app,
                Method::POST,
                "/api/atletas",
                Some(athlete_payload(nome, cpf)),
            )
            .await;
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = send(&app, Method::GET, "/api/atletas?limit=1&offset=0", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let page = body_json(response).await;

        assert_eq!(page["total"], 3);
        assert_eq!(page["limit"], 1);
        assert_eq!(page["offset"], 0);
        let items = page["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0]["resumo"],
            "Ana pratica CrossFit no centro de treinamento CT King."
        );
    }

    #[tokio::test]
    async fn out_of_range_limit_is_400() {
        let response = send(&app(), Method::GET, "/api/atletas?limit=0", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn malformed_query_gets_a_json_error() {
        let response = send(&app(), Method::GET, "/api/atletas?limit=abc", None).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Failed to deserialize query string")
        );
    }
}
