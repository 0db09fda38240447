use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use workout_storage::dto::category::{CategoryResponse, CreateCategoryRequest};

use crate::error::WebError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/categorias",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created successfully", body = CategoryResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "categorias"
)]
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateCategoryRequest>,
) -> Result<Response, WebError> {
    let category = services::create_category(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(category)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/categorias",
    responses(
        (status = 200, description = "List all categories successfully", body = Vec<CategoryResponse>)
    ),
    tag = "categorias"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, WebError> {
    let categories = services::list_categories(state.store.as_ref()).await?;

    Ok(Json(categories))
}

#[utoipa::path(
    get,
    path = "/api/categorias/{id}",
    params(
        ("id" = Uuid, Path, description = "Category id")
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 404, description = "Category not found")
    ),
    tag = "categorias"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let category = services::get_category(state.store.as_ref(), id).await?;

    Ok(Json(category).into_response())
}
