use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use workout_storage::dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse};

use crate::error::WebError;
use crate::extract::ValidatedJson;
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/centros_treinamento",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "centros_treinamento"
)]
pub async fn create_training_center(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    let center = services::create_training_center(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(center)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/centros_treinamento",
    responses(
        (status = 200, description = "List all training centers successfully", body = Vec<TrainingCenterResponse>)
    ),
    tag = "centros_treinamento"
)]
pub async fn list_training_centers(
    State(state): State<AppState>,
) -> Result<Json<Vec<TrainingCenterResponse>>, WebError> {
    let centers = services::list_training_centers(state.store.as_ref()).await?;

    Ok(Json(centers))
}

#[utoipa::path(
    get,
    path = "/api/centros_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "centros_treinamento"
)]
pub async fn get_training_center(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let center = services::get_training_center(state.store.as_ref(), id).await?;

    Ok(Json(center).into_response())
}
