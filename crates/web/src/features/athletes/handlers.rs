use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use uuid::Uuid;
use workout_storage::dto::{
    athlete::{AthleteListItem, AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
    common::{LimitOffsetPage, LimitOffsetParams},
};

use crate::error::WebError;
use crate::extract::{Pagination, ValidatedJson};
use crate::state::AppState;

use super::services;

#[utoipa::path(
    post,
    path = "/api/atletas",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 303, description = "An athlete with this CPF already exists"),
        (status = 400, description = "Validation error or unknown category/training center"),
        (status = 500, description = "Athlete could not be stored")
    ),
    tag = "atletas"
)]
pub async fn create_athlete(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    let athlete = services::create_athlete(state.store.as_ref(), req).await?;

    Ok((StatusCode::CREATED, Json(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/atletas",
    params(LimitOffsetParams),
    responses(
        (status = 200, description = "Page of athletes with their summaries", body = LimitOffsetPage<AthleteListItem>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "atletas"
)]
pub async fn list_athletes(
    State(state): State<AppState>,
    Pagination(params): Pagination,
) -> Result<Response, WebError> {
    let page = services::list_athletes(state.store.as_ref(), &params).await?;

    Ok(Json(page).into_response())
}

#[utoipa::path(
    get,
    path = "/api/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn get_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(state.store.as_ref(), id).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    get,
    path = "/api/atletas/busca-por-nome/{nome}",
    params(
        ("nome" = String, Path, description = "Athlete name, exact match")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "No athlete with this name")
    ),
    tag = "atletas"
)]
pub async fn get_athlete_by_nome(
    State(state): State<AppState>,
    Path(nome): Path<String>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete_by_nome(state.store.as_ref(), &nome).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    get,
    path = "/api/atletas/busca-por-cpf/{cpf}",
    params(
        ("cpf" = String, Path, description = "Athlete CPF")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "No athlete with this CPF")
    ),
    tag = "atletas"
)]
pub async fn get_athlete_by_cpf(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete_by_cpf(state.store.as_ref(), &cpf).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    patch,
    path = "/api/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn update_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(update_req): ValidatedJson<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    let updated = services::update_athlete(state.store.as_ref(), id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/atletas/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atletas"
)]
pub async fn delete_athlete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(state.store.as_ref(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
