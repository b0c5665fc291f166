//! Character handlers. Thin: parse, call the service, serialize.
//! A missing id is not an error: update answers `null` and delete answers `false`, both with 200.

use crate::error::AppError;
use crate::model::CharacterRecord;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

/// GET /api/characters
#[utoipa::path(
    get,
    path = "/api/characters",
    responses((status = 200, description = "Every character", body = [CharacterRecord]))
)]
pub async fn list(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<CharacterRecord>>), AppError> {
    let records = state.characters.list().await?;
    Ok((StatusCode::OK, Json(records)))
}

/// GET /api/characters/:id
#[utoipa::path(
    get,
    path = "/api/characters/{id}",
    params(("id" = i32, Path, description = "Character id")),
    responses((status = 200, description = "The character, or null when absent", body = CharacterRecord))
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<Option<CharacterRecord>>), AppError> {
    let record = state.characters.get_by_id(id).await?;
    Ok((StatusCode::OK, Json(record)))
}

/// POST /create
#[utoipa::path(
    post,
    path = "/create",
    request_body = CharacterRecord,
    responses((status = 200, description = "Created character with its assigned id", body = CharacterRecord))
)]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CharacterRecord>,
) -> Result<(StatusCode, Json<CharacterRecord>), AppError> {
    let created = state.characters.create(&body).await?;
    Ok((StatusCode::OK, Json(created)))
}

/// PUT /update/:id
#[utoipa::path(
    put,
    path = "/update/{id}",
    params(("id" = i32, Path, description = "Character id")),
    request_body = CharacterRecord,
    responses((status = 200, description = "Updated character, or null when absent", body = CharacterRecord))
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<CharacterRecord>,
) -> Result<(StatusCode, Json<Option<CharacterRecord>>), AppError> {
    let updated = state.characters.update(id, &body).await?;
    Ok((StatusCode::OK, Json(updated)))
}

/// DELETE /delete/:id
#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(("id" = i32, Path, description = "Character id")),
    responses((status = 200, description = "true when deleted, false when absent", body = bool))
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<bool>), AppError> {
    let deleted = state.characters.delete(id).await?;
    Ok((StatusCode::OK, Json(deleted)))
}
