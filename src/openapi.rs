//! OpenAPI document for the character routes, served at GET /openapi.json.

use crate::handlers::character;
use crate::model::CharacterRecord;
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "character-api", description = "CRUD over tabletop character sheets"),
    paths(
        character::list,
        character::read,
        character::create,
        character::update,
        character::delete,
    ),
    components(schemas(CharacterRecord))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
