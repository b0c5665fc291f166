//! Character routes. Four independent groups plus a read-by-id under the list path.

use crate::handlers::character::{create, delete as delete_handler, list, read, update};
use crate::openapi::openapi_json;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub fn character_routes(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .route("/api/characters", get(list))
        .route("/api/characters/:id", get(read))
        .route("/create", post(create))
        .route("/update/:id", put(update))
        .route("/delete/:id", delete(delete_handler))
        .route("/openapi.json", get(openapi_json))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
