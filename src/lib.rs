//! Character API: CRUD REST backend for tabletop character sheets.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use error::{AppError, ConfigError};
pub use model::{CharacterRecord, CharacterRow};
pub use routes::{character_routes, common_routes};
pub use service::CharacterService;
pub use state::AppState;
pub use store::{connect, CharacterStore, PgCharacterStore, SqliteCharacterStore};

use axum::Router;

/// Full application router: common routes plus character routes.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(character_routes(state, body_limit))
}
