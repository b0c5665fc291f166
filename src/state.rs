//! Shared application state for all routes.

use crate::service::CharacterService;
use crate::store::CharacterStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub characters: CharacterService,
}

impl AppState {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        AppState {
            characters: CharacterService::new(store),
        }
    }
}
