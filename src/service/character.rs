//! Data access for character records. Maps store rows to API records and back.

use crate::error::AppError;
use crate::model::{CharacterRecord, CharacterRow};
use crate::store::CharacterStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct CharacterService {
    store: Arc<dyn CharacterStore>,
}

impl CharacterService {
    pub fn new(store: Arc<dyn CharacterStore>) -> Self {
        CharacterService { store }
    }

    pub fn store(&self) -> &Arc<dyn CharacterStore> {
        &self.store
    }

    /// Every character, in store order. Empty when there are none.
    pub async fn list(&self) -> Result<Vec<CharacterRecord>, AppError> {
        let rows = self.store.list().await?;
        tracing::debug!(count = rows.len(), "listed characters");
        Ok(rows.into_iter().map(CharacterRow::into_record).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<CharacterRecord>, AppError> {
        let row = self.store.find(id).await?;
        tracing::debug!(id, found = row.is_some(), "get character");
        Ok(row.map(CharacterRow::into_record))
    }

    /// Persist a new character. The id in `record` is ignored.
    pub async fn create(&self, record: &CharacterRecord) -> Result<CharacterRecord, AppError> {
        let row = self.store.insert(&CharacterRow::from_record(0, record)).await?;
        tracing::debug!(id = row.id, "created character");
        Ok(row.into_record())
    }

    /// Overwrite every field of character `id`. `None` when it does not exist; never inserts.
    pub async fn update(&self, id: i32, record: &CharacterRecord) -> Result<Option<CharacterRecord>, AppError> {
        let row = self.store.update(&CharacterRow::from_record(id, record)).await?;
        tracing::debug!(id, found = row.is_some(), "updated character");
        Ok(row.map(CharacterRow::into_record))
    }

    /// True when the character existed and was removed.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let deleted = self.store.delete(id).await?;
        tracing::debug!(id, deleted, "deleted character");
        Ok(deleted)
    }
}
