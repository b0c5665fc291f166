//! Character store: one relational table, reachable through PostgreSQL or SQLite.
//! Every operation is a single statement; the store's own row atomicity is the only guarantee.

mod postgres;
mod sqlite;

pub use postgres::{ensure_database_exists, PgCharacterStore};
pub use sqlite::SqliteCharacterStore;

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use crate::model::CharacterRow;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Create the character table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Round-trip to the database; used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// All rows, in whatever order the database returns them.
    async fn list(&self) -> Result<Vec<CharacterRow>, AppError>;

    async fn find(&self, id: i32) -> Result<Option<CharacterRow>, AppError>;

    /// Insert a new row. `row.id` is ignored; the returned row carries the generated id.
    async fn insert(&self, row: &CharacterRow) -> Result<CharacterRow, AppError>;

    /// Overwrite every column of the row with `row.id`. `None` when no such row exists.
    async fn update(&self, row: &CharacterRow) -> Result<Option<CharacterRow>, AppError>;

    /// Returns true when a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;
}

/// Columns written on insert/update, in bind order.
pub(crate) const WRITABLE_COLUMNS: [&str; 9] = [
    "name",
    "health",
    "level",
    "strength",
    "charisma",
    "intelligence",
    "wisdom",
    "constitution",
    "dexterity",
];

/// Quote identifier (safe: only from config and constants).
pub(crate) fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Open the store named by `DATABASE_URL` and make sure the table exists.
pub async fn connect(config: &AppConfig) -> Result<Arc<dyn CharacterStore>, AppError> {
    let url = config.database_url.as_str();
    let store: Arc<dyn CharacterStore> = if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        ensure_database_exists(url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await?;
        Arc::new(PgCharacterStore::new(pool, &config.db_schema))
    } else if url.starts_with("sqlite:") {
        Arc::new(SqliteCharacterStore::connect(url, config.max_connections).await?)
    } else {
        let scheme = url.split(':').next().unwrap_or(url).to_string();
        return Err(ConfigError::UnsupportedDatabase(scheme).into());
    };
    store.ensure_schema().await?;
    tracing::info!(backend = backend_name(url), "character store ready");
    Ok(store)
}

fn backend_name(url: &str) -> &'static str {
    if url.starts_with("sqlite:") {
        "sqlite"
    } else {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_escapes_double_quotes() {
        assert_eq!(quoted("character"), "\"character\"");
        assert_eq!(quoted("we\"ird"), "\"we\"\"ird\"");
    }

    #[tokio::test]
    async fn unknown_scheme_is_rejected() {
        let config = AppConfig {
            database_url: "mysql://localhost/rpg".into(),
            ..AppConfig::default()
        };
        let err = connect(&config).await.err().unwrap();
        assert!(matches!(err, AppError::Config(ConfigError::UnsupportedDatabase(ref s)) if s == "mysql"));
    }

    #[tokio::test]
    async fn sqlite_memory_url_connects_and_creates_table() {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            ..AppConfig::default()
        };
        let store = connect(&config).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
