//! SQLite backend. In-memory databases are pinned to one connection that never expires,
//! otherwise each pooled connection would see its own empty database.

use super::{quoted, CharacterStore, WRITABLE_COLUMNS};
use crate::error::AppError;
use crate::model::{CharacterRow, CHARACTER_COLUMNS, CHARACTER_TABLE};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

#[derive(Clone)]
pub struct SqliteCharacterStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteCharacterStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteCharacterStore {
            pool,
            table: quoted(CHARACTER_TABLE),
        }
    }

    /// Open (creating if missing) the database at `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool_opts = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = pool_opts.connect_with(opts).await?;
        Ok(Self::new(pool))
    }

    /// Fresh in-memory store with the table already created.
    pub async fn in_memory() -> Result<Self, AppError> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.ensure_schema().await?;
        Ok(store)
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl CharacterStore for SqliteCharacterStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL DEFAULT '',
                health INTEGER NOT NULL DEFAULT 0,
                level INTEGER NOT NULL DEFAULT 0,
                strength INTEGER NOT NULL DEFAULT 0,
                charisma INTEGER NOT NULL DEFAULT 0,
                intelligence INTEGER NOT NULL DEFAULT 0,
                wisdom INTEGER NOT NULL DEFAULT 0,
                constitution INTEGER NOT NULL DEFAULT 0,
                dexterity INTEGER NOT NULL DEFAULT 0
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<CharacterRow>, AppError> {
        let sql = format!("SELECT {} FROM {}", CHARACTER_COLUMNS, self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, CharacterRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<CharacterRow>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE id = ?", CHARACTER_COLUMNS, self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, row: &CharacterRow) -> Result<CharacterRow, AppError> {
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            WRITABLE_COLUMNS.join(", "),
            vec!["?"; WRITABLE_COLUMNS.len()].join(", "),
            CHARACTER_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        let created = sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(&row.name)
            .bind(row.health)
            .bind(row.level)
            .bind(row.strength)
            .bind(row.charisma)
            .bind(row.intelligence)
            .bind(row.wisdom)
            .bind(row.constitution)
            .bind(row.dexterity)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn update(&self, row: &CharacterRow) -> Result<Option<CharacterRow>, AppError> {
        let sets: Vec<String> = WRITABLE_COLUMNS.iter().map(|col| format!("{} = ?", col)).collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ? RETURNING {}",
            self.table,
            sets.join(", "),
            CHARACTER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = row.id, "query");
        let updated = sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(&row.name)
            .bind(row.health)
            .bind(row.level)
            .bind(row.strength)
            .bind(row.charisma)
            .bind(row.intelligence)
            .bind(row.wisdom)
            .bind(row.constitution)
            .bind(row.dexterity)
            .bind(row.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
