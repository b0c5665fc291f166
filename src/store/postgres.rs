//! PostgreSQL backend. The table lives in a configurable schema (default `public`).

use super::{quoted, CharacterStore, WRITABLE_COLUMNS};
use crate::error::{AppError, ConfigError};
use crate::model::{CharacterRow, CHARACTER_COLUMNS, CHARACTER_TABLE};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PgCharacterStore {
    pool: PgPool,
    schema: String,
    table: String,
}

impl PgCharacterStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgCharacterStore {
            pool,
            schema: schema.to_string(),
            table: format!("{}.{}", quoted(schema), quoted(CHARACTER_TABLE)),
        }
    }
}

#[async_trait]
impl CharacterStore for PgCharacterStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", quoted(&self.schema)))
            .execute(&self.pool)
            .await?;
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id SERIAL PRIMARY KEY,
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
        let sql = format!("SELECT {} FROM {} WHERE id = $1", CHARACTER_COLUMNS, self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, row: &CharacterRow) -> Result<CharacterRow, AppError> {
        let placeholders: Vec<String> = (1..=WRITABLE_COLUMNS.len()).map(|n| format!("${}", n)).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            WRITABLE_COLUMNS.join(", "),
            placeholders.join(", "),
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
        let sets: Vec<String> = WRITABLE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ${}", col, i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1 RETURNING {}",
            self.table,
            sets.join(", "),
            CHARACTER_COLUMNS
        );
        tracing::debug!(sql = %sql, id = row.id, "query");
        let updated = sqlx::query_as::<_, CharacterRow>(&sql)
            .bind(row.id)
            .bind(&row.name)
            .bind(row.health)
            .bind(row.level)
            .bind(row.strength)
            .bind(row.charisma)
            .bind(row.intelligence)
            .bind(row.wisdom)
            .bind(row.constitution)
            .bind(row.dexterity)
            .fetch_optional(&self.pool)
            .await?;
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Create the database named in `database_url` if it does not exist (connects to `postgres` first).
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let opts = PgConnectOptions::from_str(database_url)
        .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()))?;
    let Some((admin, db_name)) = admin_target(&opts) else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quoted(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Admin connection options and the database to create. `None` when the url names no
/// database or names `postgres` itself.
fn admin_target(opts: &PgConnectOptions) -> Option<(PgConnectOptions, String)> {
    let db_name = opts.get_database()?.trim().to_string();
    if db_name.is_empty() || db_name == "postgres" {
        return None;
    }
    Some((opts.clone().database("postgres"), db_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(url: &str) -> Option<(PgConnectOptions, String)> {
        admin_target(&PgConnectOptions::from_str(url).unwrap())
    }

    #[test]
    fn admin_connection_keeps_host_and_swaps_database() {
        let (admin, name) = target("postgres://u:p@db.internal:6543/rpg?sslmode=disable").unwrap();
        assert_eq!(name, "rpg");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db.internal");
        assert_eq!(admin.get_port(), 6543);
        assert_eq!(admin.get_username(), "u");
    }

    #[test]
    fn url_without_database_path_skips_creation() {
        assert!(target("postgres://user:pw@localhost:5432").is_none());
        assert!(target("postgres://localhost/").is_none());
    }

    #[test]
    fn postgres_database_itself_skips_creation() {
        assert!(target("postgresql://localhost/postgres").is_none());
    }

    #[tokio::test]
    async fn malformed_url_is_a_config_error() {
        let err = ensure_database_exists("postgres://localhost:notaport/rpg").await.unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidDatabaseUrl(_))));
    }
}
