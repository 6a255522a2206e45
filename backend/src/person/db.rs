//! SQLite person store
//!
//! Persists persons in a single `persons` table. Non-id fields are kept as a
//! JSON object document so the schema never has to know about them.

use crate::person::models::{Person, PersonId};
use crate::person::store::{PersonStore, StoreError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{FromRow, SqlitePool};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{debug, info};

/// Raw row as stored in the `persons` table
#[derive(Debug, FromRow)]
struct PersonRow {
    id: i64,
    fields: String,
}

impl TryFrom<PersonRow> for Person {
    type Error = StoreError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        match serde_json::from_str::<Value>(&row.fields)? {
            Value::Object(fields) => Ok(Person::new(fields).with_id(row.id)),
            other => Err(StoreError::Corrupt(format!(
                "person {} has non-object fields: {}",
                row.id, other
            ))),
        }
    }
}

/// Person store backed by a SQLite connection pool
pub struct SqlitePersonStore {
    pool: SqlitePool,
}

impl SqlitePersonStore {
    /// Open (or create) the database and run migrations
    ///
    /// # Arguments
    /// * `db_path` - Path to the SQLite database file, with or without a `sqlite:` prefix
    ///
    /// # Returns
    /// * `Ok(SqlitePersonStore)` if successful
    /// * `Err(StoreError)` if the directory, connection or migration failed
    pub async fn new(db_path: &str) -> Result<Self, StoreError> {
        let file_path = db_path.strip_prefix("sqlite:").unwrap_or(db_path);
        if let Some(parent) = PathBuf::from(file_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        // SQLite connection string format: sqlite:path/to/db.db
        let connection_string = if db_path.starts_with("sqlite:") {
            db_path.to_string()
        } else {
            format!("sqlite:{}", db_path)
        };

        let options = SqliteConnectOptions::from_str(&connection_string)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        info!("Connected to SQLite database at: {}", db_path);

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_persons.sql");

        for statement in migration_statements(migration_sql) {
            sqlx::query(&statement).execute(&self.pool).await?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    #[cfg(test)]
    fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Split a migration script into executable statements, dropping `--` comments
fn migration_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let without_comments = match line.find("--") {
            Some(comment_pos) => &line[..comment_pos],
            None => line,
        };
        let trimmed = without_comments.trim();
        if trimmed.is_empty() {
            continue;
        }
        cleaned_sql.push_str(trimmed);
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn encode_fields(fields: &Map<String, Value>) -> Result<String, StoreError> {
    Ok(serde_json::to_string(fields)?)
}

#[async_trait]
impl PersonStore for SqlitePersonStore {
    async fn find_all(&self) -> Result<Vec<Person>, StoreError> {
        let rows = sqlx::query_as::<_, PersonRow>("SELECT id, fields FROM persons ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Person::try_from).collect()
    }

    async fn find_by_id(&self, id: PersonId) -> Result<Option<Person>, StoreError> {
        let row = sqlx::query_as::<_, PersonRow>("SELECT id, fields FROM persons WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Person::try_from).transpose()
    }

    async fn save(&self, person: Person) -> Result<Person, StoreError> {
        let fields = encode_fields(&person.fields)?;

        let id = match person.id {
            Some(id) => {
                sqlx::query("INSERT OR REPLACE INTO persons (id, fields) VALUES (?, ?)")
                    .bind(id)
                    .bind(&fields)
                    .execute(&self.pool)
                    .await?;
                id
            }
            None => sqlx::query("INSERT INTO persons (fields) VALUES (?)")
                .bind(&fields)
                .execute(&self.pool)
                .await?
                .last_insert_rowid(),
        };

        debug!(person_id = id, "Saved person");
        Ok(person.with_id(id))
    }

    async fn delete_by_id(&self, id: PersonId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM persons WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            debug!(person_id = id, "Deleted person");
        }
        Ok(())
    }
}
