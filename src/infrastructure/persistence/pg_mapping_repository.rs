//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{MappingRepository, StoreError};

/// Name of the partial unique index guarding live short codes.
pub const SHORT_CODE_UNIQUE_INDEX: &str = "url_mappings_short_code_key";

/// PostgreSQL repository for mapping storage and retrieval.
///
/// Uniqueness of live codes is enforced by [`SHORT_CODE_UNIQUE_INDEX`]; this
/// type only translates its violations into [`StoreError::UniqueViolation`].
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MappingRow {
    id: i64,
    short_code: String,
    original_url: String,
    expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<MappingRow> for Mapping {
    fn from(r: MappingRow) -> Self {
        Mapping::new(
            r.id,
            r.short_code,
            r.original_url,
            r.expires_at,
            r.created_at,
            r.updated_at,
        )
    }
}

/// Returns true if `e` is a unique violation on the short code index.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_UNIQUE_INDEX))
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            INSERT INTO url_mappings (short_code, original_url, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, short_code, original_url, expires_at, created_at, updated_at
            "#,
        )
        .bind(&new_mapping.short_code)
        .bind(&new_mapping.original_url)
        .bind(new_mapping.expires_at)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_code(&e) {
                StoreError::UniqueViolation(new_mapping.short_code.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(row.into())
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Mapping>, StoreError> {
        let row = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, short_code, original_url, expires_at, created_at, updated_at
            FROM url_mappings
            WHERE short_code = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Mapping::from))
    }

    async fn find_all(&self) -> Result<Vec<Mapping>, StoreError> {
        let rows = sqlx::query_as::<_, MappingRow>(
            r#"
            SELECT id, short_code, original_url, expires_at, created_at, updated_at
            FROM url_mappings
            WHERE deleted_at IS NULL
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Mapping::from).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
