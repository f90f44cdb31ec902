//! Repository trait for the durable code → URL store.

use crate::domain::entities::{Mapping, NewMapping};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by a durable store.
///
/// A uniqueness violation on the short code is reported separately so the
/// caller can tell a lost race from an I/O failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("short code `{0}` already exists")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Authoritative storage for short code mappings.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Persists a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::UniqueViolation`] if a live mapping already uses
    /// the short code, [`StoreError::Database`] on any other failure.
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError>;

    /// Finds a live mapping by short code.
    ///
    /// Not-found is `Ok(None)`, never an error.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Mapping>, StoreError>;

    /// Returns every live mapping, newest first.
    async fn find_all(&self) -> Result<Vec<Mapping>, StoreError>;

    /// Round-trips to the store; used by health checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
