//! Mapping entity representing a short code bound to a destination URL.

use chrono::{DateTime, Utc};

/// A persisted short code → URL mapping.
///
/// Mappings are immutable once stored. `expires_at` is informational only;
/// nothing in the resolution path enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub id: i64,
    pub short_code: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Mapping {
    /// Creates a new Mapping instance.
    pub fn new(
        id: i64,
        short_code: String,
        original_url: String,
        expires_at: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            short_code,
            original_url,
            expires_at,
            created_at,
            updated_at,
        }
    }

    /// Returns true if an expiry is recorded and has passed.
    ///
    /// Reported to callers; resolution still serves expired mappings.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }
}

/// Input data for persisting a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_code: String,
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
}
