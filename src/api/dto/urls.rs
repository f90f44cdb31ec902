//! DTOs for the mapping listing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Mapping;

/// One stored mapping as exposed by `GET /api/urls`.
#[derive(Debug, Serialize)]
pub struct MappingResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MappingResponse {
    pub fn from_mapping(mapping: Mapping, short_url: String) -> Self {
        Self {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            short_url,
            expires_at: mapping.expires_at,
            created_at: mapping.created_at,
        }
    }
}
