//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Mapping;

/// Request to shorten a single URL.
///
/// Only size limits are checked here; URL and code rules belong to the
/// link service.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL.
    #[validate(length(min = 1, max = 8192, message = "url is required"))]
    pub url: String,

    /// Optional custom short code. Empty means "generate one".
    #[validate(length(max = 64))]
    pub code: Option<String>,

    /// Optional expiry, stored for information only.
    pub expires_at: Option<DateTime<Utc>>,
}

/// A created mapping.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_code: String,
    pub original_url: String,
    pub short_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenResponse {
    pub fn from_mapping(mapping: Mapping, short_url: String) -> Self {
        Self {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            short_url,
            expires_at: mapping.expires_at,
        }
    }
}
