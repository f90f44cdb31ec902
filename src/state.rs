//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::cache::CacheService;

/// Link service over whichever store adapter the process was wired with.
pub type SharedLinkService = Arc<LinkService<dyn MappingRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: SharedLinkService,
    pub cache: Arc<dyn CacheService>,
    /// Public prefix used to build `short_url` values, without trailing slash.
    pub base_url: String,
}

impl AppState {
    pub fn new(
        link_service: SharedLinkService,
        cache: Arc<dyn CacheService>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            link_service,
            cache,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }
}
