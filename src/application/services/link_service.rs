//! Short link creation and resolution engine.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use metrics::counter;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{Mapping, NewMapping};
use crate::domain::repositories::{MappingRepository, StoreError};
use crate::infrastructure::cache::CacheService;
use crate::utils::code_generator::{CodeGenerator, DEFAULT_CODE_LENGTH};
use crate::utils::code_validator::{CodeValidator, CodeViolation};
use crate::utils::url_policy::UrlPolicy;

/// How long resolved mappings stay in the cache.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// How many generated codes are tried before giving up on a collision.
pub const DEFAULT_GENERATION_ATTEMPTS: usize = 3;

/// Failures of the create, resolve and list operations.
///
/// Not-found is not an error: [`LinkService::resolve`] returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid URL format")]
    InvalidUrl,

    #[error(transparent)]
    InvalidCode(#[from] CodeViolation),

    #[error("short code `{0}` is already in use")]
    CodeInUse(String),

    #[error("persistence failed: {0}")]
    PersistenceFailed(#[source] StoreError),

    #[error("{0}")]
    Unknown(String),
}

/// Tunables for [`LinkService`], fixed at construction.
#[derive(Debug, Clone)]
pub struct LinkServiceOptions {
    pub code_length: usize,
    /// Inserts attempted for generated codes; `1` disables collision retry.
    pub generation_attempts: usize,
    pub cache_ttl: Duration,
    pub url_policy: UrlPolicy,
    /// Reserved words added to the built-in list.
    pub reserved_codes: Vec<String>,
}

impl Default for LinkServiceOptions {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            generation_attempts: DEFAULT_GENERATION_ATTEMPTS,
            cache_ttl: DEFAULT_CACHE_TTL,
            url_policy: UrlPolicy::default(),
            reserved_codes: Vec::new(),
        }
    }
}

/// Creates and resolves short links.
///
/// The store is authoritative; the cache is a best-effort mirror written after
/// every successful insert and every store hit. The service holds no mutable
/// state, so one instance is shared by all request handlers.
///
/// The existence check on custom codes is only a fast path. Two concurrent
/// requests for the same code can both pass it; the store's unique index
/// rejects the second insert and that rejection is reported as
/// [`LinkError::CodeInUse`].
pub struct LinkService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    cache: Arc<dyn CacheService>,
    generator: CodeGenerator,
    validator: CodeValidator,
    url_policy: UrlPolicy,
    cache_ttl: Duration,
    generation_attempts: usize,
}

impl<R: MappingRepository + ?Sized> LinkService<R> {
    /// Creates a service with default options.
    pub fn new(repository: Arc<R>, cache: Arc<dyn CacheService>) -> Self {
        Self::with_options(repository, cache, LinkServiceOptions::default())
    }

    /// Creates a service with explicit options.
    pub fn with_options(
        repository: Arc<R>,
        cache: Arc<dyn CacheService>,
        options: LinkServiceOptions,
    ) -> Self {
        Self {
            repository,
            cache,
            generator: CodeGenerator::new(options.code_length),
            validator: CodeValidator::new(options.reserved_codes),
            url_policy: options.url_policy,
            cache_ttl: options.cache_ttl,
            generation_attempts: options.generation_attempts.max(1),
        }
    }

    /// Creates a mapping for `original_url`.
    ///
    /// An empty `custom_code` is treated the same as `None`.
    ///
    /// # Errors
    ///
    /// - [`LinkError::InvalidCode`] if the custom code is malformed or reserved
    /// - [`LinkError::InvalidUrl`] if the URL is rejected by the configured policy
    /// - [`LinkError::CodeInUse`] if the custom code is taken
    /// - [`LinkError::PersistenceFailed`] if the store write fails
    pub async fn shorten(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
    ) -> Result<Mapping, LinkError> {
        self.shorten_until(original_url, custom_code, None).await
    }

    /// Same as [`Self::shorten`], recording an informational expiry.
    pub async fn shorten_until(
        &self,
        original_url: &str,
        custom_code: Option<&str>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Mapping, LinkError> {
        let custom_code = custom_code.filter(|code| !code.is_empty());

        // Code problems win over URL problems: a reserved code is reported
        // as such whatever the URL looks like.
        if let Some(code) = custom_code {
            self.validator.validate(code)?;
        }

        if !self.url_policy.accepts(original_url) {
            return Err(LinkError::InvalidUrl);
        }

        let mapping = match custom_code {
            Some(code) => {
                self.insert_custom(code, original_url, expires_at)
                    .await?
            }
            None => self.insert_generated(original_url, expires_at).await?,
        };

        counter!("shortlinks_mappings_created_total").increment(1);
        info!(code = %mapping.short_code, "Created short link");

        self.populate_cache(&mapping.short_code, &mapping.original_url)
            .await;

        Ok(mapping)
    }

    /// Resolves a short code to its destination URL.
    ///
    /// A cache hit is returned without consulting the store. On a miss the
    /// store is queried and a hit is mirrored back into the cache.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the code is mapped
    /// - `Ok(None)` if no mapping exists
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::PersistenceFailed`] if the store lookup fails.
    /// Cache failures are logged and treated as misses.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, LinkError> {
        match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                counter!("shortlinks_cache_lookups_total", "result" => "hit").increment(1);
                debug!(code = %short_code, "Resolved from cache");
                return Ok(Some(url));
            }
            Ok(None) => {
                counter!("shortlinks_cache_lookups_total", "result" => "miss").increment(1);
            }
            Err(e) => {
                counter!("shortlinks_cache_lookups_total", "result" => "error").increment(1);
                warn!(code = %short_code, error = %e, "Cache read failed, falling back to store");
            }
        }

        let Some(mapping) = self
            .repository
            .find_by_code(short_code)
            .await
            .map_err(persistence_failed)?
        else {
            debug!(code = %short_code, "Short code not found");
            return Ok(None);
        };

        self.populate_cache(&mapping.short_code, &mapping.original_url)
            .await;

        Ok(Some(mapping.original_url))
    }

    /// Lists every mapping straight from the store, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::PersistenceFailed`] if the store scan fails.
    pub async fn list_all(&self) -> Result<Vec<Mapping>, LinkError> {
        self.repository
            .find_all()
            .await
            .map_err(persistence_failed)
    }

    /// Checks that the durable store answers.
    pub async fn ping_store(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }

    async fn insert_custom(
        &self,
        code: &str,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Mapping, LinkError> {
        if self
            .repository
            .find_by_code(code)
            .await
            .map_err(persistence_failed)?
            .is_some()
        {
            return Err(LinkError::CodeInUse(code.to_string()));
        }

        let new_mapping = NewMapping {
            short_code: code.to_string(),
            original_url: original_url.to_string(),
            expires_at,
        };

        match self.repository.insert(new_mapping).await {
            Ok(mapping) => Ok(mapping),
            Err(StoreError::UniqueViolation(code)) => {
                debug!(code = %code, "Custom code taken by a concurrent insert");
                Err(LinkError::CodeInUse(code))
            }
            Err(e) => Err(persistence_failed(e)),
        }
    }

    async fn insert_generated(
        &self,
        original_url: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<Mapping, LinkError> {
        for attempt in 1..=self.generation_attempts {
            let new_mapping = NewMapping {
                short_code: self.generator.generate(),
                original_url: original_url.to_string(),
                expires_at,
            };

            match self.repository.insert(new_mapping).await {
                Ok(mapping) => return Ok(mapping),
                Err(StoreError::UniqueViolation(code)) => {
                    warn!(
                        code = %code,
                        attempt,
                        max_attempts = self.generation_attempts,
                        "Generated code collided"
                    );
                }
                Err(e) => return Err(persistence_failed(e)),
            }
        }

        error!(
            attempts = self.generation_attempts,
            "Could not allocate a unique short code"
        );
        Err(LinkError::Unknown(format!(
            "no unique short code after {} attempts",
            self.generation_attempts
        )))
    }

    async fn populate_cache(&self, short_code: &str, original_url: &str) {
        if let Err(e) = self
            .cache
            .set_url(short_code, original_url, self.cache_ttl)
            .await
        {
            warn!(code = %short_code, error = %e, "Failed to cache mapping");
        }
    }
}

fn persistence_failed(e: StoreError) -> LinkError {
    error!(error = %e, "Store operation failed");
    LinkError::PersistenceFailed(e)
}
