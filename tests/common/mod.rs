#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use shortlinks::application::services::{LinkService, LinkServiceOptions};
use shortlinks::domain::entities::{Mapping, NewMapping};
use shortlinks::domain::repositories::{MappingRepository, StoreError};
use shortlinks::infrastructure::cache::{CacheError, CacheResult, CacheService};
use shortlinks::state::{AppState, SharedLinkService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::time::Duration;

pub const TEST_BASE_URL: &str = "http://sho.rt";

/// Store fake that enforces code uniqueness the way the partial unique index does.
///
/// `find_by_code` yields after reading, so concurrent creates can both pass
/// the existence check before either inserts.
#[derive(Default)]
pub struct InMemoryRepository {
    mappings: Mutex<Vec<Mapping>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    inserts: AtomicUsize,
    forced_collisions: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Makes every subsequent operation fail with [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Makes the next `n` inserts report a uniqueness violation.
    pub fn force_collisions(&self, n: usize) {
        self.forced_collisions.store(n, Ordering::SeqCst);
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.mappings.lock().unwrap().len()
    }

    /// Seeds a mapping directly, bypassing the engine.
    pub fn seed(&self, code: &str, url: &str) {
        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.mappings.lock().unwrap().push(Mapping::new(
            id,
            code.to_string(),
            url.to_string(),
            None,
            now,
            now,
        ));
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl MappingRepository for InMemoryRepository {
    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        self.check_available()?;
        self.inserts.fetch_add(1, Ordering::SeqCst);

        let forced = self
            .forced_collisions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if forced {
            return Err(StoreError::UniqueViolation(new_mapping.short_code));
        }

        let mut mappings = self.mappings.lock().unwrap();
        if mappings
            .iter()
            .any(|m| m.short_code == new_mapping.short_code)
        {
            return Err(StoreError::UniqueViolation(new_mapping.short_code));
        }

        let now = Utc::now();
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let mapping = Mapping::new(
            id,
            new_mapping.short_code,
            new_mapping.original_url,
            new_mapping.expires_at,
            now,
            now,
        );
        mappings.push(mapping.clone());

        Ok(mapping)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Mapping>, StoreError> {
        self.check_available()?;

        let found = self
            .mappings
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.short_code == short_code)
            .cloned();

        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn find_all(&self) -> Result<Vec<Mapping>, StoreError> {
        self.check_available()?;

        let mut all = self.mappings.lock().unwrap().clone();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

/// Cache fake backed by a map; TTLs are recorded but never expire entries.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    ttls: Mutex<HashMap<String, Duration>>,
    failing: AtomicBool,
}

impl InMemoryCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn evict_all(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn get(&self, code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(code).cloned()
    }

    pub fn ttl(&self, code: &str) -> Option<Duration> {
        self.ttls.lock().unwrap().get(code).copied()
    }

    /// Plants an entry without touching the store.
    pub fn put(&self, code: &str, url: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(code.to_string(), url.to_string());
    }

    fn check_available(&self) -> CacheResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for InMemoryCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        self.check_available()?;
        Ok(self.get(short_code))
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        self.check_available()?;
        self.put(short_code, original_url);
        self.ttls
            .lock()
            .unwrap()
            .insert(short_code.to_string(), ttl);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

pub fn create_link_service(
    repository: Arc<InMemoryRepository>,
    cache: Arc<InMemoryCache>,
) -> SharedLinkService {
    create_link_service_with(repository, cache, LinkServiceOptions::default())
}

pub fn create_link_service_with(
    repository: Arc<InMemoryRepository>,
    cache: Arc<InMemoryCache>,
    options: LinkServiceOptions,
) -> SharedLinkService {
    let repository: Arc<dyn MappingRepository> = repository;
    Arc::new(LinkService::with_options(repository, cache, options))
}

pub fn create_test_state(
    repository: Arc<InMemoryRepository>,
    cache: Arc<InMemoryCache>,
) -> AppState {
    let link_service = create_link_service(repository, cache.clone());
    AppState::new(link_service, cache, format!("{TEST_BASE_URL}/"))
}
