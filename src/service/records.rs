//! Cache-aside orchestration for records.
//!
//! Reads consult the cache first and fill it on a miss. Writes go to the
//! backing store first and then invalidate.
//!
//! List pages are not indexed by record key, so instead of tracking which
//! pages a record appears on, every list key embeds a generation number.
//! Each write bumps the generation, which makes every cached page
//! unreachable at once; the orphaned entries expire and get swept.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::cache::{CacheCounters, CacheStats, TtlStore};
use crate::error::{RecordError, Result};
use crate::models::{CachedValue, ListPage, Record};
use crate::repository::RecordRepository;
use crate::service::validation::{validate_key, validate_pagination, validate_record};

fn record_key(key: &str) -> String {
    format!("records:item:{}", key)
}

fn list_key(generation: u64, page: u64, limit: u32) -> String {
    format!("records:list:{}:{}:{}", generation, page, limit)
}

/// Runs a backing-store call, giving up early if the caller cancels.
async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T>>,
) -> Result<T> {
    let result = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(RecordError::Cancelled),
        result = call => result,
    };

    if let Err(RecordError::Internal(msg)) = &result {
        error!("Backing store error: {}", msg);
    }
    result
}

// == Record Service ==
/// Coordinates the record cache with the backing store.
pub struct RecordService {
    repo: Arc<dyn RecordRepository>,
    cache: Arc<TtlStore<CachedValue>>,
    list_generation: AtomicU64,
    counters: CacheCounters,
}

impl RecordService {
    pub fn new(repo: Arc<dyn RecordRepository>, cache: Arc<TtlStore<CachedValue>>) -> Self {
        Self {
            repo,
            cache,
            list_generation: AtomicU64::new(0),
            counters: CacheCounters::new(),
        }
    }

    // == Create ==
    /// Stores a new record and caches it under its key.
    pub async fn create_record(
        &self,
        key: &str,
        title: &str,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        validate_record(key, title, body)?;

        let record = Record::new(key, title, body);
        let result = guarded(cancel, self.repo.create(record, cancel)).await;
        if matches!(result, Err(RecordError::Cancelled)) {
            // The insert may have landed anyway
            self.bump_list_generation();
        }

        let record = result?;
        self.bump_list_generation();
        self.cache
            .set(record_key(key), CachedValue::Single(record.clone()));
        Ok(record)
    }

    // == Get ==
    /// Returns the record from cache, or loads and caches it on a miss.
    pub async fn get_record(&self, key: &str, cancel: &CancellationToken) -> Result<Record> {
        validate_key(key)?;

        let cache_key = record_key(key);
        if let Some(record) = self.cache.get(&cache_key).and_then(CachedValue::into_record) {
            debug!("Cache hit: {}", cache_key);
            self.counters.record_hit();
            return Ok(record);
        }

        debug!("Cache miss: {}", cache_key);
        self.counters.record_miss();

        let generation = self.current_generation();
        let record = guarded(cancel, self.repo.get_by_key(key, cancel)).await?;

        self.fill_if_current(
            generation,
            vec![(cache_key, CachedValue::Single(record.clone()))],
        );
        Ok(record)
    }

    // == List ==
    /// Returns one page of records and the total count.
    ///
    /// A miss also warms the single-record cache with every record on the page.
    pub async fn list_records(
        &self,
        page: i64,
        limit: i64,
        cancel: &CancellationToken,
    ) -> Result<ListPage> {
        let (page, limit) = validate_pagination(page, limit)?;

        let generation = self.current_generation();
        let cache_key = list_key(generation, page, limit);
        if let Some(cached) = self.cache.get(&cache_key).and_then(CachedValue::into_page) {
            debug!("Cache hit: {}", cache_key);
            self.counters.record_hit();
            return Ok(cached);
        }

        debug!("Cache miss: {}", cache_key);
        self.counters.record_miss();

        // Pages past any reachable offset come back empty with the real total
        let offset = (page - 1)
            .checked_mul(u64::from(limit))
            .unwrap_or(u64::MAX);
        let (records, total) = guarded(cancel, self.repo.list(offset, limit, cancel)).await?;
        let list_page = ListPage { records, total };

        let mut fills: Vec<(String, CachedValue)> = list_page
            .records
            .iter()
            .map(|record| (record_key(&record.key), CachedValue::Single(record.clone())))
            .collect();
        fills.push((cache_key, CachedValue::Page(list_page.clone())));
        self.fill_if_current(generation, fills);

        Ok(list_page)
    }

    // == Update ==
    /// Updates title and body, then drops the cached copy and all list pages.
    pub async fn update_record(
        &self,
        key: &str,
        title: &str,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        validate_record(key, title, body)?;

        let result = guarded(cancel, self.repo.update(key, title, body, cancel)).await;
        if matches!(result, Ok(_) | Err(RecordError::Cancelled)) {
            self.invalidate(key);
        }
        result
    }

    // == Delete ==
    /// Deletes the record, then drops the cached copy and all list pages.
    pub async fn delete_record(&self, key: &str, cancel: &CancellationToken) -> Result<()> {
        validate_key(key)?;

        let result = guarded(cancel, self.repo.delete(key, cancel)).await;
        if matches!(result, Ok(_) | Err(RecordError::Cancelled)) {
            self.invalidate(key);
        }
        result
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        self.counters.snapshot(self.current_generation())
    }

    /// The cache shared with this service.
    pub fn cache(&self) -> &TtlStore<CachedValue> {
        &self.cache
    }

    /// Caches `fills` only if no write happened since `generation` was read.
    ///
    /// A write can still land between the first check and the inserts, so
    /// the generation is checked again afterwards and the inserts are undone
    /// if it moved. Writers bump before deleting, so either this second check
    /// sees the bump or the writer's delete runs after the insert.
    fn fill_if_current(&self, generation: u64, fills: Vec<(String, CachedValue)>) {
        if self.current_generation() != generation {
            return;
        }

        let keys: Vec<String> = fills.iter().map(|(key, _)| key.clone()).collect();
        for (key, value) in fills {
            self.cache.set(key, value);
        }

        if self.current_generation() != generation {
            debug!("Write raced a cache fill, dropping {} entries", keys.len());
            for key in &keys {
                self.cache.delete(key);
            }
        }
    }

    fn current_generation(&self) -> u64 {
        self.list_generation.load(Ordering::SeqCst)
    }

    fn bump_list_generation(&self) {
        self.list_generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Generation first, so a concurrent read that already passed its
    /// generation check has its single-record write removed below.
    fn invalidate(&self, key: &str) {
        self.bump_list_generation();
        self.cache.delete(&record_key(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::repository::InMemoryRecordRepository;
    use std::time::Duration;

    fn service() -> RecordService {
        let cache = Arc::new(TtlStore::new(Duration::from_secs(300)));
        RecordService::new(Arc::new(InMemoryRecordRepository::new()), cache)
    }

    #[test]
    fn test_cache_keys_are_namespaced() {
        assert_eq!(record_key("a-1"), "records:item:a-1");
        assert_eq!(list_key(3, 2, 10), "records:list:3:2:10");
        assert_eq!(
            list_key(0, 5_000_000_000, 10),
            "records:list:0:5000000000:10"
        );
    }

    #[tokio::test]
    async fn test_create_populates_cache() {
        let service = service();
        let cancel = CancellationToken::new();

        let created = service.create_record("a-1", "T", "C", &cancel).await.unwrap();

        let cached = service.cache().get("records:item:a-1");
        assert_eq!(cached, Some(CachedValue::Single(created)));
    }

    #[tokio::test]
    async fn test_duplicate_create_does_not_touch_cache() {
        let service = service();
        let cancel = CancellationToken::new();

        let first = service.create_record("a-1", "T", "C", &cancel).await.unwrap();
        let second = service.create_record("a-1", "T2", "C2", &cancel).await;

        assert!(matches!(second, Err(RecordError::DuplicateKey(_))));
        let cached = service.cache().get("records:item:a-1");
        assert_eq!(cached, Some(CachedValue::Single(first)));
    }

    #[tokio::test]
    async fn test_validation_runs_before_cache_access() {
        let service = service();
        let cancel = CancellationToken::new();

        let err = service.get_record("NOT VALID", &cancel).await.unwrap_err();
        assert!(matches!(err, RecordError::Validation(ValidationError::InvalidKey)));

        let err = service.list_records(0, 10, &cancel).await.unwrap_err();
        assert!(matches!(
            err,
            RecordError::Validation(ValidationError::InvalidPagination)
        ));

        let stats = service.stats();
        assert_eq!(stats.hits + stats.misses, 0);
    }

    #[tokio::test]
    async fn test_mistyped_cache_entry_is_treated_as_miss() {
        let service = service();
        let cancel = CancellationToken::new();
        service.create_record("a-1", "T", "C", &cancel).await.unwrap();

        service.cache().set(
            "records:item:a-1",
            CachedValue::Page(ListPage {
                records: vec![],
                total: 0,
            }),
        );

        let record = service.get_record("a-1", &cancel).await.unwrap();
        assert_eq!(record.title, "T");
        assert_eq!(service.stats().misses, 1);
    }

    #[tokio::test]
    async fn test_cancelled_read_leaves_cache_empty() {
        let service = service();
        let live = CancellationToken::new();
        service.create_record("a-1", "T", "C", &live).await.unwrap();
        service.cache().clear();

        let cancelled = CancellationToken::new();
        cancelled.cancel();
        let result = service.get_record("a-1", &cancelled).await;

        assert!(matches!(result, Err(RecordError::Cancelled)));
        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_stale_generation_fill_is_skipped() {
        let service = service();
        let cancel = CancellationToken::new();
        service.create_record("a-1", "T", "C", &cancel).await.unwrap();
        service.cache().clear();

        let stale = service.current_generation() - 1;
        let record = Record::new("a-1", "Stale", "C");
        service.fill_if_current(
            stale,
            vec![(record_key("a-1"), CachedValue::Single(record))],
        );

        assert!(service.cache().is_empty());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_generation() {
        let service = service();
        let cancel = CancellationToken::new();

        let result = service.update_record("missing", "T", "C", &cancel).await;

        assert!(matches!(result, Err(RecordError::NotFound(_))));
        assert_eq!(service.stats().list_generation, 0);
    }

    #[tokio::test]
    async fn test_writes_bump_generation() {
        let service = service();
        let cancel = CancellationToken::new();

        service.create_record("a-1", "T", "C", &cancel).await.unwrap();
        service.update_record("a-1", "T2", "C2", &cancel).await.unwrap();
        service.delete_record("a-1", &cancel).await.unwrap();

        assert_eq!(service.stats().list_generation, 3);
        assert!(service.cache().get("records:item:a-1").is_none());
    }
}
