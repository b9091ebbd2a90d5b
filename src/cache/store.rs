//! TTL Store Module
//!
//! Thread-safe key/value map where every entry expires a fixed TTL after it
//! was written. Expired entries are hidden from readers immediately and
//! physically removed by the background sweeper.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::time::Instant;

use crate::cache::CacheEntry;
use crate::error::CacheError;
use crate::tasks::{Sweeper, DEFAULT_SWEEP_INTERVAL};

/// Shared entry map guarded by a read/write lock.
pub(crate) type Entries<V> = RwLock<HashMap<String, CacheEntry<V>>>;

// == TTL Store ==
/// Expiring key/value store with one fixed TTL per instance.
///
/// Reads take the shared lock, writes take the exclusive lock. No method
/// performs I/O or awaits, and none of get/set/delete/clear can fail.
#[derive(Debug)]
pub struct TtlStore<V> {
    entries: Arc<Entries<V>>,
    ttl: Duration,
    sweeper: Sweeper,
}

impl<V> TtlStore<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates a store and starts its sweeper with the default 5 minute interval.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        Self::with_sweep_interval(ttl, DEFAULT_SWEEP_INTERVAL)
    }

    /// Creates a store whose sweeper runs every `sweep_interval`.
    ///
    /// # Panics
    /// Panics if called outside a tokio runtime.
    pub fn with_sweep_interval(ttl: Duration, sweep_interval: Duration) -> Self {
        let entries = Arc::new(RwLock::new(HashMap::new()));
        let sweeper = Sweeper::spawn(Arc::downgrade(&entries), sweep_interval);

        Self {
            entries,
            ttl,
            sweeper,
        }
    }

    // == Get ==
    /// Returns a copy of the value if present and not yet expired.
    ///
    /// Expired entries are left in place for the sweeper.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let entries = self.entries.read();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Inserts or overwrites the value, restarting its TTL.
    pub fn set(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry::new(value, self.ttl);
        self.entries.write().insert(key.into(), entry);
    }

    // == Delete ==
    /// Removes the entry if present.
    pub fn delete(&self, key: &str) {
        self.entries.write().remove(key);
    }

    // == Clear ==
    /// Removes every entry under a single exclusive lock.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    // == Purge Expired ==
    /// Runs one sweep pass immediately. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        purge_expired(&self.entries)
    }

    // == Stop ==
    /// Stops and joins the sweeper.
    ///
    /// The store stays usable afterwards, but nothing reclaims expired
    /// entries except `purge_expired`. A second call returns
    /// `CacheError::SweeperStopped`.
    pub async fn stop(&self) -> Result<(), CacheError> {
        self.sweeper.stop().await
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_running()
    }

    // == Length ==
    /// Returns the number of physically held entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Removes every entry expired at the time of the call.
pub(crate) fn purge_expired<V>(entries: &Entries<V>) -> usize {
    let now = Instant::now();
    let mut entries = entries.write();
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired_at(now));
    before - entries.len()
}
