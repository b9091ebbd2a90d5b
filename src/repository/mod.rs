//! Backing-store collaborator consumed by the record service.
//!
//! Every call receives the caller's cancellation token unchanged.

mod memory;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::models::Record;

pub use memory::{seed_demo_records, InMemoryRecordRepository};

/// Storage operations for records.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Stores a new record and returns it as persisted.
    ///
    /// # Errors
    /// Returns `RecordError::DuplicateKey` if the key is taken.
    async fn create(&self, record: Record, cancel: &CancellationToken) -> Result<Record>;

    /// # Errors
    /// Returns `RecordError::NotFound` if no record has the key.
    async fn get_by_key(&self, key: &str, cancel: &CancellationToken) -> Result<Record>;

    /// Returns up to `limit` records starting at `offset`, plus the total count.
    async fn list(
        &self,
        offset: u64,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Record>, u64)>;

    /// Replaces title and body and bumps `updated_at`. Returns the stored record.
    ///
    /// # Errors
    /// Returns `RecordError::NotFound` if no record has the key.
    async fn update(
        &self,
        key: &str,
        title: &str,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<Record>;

    /// # Errors
    /// Returns `RecordError::NotFound` if no record has the key.
    async fn delete(&self, key: &str, cancel: &CancellationToken) -> Result<()>;
}
