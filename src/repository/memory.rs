//! In-memory record repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::RecordRepository;
use crate::error::{RecordError, Result};
use crate::models::Record;

/// Keeps records in a map. Lists are ordered newest first.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    records: RwLock<HashMap<String, Record>>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_active(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        Err(RecordError::Cancelled)
    } else {
        Ok(())
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn create(&self, mut record: Record, cancel: &CancellationToken) -> Result<Record> {
        ensure_active(cancel)?;
        let mut records = self.records.write().await;
        if records.contains_key(&record.key) {
            return Err(RecordError::DuplicateKey(record.key));
        }

        let now = Utc::now();
        record.created_at = now;
        record.updated_at = now;
        records.insert(record.key.clone(), record.clone());
        Ok(record)
    }

    async fn get_by_key(&self, key: &str, cancel: &CancellationToken) -> Result<Record> {
        ensure_active(cancel)?;
        self.records
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| RecordError::NotFound(key.to_string()))
    }

    async fn list(
        &self,
        offset: u64,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<(Vec<Record>, u64)> {
        ensure_active(cancel)?;
        let records = self.records.read().await;
        let total = records.len() as u64;

        let mut ordered: Vec<&Record> = records.values().collect();
        ordered.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.key.cmp(&b.key))
        });

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let page = ordered
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok((page, total))
    }

    async fn update(
        &self,
        key: &str,
        title: &str,
        body: &str,
        cancel: &CancellationToken,
    ) -> Result<Record> {
        ensure_active(cancel)?;
        let mut records = self.records.write().await;
        let record = records
            .get_mut(key)
            .ok_or_else(|| RecordError::NotFound(key.to_string()))?;

        record.title = title.to_string();
        record.body = body.to_string();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&self, key: &str, cancel: &CancellationToken) -> Result<()> {
        ensure_active(cancel)?;
        self.records
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| RecordError::NotFound(key.to_string()))
    }
}

const DEMO_RECORDS: [(&str, &str, &str); 5] = [
    (
        "first-record",
        "First record",
        "Body of the first record with plenty of detail.",
    ),
    (
        "breaking-record",
        "Breaking record",
        "An urgent record everyone should read.",
    ),
    (
        "tech-update",
        "Technology update",
        "New technology keeps changing the world.",
    ),
    (
        "sports-results",
        "Sports results",
        "Results of recent matches and upcoming fixtures.",
    ),
    (
        "weather-forecast",
        "Weather forecast",
        "Tomorrow's weather. Bring an umbrella.",
    ),
];

/// Inserts the demo records, skipping any that fail.
///
/// Returns the number of records created.
pub async fn seed_demo_records(repo: &dyn RecordRepository) -> usize {
    let cancel = CancellationToken::new();
    let mut created = 0;

    for (key, title, body) in DEMO_RECORDS {
        match repo.create(Record::new(key, title, body), &cancel).await {
            Ok(_) => {
                info!("Seeded record: {}", key);
                created += 1;
            }
            Err(err) => warn!("Failed to seed record {}: {}", key, err),
        }
    }

    created
}
