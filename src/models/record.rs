//! Domain types owned by the backing store and copied into the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Record ==
/// A single stored record. The key is immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Creates a record stamped with the current time.
    pub fn new(key: impl Into<String>, title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            key: key.into(),
            title: title.into(),
            body: body.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

// == List Page ==
/// One page of records plus the total number of records in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListPage {
    pub records: Vec<Record>,
    pub total: u64,
}

// == Cached Value ==
/// Payload stored in the record cache.
///
/// Tagged so a lookup can tell a single record from a list page without
/// trusting the key format alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedValue {
    Single(Record),
    Page(ListPage),
}

impl CachedValue {
    pub fn into_record(self) -> Option<Record> {
        match self {
            CachedValue::Single(record) => Some(record),
            CachedValue::Page(_) => None,
        }
    }

    pub fn into_page(self) -> Option<ListPage> {
        match self {
            CachedValue::Page(page) => Some(page),
            CachedValue::Single(_) => None,
        }
    }
}
