//! Response DTOs for the record API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::Record;

/// Response body for GET /records
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub records: Vec<Record>,
    pub total: u64,
    pub page: i64,
    pub limit: i64,
}

/// Response body for DELETE /records/:key
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            success: true,
            key: key.into(),
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that went to the backing store
    pub misses: u64,
    /// Current list-page generation
    pub list_generation: u64,
    /// Entries physically held by the cache, expired ones included until swept
    pub cached_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
