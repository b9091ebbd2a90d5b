//! Request DTOs for the record API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for POST /records
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecordRequest {
    pub key: String,
    pub title: String,
    pub body: String,
}

/// Request body for PUT /records/:key
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateRecordRequest {
    pub title: String,
    pub body: String,
}

/// Query string for GET /records
///
/// Signed so that `page=0` or `limit=-1` reach validation instead of
/// being rejected by the extractor with a different error shape.
#[derive(Debug, Clone, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}
