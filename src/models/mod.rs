//! Domain records and the DTOs used by the HTTP layer.

pub mod record;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use record::{CachedValue, ListPage, Record};
pub use requests::{CreateRecordRequest, ListQuery, UpdateRecordRequest};
pub use responses::{DeleteResponse, HealthResponse, ListResponse, StatsResponse};
