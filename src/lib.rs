//! Record Cache - a record service fronted by an expiring cache
//!
//! Reads go through a fixed-TTL in-memory cache before touching the backing
//! store; writes hit the store first and then invalidate.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlStore;
pub use config::Config;
pub use error::{CacheError, RecordError, ValidationError};
pub use service::RecordService;
