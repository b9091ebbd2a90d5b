//! Cache Module
//!
//! Provides an in-memory key/value store with fixed-TTL expiration.

mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use stats::{CacheCounters, CacheStats};
pub use store::TtlStore;
pub(crate) use store::{purge_expired, Entries};
