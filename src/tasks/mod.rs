//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries at a fixed interval

mod sweeper;

pub(crate) use sweeper::Sweeper;
pub use sweeper::DEFAULT_SWEEP_INTERVAL;
