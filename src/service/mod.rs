//! Record service: validation plus cache-aside orchestration.

mod records;
pub mod validation;

pub use records::RecordService;
