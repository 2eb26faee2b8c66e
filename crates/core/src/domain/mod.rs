// Domain Layer - Pure value types

pub mod error;
pub mod load_time;

// Re-exports
pub use error::DomainError;
pub use load_time::{LoadTime, MAX_OFFSET_MILLIS};
