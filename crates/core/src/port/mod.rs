// Port Layer - Interfaces for external dependencies

pub mod random_provider;
pub mod time_provider;

// Re-exports
pub use random_provider::RandomProvider;
pub use time_provider::TimeProvider;
