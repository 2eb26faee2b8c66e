// Application Layer - Use cases and services

pub mod time_source;

pub use time_source::TimeSource;
