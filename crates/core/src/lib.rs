// Loadtime Core - Domain Logic & Ports
// NO CLI or subscriber dependencies (hexagonal core)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::TimeSource;
pub use domain::{LoadTime, MAX_OFFSET_MILLIS};
pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
