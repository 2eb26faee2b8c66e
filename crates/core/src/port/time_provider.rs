// Time Provider Port (for testability)

use crate::error::{AppError, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Time provider interface (allows mocking in tests)
pub trait TimeProvider: Send + Sync {
    /// Get current time in milliseconds since epoch
    ///
    /// Fails with `AppError::ClockUnavailable` when the clock cannot be read.
    fn now_millis(&self) -> Result<i64>;
}

/// System time provider (production)
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now_millis(&self) -> Result<i64> {
        millis_since_epoch(SystemTime::now())
    }
}

/// Convert a wall-clock reading to epoch milliseconds
///
/// Readings before the epoch or beyond `i64::MAX` ms are `ClockUnavailable`.
fn millis_since_epoch(time: SystemTime) -> Result<i64> {
    let elapsed = time.duration_since(UNIX_EPOCH).map_err(|e| {
        AppError::ClockUnavailable(format!(
            "system clock is {} ms before the Unix epoch",
            e.duration().as_millis()
        ))
    })?;

    i64::try_from(elapsed.as_millis()).map_err(|_| {
        AppError::ClockUnavailable(format!(
            "system clock reading {} ms does not fit in i64",
            elapsed.as_millis()
        ))
    })
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock clock returning a fixed reading
    pub struct MockTimeProvider {
        current_time: i64,
        reads: AtomicUsize,
    }

    impl MockTimeProvider {
        pub fn new(current_time: i64) -> Self {
            Self {
                current_time,
                reads: AtomicUsize::new(0),
            }
        }

        /// Number of times the clock has been read
        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl TimeProvider for MockTimeProvider {
        fn now_millis(&self) -> Result<i64> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(self.current_time)
        }
    }

    /// Clock that can never be read
    pub struct UnavailableTimeProvider;

    impl TimeProvider for UnavailableTimeProvider {
        fn now_millis(&self) -> Result<i64> {
            Err(AppError::ClockUnavailable("mock clock offline".to_string()))
        }
    }
}
