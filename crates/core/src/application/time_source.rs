//! TimeSource - compute-once load time service
//!
//! Reads the clock and the RNG once, on first request, and hands out the same
//! `LoadTime` for every later request. Construct one in the composition root
//! and share it through an `Arc`.

use crate::domain::{LoadTime, MAX_OFFSET_MILLIS};
use crate::error::Result;
use crate::port::{RandomProvider, TimeProvider};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use tracing::debug;

pub struct TimeSource {
    time_provider: Arc<dyn TimeProvider>,
    random_provider: Arc<dyn RandomProvider>,
    cached: OnceLock<LoadTime>,
    // Serializes first computation; failures leave `cached` empty
    init_lock: Mutex<()>,
}

impl TimeSource {
    /// Create an uncomputed time source
    ///
    /// # Arguments
    /// * `time_provider` - Wall clock for the base reading
    /// * `random_provider` - Uniform RNG for the offset
    pub fn new(
        time_provider: Arc<dyn TimeProvider>,
        random_provider: Arc<dyn RandomProvider>,
    ) -> Self {
        Self {
            time_provider,
            random_provider,
            cached: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Get the load time, computing it on first call
    ///
    /// Concurrent first callers block on a single computation and all observe
    /// its result. Clock and RNG errors are returned as-is and nothing is
    /// cached, so a later call computes afresh.
    pub fn get_load_time(&self) -> Result<LoadTime> {
        if let Some(load_time) = self.cached.get() {
            return Ok(*load_time);
        }

        // Guards unit data, so a poisoned lock is still usable
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished while we waited
        if let Some(load_time) = self.cached.get() {
            return Ok(*load_time);
        }

        let load_time = self.compute()?;
        Ok(*self.cached.get_or_init(|| load_time))
    }

    /// Cached value, if any, without computing
    pub fn peek(&self) -> Option<LoadTime> {
        self.cached.get().copied()
    }

    pub fn is_computed(&self) -> bool {
        self.cached.get().is_some()
    }

    fn compute(&self) -> Result<LoadTime> {
        let base_ms = self.time_provider.now_millis()?;
        let offset_ms = self.random_provider.random_below(MAX_OFFSET_MILLIS)?;
        let load_time = LoadTime::from_parts(base_ms, offset_ms)?;

        debug!(
            base_ms = base_ms,
            offset_ms = offset_ms,
            load_time_ms = load_time.as_millis(),
            "Load time computed"
        );

        Ok(load_time)
    }
}
