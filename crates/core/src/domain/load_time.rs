//! LoadTime - the single timestamp-like value produced by a TimeSource
//!
//! A wall-clock reading in milliseconds since the Unix epoch, shifted forward
//! by a random offset drawn from `[0, MAX_OFFSET_MILLIS)`.

use super::error::{DomainError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Exclusive upper bound of the random offset (about 3.17 years)
pub const MAX_OFFSET_MILLIS: u64 = 100_000_000_000;

/// Milliseconds since 1970-01-01T00:00:00Z, never negative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LoadTime(u64);

impl LoadTime {
    /// Combine a clock reading with a random offset
    ///
    /// # Errors
    /// - `NegativeBase` if the clock reading precedes the epoch
    /// - `OffsetOutOfRange` if `offset >= MAX_OFFSET_MILLIS`
    pub fn from_parts(base_millis: i64, offset_millis: u64) -> Result<Self> {
        let base = u64::try_from(base_millis).map_err(|_| DomainError::NegativeBase(base_millis))?;

        if offset_millis >= MAX_OFFSET_MILLIS {
            return Err(DomainError::OffsetOutOfRange {
                offset: offset_millis,
                max: MAX_OFFSET_MILLIS,
            });
        }

        // i64::MAX + MAX_OFFSET_MILLIS still fits in u64
        Ok(Self(base + offset_millis))
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// Interpret the value as a UTC instant
    ///
    /// Returns `None` when the value is beyond chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        i64::try_from(self.0)
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

impl fmt::Display for LoadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<LoadTime> for u64 {
    fn from(value: LoadTime) -> Self {
        value.0
    }
}
