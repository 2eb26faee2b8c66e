// Random Provider Port (for deterministic testing)

use crate::error::{AppError, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Random provider interface (allows fixed offsets in tests)
pub trait RandomProvider: Send + Sync {
    /// Draw an integer uniformly from `[0, upper)`
    ///
    /// Fails with `AppError::RandomSourceUnavailable` when no entropy can be
    /// read, and with `AppError::Validation` when `upper` is zero.
    fn random_below(&self, upper: u64) -> Result<u64>;
}

fn check_upper(upper: u64) -> Result<()> {
    if upper == 0 {
        return Err(AppError::Validation(
            "random upper bound must be positive".to_string(),
        ));
    }
    Ok(())
}

/// OS entropy provider (production)
///
/// Seeds a fresh `StdRng` from the OS on each draw so that an entropy
/// failure surfaces as an error instead of a panic.
pub struct OsRandomProvider;

impl RandomProvider for OsRandomProvider {
    fn random_below(&self, upper: u64) -> Result<u64> {
        check_upper(upper)?;
        let mut rng = StdRng::from_rng(OsRng)
            .map_err(|e| AppError::RandomSourceUnavailable(e.to_string()))?;
        Ok(rng.gen_range(0..upper))
    }
}

/// Seeded provider for reproducible runs
pub struct SeededRandomProvider {
    rng: Mutex<StdRng>,
}

impl SeededRandomProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomProvider for SeededRandomProvider {
    fn random_below(&self, upper: u64) -> Result<u64> {
        check_upper(upper)?;
        // The RNG state stays valid even if a holder panicked
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rng.gen_range(0..upper))
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Mock RNG returning a fixed value and counting draws
    pub struct MockRandomProvider {
        value: u64,
        draws: AtomicUsize,
    }

    impl MockRandomProvider {
        pub fn new(value: u64) -> Self {
            Self {
                value,
                draws: AtomicUsize::new(0),
            }
        }

        /// Number of values drawn so far
        pub fn draws(&self) -> usize {
            self.draws.load(Ordering::SeqCst)
        }
    }

    impl RandomProvider for MockRandomProvider {
        fn random_below(&self, _upper: u64) -> Result<u64> {
            self.draws.fetch_add(1, Ordering::SeqCst);
            Ok(self.value)
        }
    }

    /// RNG that can never be read
    pub struct UnavailableRandomProvider;

    impl RandomProvider for UnavailableRandomProvider {
        fn random_below(&self, _upper: u64) -> Result<u64> {
            Err(AppError::RandomSourceUnavailable(
                "mock entropy source offline".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_random_stays_below_upper() {
        let provider = OsRandomProvider;
        for _ in 0..100 {
            assert!(provider.random_below(10).unwrap() < 10);
        }
    }

    #[test]
    fn test_upper_of_one_always_yields_zero() {
        assert_eq!(OsRandomProvider.random_below(1).unwrap(), 0);
        assert_eq!(SeededRandomProvider::new(7).random_below(1).unwrap(), 0);
    }

    #[test]
    fn test_zero_upper_is_rejected() {
        let result = OsRandomProvider.random_below(0);
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = SeededRandomProvider::new(7).random_below(0);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = SeededRandomProvider::new(1234);
        let b = SeededRandomProvider::new(1234);
        for _ in 0..10 {
            assert_eq!(
                a.random_below(1_000_000).unwrap(),
                b.random_below(1_000_000).unwrap()
            );
        }
    }
}
