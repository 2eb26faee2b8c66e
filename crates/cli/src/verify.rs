//! Concurrent read check for the `verify` subcommand

use anyhow::{bail, Context, Result};
use loadtime_core::{LoadTime, TimeSource};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of a successful verify run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifyReport {
    pub load_time: LoadTime,
    pub reads: usize,
    pub threads: usize,
}

/// Per-thread read counts; the first `reads % threads` threads take one extra
///
/// `threads` is clamped to `reads` so no thread sits idle.
fn split_reads(reads: usize, threads: usize) -> Vec<usize> {
    let threads = threads.min(reads);
    (0..threads)
        .map(|i| reads / threads + usize::from(i < reads % threads))
        .collect()
}

/// First value, provided every value equals it
fn check_agreement(observed: &[LoadTime]) -> Result<LoadTime> {
    let Some(&first) = observed.first() else {
        bail!("no load time reads were made");
    };

    let mismatches = observed.iter().filter(|v| **v != first).count();
    if mismatches > 0 {
        warn!(mismatches = mismatches, "Load time reads disagree");
        bail!(
            "{mismatches} of {} reads disagreed with {first}",
            observed.len()
        );
    }
    Ok(first)
}

/// Spread `reads` calls over `threads` threads and require a single answer
pub fn verify(time_source: &Arc<TimeSource>, reads: usize, threads: usize) -> Result<VerifyReport> {
    if reads == 0 || threads == 0 {
        bail!("--reads and --threads must both be positive");
    }

    let shares = split_reads(reads, threads);
    let results: Vec<Result<Vec<LoadTime>>> = std::thread::scope(|scope| {
        let handles: Vec<_> = shares
            .iter()
            .map(|&share| {
                let source = Arc::clone(time_source);
                scope.spawn(move || {
                    (0..share)
                        .map(|_| source.get_load_time().map_err(anyhow::Error::from))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|h| {
                h.join()
                    .unwrap_or_else(|_| Err(anyhow::anyhow!("reader thread panicked")))
            })
            .collect()
    });

    let mut observed: Vec<LoadTime> = Vec::with_capacity(reads);
    for thread_reads in results {
        observed.extend(thread_reads.context("Failed to compute load time")?);
    }

    let load_time = check_agreement(&observed)?;
    let report = VerifyReport {
        load_time,
        reads: observed.len(),
        threads: shares.len(),
    };

    info!(
        reads = report.reads,
        threads = report.threads,
        load_time_ms = load_time.as_millis(),
        "Load time reads agree"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadtime_core::port::random_provider::mocks::{MockRandomProvider, UnavailableRandomProvider};
    use loadtime_core::port::time_provider::mocks::MockTimeProvider;

    fn mock_source() -> (Arc<TimeSource>, Arc<MockRandomProvider>) {
        let rng = Arc::new(MockRandomProvider::new(42));
        let source = Arc::new(TimeSource::new(
            Arc::new(MockTimeProvider::new(1_000_000)),
            rng.clone(),
        ));
        (source, rng)
    }

    #[test]
    fn test_split_covers_every_read() {
        assert_eq!(split_reads(10, 3), vec![4, 3, 3]);
        assert_eq!(split_reads(2, 8), vec![1, 1]);
        assert_eq!(split_reads(8, 8), vec![1; 8]);

        for reads in 1..50 {
            for threads in 1..12 {
                let shares = split_reads(reads, threads);
                assert_eq!(shares.iter().sum::<usize>(), reads);
                assert_eq!(shares.len(), threads.min(reads));
                assert!(shares.iter().all(|&s| s > 0));
            }
        }
    }

    #[test]
    fn test_uneven_split_reads_all() {
        let (source, rng) = mock_source();

        let report = verify(&source, 10, 3).unwrap();
        assert_eq!(report.reads, 10);
        assert_eq!(report.threads, 3);
        assert_eq!(report.load_time.as_millis(), 1_000_042);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn test_more_threads_than_reads_is_clamped() {
        let (source, _) = mock_source();

        let report = verify(&source, 2, 8).unwrap();
        assert_eq!(report.reads, 2);
        assert_eq!(report.threads, 2);
    }

    #[test]
    fn test_zero_reads_or_threads_rejected() {
        let (source, rng) = mock_source();

        let err = verify(&source, 0, 4).unwrap_err();
        assert!(err.to_string().contains("must both be positive"));
        let err = verify(&source, 4, 0).unwrap_err();
        assert!(err.to_string().contains("must both be positive"));

        // Rejected before any read
        assert!(!source.is_computed());
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_disagreeing_reads_rejected() {
        let a = LoadTime::from_parts(1_000, 0).unwrap();
        let b = LoadTime::from_parts(1_000, 1).unwrap();

        let err = check_agreement(&[a, a, b, a, b]).unwrap_err();
        assert_eq!(err.to_string(), "2 of 5 reads disagreed with 1000");

        assert_eq!(check_agreement(&[b, b]).unwrap(), b);
        assert!(check_agreement(&[]).is_err());
    }

    #[test]
    fn test_source_failure_propagates() {
        let source = Arc::new(TimeSource::new(
            Arc::new(MockTimeProvider::new(0)),
            Arc::new(UnavailableRandomProvider),
        ));

        let err = verify(&source, 4, 2).unwrap_err();
        assert!(err.to_string().contains("Failed to compute load time"));
    }
}
