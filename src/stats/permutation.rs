//! Exact permutation test over all equal-size relabelings of `X ++ Y`.
//!
//! The p-value is the fraction of partitions whose statistic is strictly
//! greater than the observed `s(X, Y)`. Ties do not count toward it. Every
//! one of the C(n, k) partitions is evaluated; there is no sampling and no
//! early stopping, so runtime grows exponentially with the target set size
//! (C(16, 8) = 12 870, C(32, 16) ≈ 6 × 10⁸).
//!
//! Parallel enumeration splits the rank space `[0, C(n, k))` into disjoint
//! contiguous ranges, counts each independently, and adds the counts. The
//! cache is warmed for every target word first, so workers only read it.

use crate::error::{Result, WeatError};
use crate::kernel::SimilarityProvider;
use crate::stats::association::AssociationCache;
use crate::stats::partition::Partitions;
use crate::stats::statistic::statistic;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Partitions evaluated between deadline checks.
const DEADLINE_CHECK_INTERVAL: u128 = 1024;

/// Ranges handed out per rayon worker thread.
const RANGES_PER_THREAD: usize = 4;

/// Enumeration settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermutationOptions {
    /// Enumerate on the rayon thread pool.
    pub parallel: bool,
    /// Abort with [`WeatError::DeadlineExceeded`] once this much time has passed.
    pub deadline: Option<Duration>,
}

/// Result of a permutation test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PermutationOutcome {
    /// The statistic `s(X, Y)` of the original labeling.
    pub observed: f64,
    /// Partitions whose statistic is strictly greater than `observed`.
    pub exceeding: u128,
    /// Number of partitions evaluated, C(|X| + |Y|, |X|).
    pub total: u128,
}

impl PermutationOutcome {
    /// One-sided p-value, `exceeding / total`.
    pub fn p_value(&self) -> f64 {
        self.exceeding as f64 / self.total as f64
    }
}

/// Run the exact permutation test of X against Y.
///
/// `cache` must be the one used for every other statistic of this test
/// invocation.
pub fn permutation_test<P, S>(
    cache: &AssociationCache<'_, P>,
    x: &[S],
    y: &[S],
    options: &PermutationOptions,
) -> Result<PermutationOutcome>
where
    P: SimilarityProvider + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    if x.len() != y.len() {
        return Err(WeatError::InputValidation(format!(
            "target sets must have equal size (|X| = {}, |Y| = {})",
            x.len(),
            y.len()
        )));
    }

    let started = Instant::now();
    let observed = statistic(cache, x, y)?;
    let total = Partitions::new(x, y)?.total();
    debug!(observed, total = %total, parallel = options.parallel, "enumerating partitions");

    let deadline = options.deadline.map(|limit| (started, limit));
    let exceeding = if options.parallel {
        count_parallel(cache, x, y, observed, total, deadline)?
    } else {
        count_range(cache, x, y, observed, 0, total, total, deadline)?
    };

    let outcome = PermutationOutcome {
        observed,
        exceeding,
        total,
    };
    debug!(
        exceeding = %exceeding,
        p_value = outcome.p_value(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "permutation test complete"
    );
    Ok(outcome)
}

/// p-value of X against Y with default (sequential, unbounded) options.
pub fn p_value<P, S>(cache: &AssociationCache<'_, P>, x: &[S], y: &[S]) -> Result<f64>
where
    P: SimilarityProvider + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    Ok(permutation_test(cache, x, y, &PermutationOptions::default())?.p_value())
}

fn count_parallel<P, S>(
    cache: &AssociationCache<'_, P>,
    x: &[S],
    y: &[S],
    observed: f64,
    total: u128,
    deadline: Option<(Instant, Duration)>,
) -> Result<u128>
where
    P: SimilarityProvider + Sync + ?Sized,
    S: AsRef<str> + Sync,
{
    // Surface lookup failures here, not inside a worker, and make the
    // workers read-only on the cache.
    cache.warm(x.iter().chain(y.iter()))?;

    let ranges = split_ranges(total, rayon::current_num_threads() * RANGES_PER_THREAD);
    debug!(ranges = ranges.len(), threads = rayon::current_num_threads(), "parallel split");

    ranges
        .into_par_iter()
        .map(|(start, len)| count_range(cache, x, y, observed, start, len, total, deadline))
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

/// Count partitions in `[start, start + len)` whose statistic exceeds `observed`.
#[allow(clippy::too_many_arguments)]
fn count_range<P, S>(
    cache: &AssociationCache<'_, P>,
    x: &[S],
    y: &[S],
    observed: f64,
    start: u128,
    len: u128,
    total: u128,
    deadline: Option<(Instant, Duration)>,
) -> Result<u128>
where
    P: SimilarityProvider + ?Sized,
    S: AsRef<str>,
{
    let mut partitions = Partitions::range(x, y, start, len)?;
    let mut exceeding = 0u128;
    let mut evaluated = 0u128;

    while let Some((group1, group2)) = partitions.advance() {
        // Checked at the head of every interval, so each range checks at
        // least once however few partitions it holds.
        if evaluated % DEADLINE_CHECK_INTERVAL == 0 {
            check_deadline(deadline, total)?;
        }
        if statistic(cache, group1, group2)? > observed {
            exceeding += 1;
        }
        evaluated += 1;
    }
    check_deadline(deadline, total)?;

    Ok(exceeding)
}

fn check_deadline(deadline: Option<(Instant, Duration)>, total: u128) -> Result<()> {
    match deadline {
        Some((started, limit)) if started.elapsed() >= limit => Err(WeatError::DeadlineExceeded {
            elapsed_ms: started.elapsed().as_millis(),
            total,
        }),
        _ => Ok(()),
    }
}

/// Split `[0, total)` into at most `parts` contiguous, non-empty ranges.
fn split_ranges(total: u128, parts: usize) -> Vec<(u128, u128)> {
    let parts = (parts.max(1) as u128).min(total.max(1));
    let base = total / parts;
    let extra = total % parts;

    let mut ranges = Vec::with_capacity(parts as usize);
    let mut start = 0u128;
    for i in 0..parts {
        let len = base + u128::from(i < extra);
        if len > 0 {
            ranges.push((start, len));
        }
        start += len;
    }
    ranges
}
