//! Repeatability testing utilities.
//!
//! Provides a harness for verifying that pricing produces bit-identical
//! results given identical inputs.
//!
//! # Testing Strategy
//!
//! Pricing is a pure function of the rulebook and the caller's snapshot.
//! Sources of drift would include:
//!
//! - **Iteration order**: loadout maps and registries are `BTreeMap`s, so
//!   sums are always taken in key order.
//! - **Hidden state**: a cached cost or stale role label leaking into the
//!   next computation.
//! - **Shared state across threads**: the standard rulebook is initialized
//!   once and read-only afterwards.
//!
//! Results are compared through [`f64::to_bits`], never with a tolerance.

use std::thread;

/// Result of a repeatability test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatabilityResult {
    /// Whether all runs produced identical results.
    pub is_repeatable: bool,
    /// Bit patterns of each run's result.
    pub bits: Vec<u64>,
}

impl RepeatabilityResult {
    fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        let bits: Vec<u64> = values.into_iter().map(f64::to_bits).collect();
        let is_repeatable = bits.windows(2).all(|w| w[0] == w[1]);
        Self { is_repeatable, bits }
    }

    /// Get all distinct results (should be 1 for a pure computation).
    #[must_use]
    pub fn distinct_values(&self) -> Vec<f64> {
        let mut unique = self.bits.clone();
        unique.sort_unstable();
        unique.dedup();
        unique.into_iter().map(f64::from_bits).collect()
    }

    /// Assert that all runs matched.
    ///
    /// # Panics
    ///
    /// Panics if runs produced different results.
    pub fn assert_repeatable(&self) {
        if !self.is_repeatable {
            panic!(
                "Pricing is not repeatable!\n\
                 Runs: {}\n\
                 Distinct results: {:?}",
                self.bits.len(),
                self.distinct_values()
            );
        }
    }
}

/// Run a computation several times in sequence and compare results.
///
/// # Example
///
/// ```ignore
/// use armory_test_utils::determinism::verify_repeatable;
///
/// verify_repeatable(5, || base_model_cost(rules, &stats, &traits)).assert_repeatable();
/// ```
pub fn verify_repeatable<F>(runs: usize, compute: F) -> RepeatabilityResult
where
    F: Fn() -> f64,
{
    let result = RepeatabilityResult::from_values((0..runs).map(|_| compute()));
    tracing::debug!(runs, repeatable = result.is_repeatable, "Sequential repeatability check");
    result
}

/// Run a computation on `threads` scoped threads at once and compare
/// results.
///
/// # Panics
///
/// Re-raises the panic of any worker thread.
pub fn run_parallel<F>(threads: usize, compute: F) -> RepeatabilityResult
where
    F: Fn() -> f64 + Sync,
{
    let values: Vec<f64> = thread::scope(|s| {
        let handles: Vec<_> = (0..threads).map(|_| s.spawn(&compute)).collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
            .collect()
    });

    let result = RepeatabilityResult::from_values(values);
    tracing::debug!(threads, repeatable = result.is_repeatable, "Parallel repeatability check");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_constant_is_repeatable() {
        let result = verify_repeatable(4, || 26.25);
        assert!(result.is_repeatable);
        assert_eq!(result.distinct_values(), vec![26.25]);
        result.assert_repeatable();
    }

    #[test]
    fn test_drift_is_detected() {
        let counter = Cell::new(0.0);
        let result = verify_repeatable(3, || {
            counter.set(counter.get() + 1.0);
            counter.get()
        });
        assert!(!result.is_repeatable);
        assert_eq!(result.distinct_values().len(), 3);
    }

    #[test]
    #[should_panic(expected = "not repeatable")]
    fn test_assert_panics_on_drift() {
        let counter = Cell::new(0.0);
        verify_repeatable(2, || {
            counter.set(counter.get() + 0.5);
            counter.get()
        })
        .assert_repeatable();
    }

    #[test]
    fn test_parallel_constant() {
        let result = run_parallel(8, || 1.25);
        assert_eq!(result.bits.len(), 8);
        result.assert_repeatable();
    }
}
