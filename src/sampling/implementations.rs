// src/sampling/implementations.rs

use crate::error::{SimError, SimResult};
use crate::sampling::traits::VariateSource;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Exp};
use std::collections::VecDeque;
use std::fmt::Debug;

fn check_rate(rate: f64) -> SimResult<()> {
    if rate > 0.0 && rate.is_finite() {
        Ok(())
    } else {
        Err(SimError::Domain(format!(
            "exponential rate must be positive and finite, got {}",
            rate
        )))
    }
}

fn check_upper_bound(max: f64) -> SimResult<()> {
    if max >= 0.0 && max.is_finite() {
        Ok(())
    } else {
        Err(SimError::Domain(format!(
            "uniform upper bound must be non-negative and finite, got {}",
            max
        )))
    }
}

// =========================================================================
// 1. Generator-backed variates
// =========================================================================

/// Draws variates from any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngVariates<R> {
    rng: R,
}

impl<R: Rng> RngVariates<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngVariates<ChaCha8Rng> {
    /// Reproducible stream: the same seed always yields the same draws.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng + Debug + Send> VariateSource for RngVariates<R> {
    fn exponential(&mut self, rate: f64) -> SimResult<f64> {
        check_rate(rate)?;
        let exp = Exp::new(rate).map_err(|e| SimError::Domain(e.to_string()))?;
        Ok(exp.sample(&mut self.rng))
    }

    fn uniform(&mut self, max: f64) -> SimResult<f64> {
        check_upper_bound(max)?;
        Ok(self.rng.gen_range(0.0..=max))
    }
}

// =========================================================================
// 2. Scripted variates
// =========================================================================

/// Replays a fixed sequence of draws, in order, whatever the distribution asked for.
///
/// Domain checks still apply, so a scripted run fails exactly where a random one would.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVariates {
    values: VecDeque<f64>,
}

impl ScriptedVariates {
    pub fn new<I: IntoIterator<Item = f64>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of draws not consumed yet.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }

    fn next_value(&mut self) -> SimResult<f64> {
        self.values.pop_front().ok_or(SimError::StreamExhausted)
    }
}

impl VariateSource for ScriptedVariates {
    fn exponential(&mut self, rate: f64) -> SimResult<f64> {
        check_rate(rate)?;
        self.next_value()
    }

    fn uniform(&mut self, max: f64) -> SimResult<f64> {
        check_upper_bound(max)?;
        self.next_value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exponential_rejects_non_positive_rates() {
        let mut variates = RngVariates::seeded(1);
        for rate in [0.0, -1.5, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                variates.exponential(rate),
                Err(SimError::Domain(_))
            ));
        }
    }

    #[test]
    fn uniform_stays_within_bounds() {
        let mut variates = RngVariates::seeded(7);
        for _ in 0..1_000 {
            let value = variates.uniform(50.0).unwrap();
            assert!((0.0..=50.0).contains(&value));
        }
        assert_eq!(variates.uniform(0.0).unwrap(), 0.0);
        assert!(variates.uniform(-1.0).is_err());
    }

    #[test]
    fn exponential_mean_matches_rate() {
        let mut variates = RngVariates::seeded(42);
        let n = 20_000;
        let total: f64 = (0..n).map(|_| variates.exponential(2.0).unwrap()).sum();
        let mean = total / n as f64;
        assert!((mean - 0.5).abs() < 0.02, "mean was {}", mean);
    }

    #[test]
    fn same_seed_same_stream() {
        let mut a = RngVariates::seeded(99);
        let mut b = RngVariates::seeded(99);
        for _ in 0..100 {
            assert_eq!(a.exponential(1.5).unwrap(), b.exponential(1.5).unwrap());
            assert_eq!(a.uniform(10.0).unwrap(), b.uniform(10.0).unwrap());
        }
    }

    #[test]
    fn scripted_replays_then_runs_out() {
        let mut variates = ScriptedVariates::new([1.0, 2.0]);
        assert_eq!(variates.exponential(3.0).unwrap(), 1.0);
        assert_eq!(variates.uniform(5.0).unwrap(), 2.0);
        assert_eq!(variates.remaining(), 0);
        assert!(matches!(
            variates.exponential(3.0),
            Err(SimError::StreamExhausted)
        ));
    }

    #[test]
    fn scripted_still_checks_domain() {
        let mut variates = ScriptedVariates::new([1.0]);
        assert!(matches!(variates.exponential(0.0), Err(SimError::Domain(_))));
        // the rejected draw must not consume the script
        assert_eq!(variates.remaining(), 1);
    }
}
