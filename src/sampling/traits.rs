// src/sampling/traits.rs

use crate::error::SimResult;
use std::fmt::Debug;

/// Source of the random variates consumed by the checkout simulation.
///
/// Every run owns exactly one source, so two runs never share a stream.
/// We require `Send` so independent runs can be moved to other threads.
pub trait VariateSource: Debug + Send {
    /// Samples an exponential distribution with the given `rate` (events per minute).
    ///
    /// Fails with `SimError::Domain` when `rate` is not strictly positive and finite.
    fn exponential(&mut self, rate: f64) -> SimResult<f64>;

    /// Samples a uniform value in `[0, max]`.
    ///
    /// Fails with `SimError::Domain` when `max` is negative or not finite.
    fn uniform(&mut self, max: f64) -> SimResult<f64>;
}
