//! Parameters of the float to fraction approximation.

use crate::errors::FractionError;

/// Default tolerance used to decide that a remainder is zero
pub const DEFAULT_EPS: f64 = 0.0001;

/// Default bound on the number of partial quotients computed after the integer part
pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Tolerance and iteration budget of the continued fraction expansion of a float.
///
/// `eps` is added before taking the floor of each term (so values within `eps` below an
/// integer snap to it) and is the threshold under which a remainder counts as zero.
/// `max_iterations` bounds the number of reciprocal steps, which in turn bounds
/// the denominator of the result for irrational inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApproxConfig {
    pub eps: f64,
    pub max_iterations: usize,
}

impl ApproxConfig {
    /// Settings used by [Matrix::random_double][crate::Matrix::random_double]
    pub const RANDOM_DOUBLE: ApproxConfig = ApproxConfig {
        eps: 0.0001,
        max_iterations: 10,
    };

    #[inline]
    pub const fn new(eps: f64, max_iterations: usize) -> Self {
        ApproxConfig {
            eps,
            max_iterations,
        }
    }

    #[inline]
    pub fn with_eps(self, eps: f64) -> Self {
        ApproxConfig { eps, ..self }
    }

    #[inline]
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        ApproxConfig {
            max_iterations,
            ..self
        }
    }

    /// Check that the tolerance is positive and finite and the iteration cap is non-zero
    pub fn validate(&self) -> Result<(), FractionError> {
        if !(self.eps > 0.) || !self.eps.is_finite() {
            return Err(FractionError::InvalidArgument(
                "tolerance must be positive and finite",
            ));
        }
        if self.max_iterations == 0 {
            return Err(FractionError::InvalidArgument(
                "iteration cap must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ApproxConfig {
    fn default() -> Self {
        ApproxConfig::new(DEFAULT_EPS, DEFAULT_MAX_ITERATIONS)
    }
}
