use crate::config::ApproxConfig;
use crate::errors::FractionError;
use crate::fraction::Fraction;

/// Result of a conversion that may lose precision
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Approximation<T> {
    /// The conversion was cut short (iteration cap or 64-bit range)
    Approximated(T),
    /// The conversion terminated within its tolerance. For a float this means the
    /// expansion converged under `eps`, e.g. pi with `eps = 0.01` gives `Exact(355/113)`;
    /// it does not mean the input is rational.
    Exact(T),
}

impl<T> Approximation<T> {
    /// Get the wrapped value, regardless of its exactness
    #[inline]
    pub fn value(self) -> T {
        match self {
            Approximation::Approximated(v) => v,
            Approximation::Exact(v) => v,
        }
    }

    #[inline]
    pub fn is_exact(&self) -> bool {
        matches!(self, Approximation::Exact(_))
    }
}

/// Approximate a (typically floating point) number by a [Fraction]
pub trait RationalApproximation {
    /// Return the rational approximation of the number under the given tolerance and
    /// iteration budget. `Exact` means the expansion terminated within the tolerance.
    fn approx_rational(&self, config: &ApproxConfig)
        -> Result<Approximation<Fraction>, FractionError>;
}

impl RationalApproximation for f64 {
    #[inline]
    fn approx_rational(
        &self,
        config: &ApproxConfig,
    ) -> Result<Approximation<Fraction>, FractionError> {
        Fraction::approximate(*self, config)
    }
}

impl RationalApproximation for f32 {
    #[inline]
    fn approx_rational(
        &self,
        config: &ApproxConfig,
    ) -> Result<Approximation<Fraction>, FractionError> {
        Fraction::approximate(*self as f64, config)
    }
}
