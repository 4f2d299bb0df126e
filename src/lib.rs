//! Exact 64-bit fractions, matrices of fractions, and continued fraction approximation
//! of floating point values.
//!
//! ```
//! use num_fraction::{ApproxConfig, Fraction, Matrix};
//!
//! let a = Fraction::new(100, 57).unwrap();
//! let b = Fraction::new(92, 11).unwrap();
//! assert_eq!((a + b).to_string(), "6344/627");
//!
//! let third = Fraction::from_f64_approx(0.3333, &ApproxConfig::default().with_eps(1e-3)).unwrap();
//! assert_eq!(third.to_string(), "1/3");
//!
//! let m = Matrix::from_rows(vec![vec![a, b]]).unwrap();
//! assert_eq!(m.transpose().shape(), (2, 1));
//! ```

mod cont_frac;
mod config;
mod errors;
mod fraction;
mod matrix;
pub mod traits;

pub use cont_frac::{ContinuedFraction, Convergents};
pub use config::{ApproxConfig, DEFAULT_EPS, DEFAULT_MAX_ITERATIONS};
pub use errors::FractionError;
pub use fraction::{gcd, Fraction, Sign};
pub use matrix::Matrix;
pub use traits::{Approximation, RationalApproximation};
