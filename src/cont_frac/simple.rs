//! Implementation of simple continued fractions

use super::block::Block;
use crate::config::ApproxConfig;
use crate::errors::FractionError;
use crate::fraction::{Fraction, Sign};
use crate::traits::Approximation;
use num_integer::Integer;
use num_traits::ToPrimitive;
use std::fmt;
use tracing::{debug, trace};

/// This struct represents a finite simple continued fraction `a0 + 1/(a1 + 1/(a2 + ...))`
/// where a0 is a non-negative integer and a1, a2, .. are positive integers.
/// The sign applies to the whole expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContinuedFraction {
    /// Partial quotients
    coeffs: Vec<u64>,

    /// Sign of the fraction
    negative: bool,
}

impl ContinuedFraction {
    /// Create a continued fraction from its partial quotients
    pub fn new(coeffs: Vec<u64>, negative: bool) -> Result<Self, FractionError> {
        if coeffs.is_empty() {
            return Err(FractionError::InvalidArgument(
                "at least one coefficient is required",
            ));
        }
        if coeffs.iter().skip(1).any(|a| *a == 0) {
            return Err(FractionError::InvalidArgument(
                "only the first coefficient can be zero",
            ));
        }

        let is_zero = coeffs.len() == 1 && coeffs[0] == 0;
        Ok(ContinuedFraction {
            coeffs,
            negative: negative && !is_zero,
        })
    }

    #[inline]
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs[..]
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns an iterator of the convergents. The iterator stops when all
    /// coefficients are consumed, or when the next convergent leaves the range of [Fraction].
    pub fn convergents(&self) -> Convergents<'_> {
        Convergents {
            coeffs: self.coeffs.iter(),
            block: Block::identity(),
            sign: if self.negative {
                Sign::Minus
            } else {
                Sign::Plus
            },
        }
    }

    /// Evaluate the continued fraction. The result is [Approximation::Approximated] when
    /// the full expansion does not fit in a [Fraction] and a shorter convergent is returned.
    pub fn to_fraction(&self) -> Result<Approximation<Fraction>, FractionError> {
        let mut count = 0;
        let mut last = None;
        for conv in self.convergents() {
            count += 1;
            last = Some(conv);
        }

        match last {
            None => Err(FractionError::Overflow),
            Some(f) if count == self.coeffs.len() => Ok(Approximation::Exact(f)),
            Some(f) => {
                debug!(
                    used = count,
                    total = self.coeffs.len(),
                    "convergent truncated to fit in 64 bits"
                );
                Ok(Approximation::Approximated(f))
            }
        }
    }

    /// Expand a float into a continued fraction.
    ///
    /// Each term is `floor(x + eps)` of the current value `x`, and the remainder
    /// `|x - term|` is inverted for the next step while it exceeds `eps`. At most
    /// `config.max_iterations` inversions are made. The expansion is
    /// [Approximation::Exact] if it ended because the remainder fell within `eps`, which
    /// says nothing about `value` itself being rational.
    pub fn expand_f64(
        value: f64,
        config: &ApproxConfig,
    ) -> Result<Approximation<Self>, FractionError> {
        config.validate()?;
        if !value.is_finite() {
            return Err(FractionError::InvalidArgument("value must be finite"));
        }

        let eps = config.eps;
        let negative = value < 0.;
        let abs = value.abs();

        // a value within eps below an integer rounds up to it (0.99999 gives 1, not 0)
        let whole = (abs + eps).floor();
        let a0 = whole.to_i64().ok_or(FractionError::Overflow)? as u64;
        let mut coeffs = vec![a0];
        let mut remainder = (abs - whole).abs();
        let mut exact = true;

        while remainder > eps {
            if coeffs.len() > config.max_iterations {
                debug!(
                    value,
                    max_iterations = config.max_iterations,
                    remainder,
                    "iteration cap reached"
                );
                exact = false;
                break;
            }

            let recip = remainder.recip();
            let whole = (recip + eps).floor();
            let a = match whole.to_u64() {
                Some(a) => a,
                None => {
                    debug!(value, quotient = whole, "partial quotient out of range");
                    exact = false;
                    break;
                }
            };
            coeffs.push(a);
            remainder = (recip - whole).abs();
            trace!(step = coeffs.len() - 1, quotient = a, remainder);
        }

        let is_zero = coeffs.len() == 1 && a0 == 0;
        let cf = ContinuedFraction {
            coeffs,
            negative: negative && !is_zero,
        };
        Ok(if exact {
            Approximation::Exact(cf)
        } else {
            Approximation::Approximated(cf)
        })
    }
}

/// Iterator of convergents of a [ContinuedFraction]
#[derive(Debug, Clone)]
pub struct Convergents<'a> {
    coeffs: std::slice::Iter<'a, u64>,
    block: Block<u64>,
    sign: Sign,
}

const NO_COEFFS: &[u64] = &[];

impl<'a> Iterator for Convergents<'a> {
    type Item = Fraction;

    fn next(&mut self) -> Option<Fraction> {
        let a = *self.coeffs.next()?;
        let sign = self.sign;
        let next = self.block.checked_rmove(a).and_then(|(p, q)| {
            Fraction::reduce_parts(sign, p as u128, q as u128)
                .ok()
                .map(|f| (p, q, f))
        });

        match next {
            Some((p, q, f)) => {
                self.block.update(p, q);
                Some(f)
            }
            None => {
                // stop for good once a convergent overflows
                self.coeffs = NO_COEFFS.iter();
                None
            }
        }
    }
}

impl From<Fraction> for ContinuedFraction {
    /// Exact expansion with the euclidean algorithm
    fn from(f: Fraction) -> Self {
        let mut coeffs = Vec::new();
        let (mut n, mut d) = (f.unsigned_numer(), f.denom());
        while d != 0 {
            let (quo, rem) = n.div_rem(&d);
            coeffs.push(quo);
            n = d;
            d = rem;
        }

        ContinuedFraction {
            coeffs,
            negative: f.is_negative(),
        }
    }
}

impl fmt::Display for ContinuedFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }

        write!(f, "[{}", self.coeffs[0])?;
        let mut iter = self.coeffs.iter().skip(1);
        if let Some(v) = iter.next() {
            write!(f, "; {}", v)?;
            for v in iter {
                write!(f, ", {}", v)?;
            }
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::gcd;
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;
    use std::f64::consts::{PI, SQRT_2};

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn approx(v: f64, eps: f64, max_iterations: usize) -> Approximation<Fraction> {
        Fraction::approximate(v, &ApproxConfig::new(eps, max_iterations)).unwrap()
    }

    #[test]
    fn cont_frac_creation_test() {
        let cf = ContinuedFraction::new(vec![3, 7, 16], false).unwrap();
        assert_eq!(cf.coeffs(), &[3, 7, 16]);
        assert!(!cf.is_integer());

        let zero = ContinuedFraction::new(vec![0], true).unwrap();
        assert!(!zero.is_negative());
        assert!(zero.is_integer());

        assert!(matches!(
            ContinuedFraction::new(vec![], false),
            Err(FractionError::InvalidArgument(_))
        ));
        assert!(matches!(
            ContinuedFraction::new(vec![1, 0, 2], false),
            Err(FractionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn cont_frac_iter_test() {
        let cf = ContinuedFraction::new(vec![3, 7, 15, 1], false).unwrap();
        assert_eq!(
            cf.convergents().collect::<Vec<_>>(),
            vec![
                Fraction::from_integer(3),
                frac(22, 7),
                frac(333, 106),
                frac(355, 113)
            ]
        );

        let n_cf = ContinuedFraction::new(vec![0, 1, 3], true).unwrap();
        assert_eq!(
            n_cf.convergents().collect::<Vec<_>>(),
            vec![Fraction::ZERO, frac(-1, 1), frac(-3, 4)]
        );

        // 2^62 * 3 overflows the i64 numerator, the iterator stops there
        let big = ContinuedFraction::new(vec![1 << 62, 3, 5], false).unwrap();
        let mut convergents = big.convergents();
        assert_eq!(convergents.next(), Some(Fraction::from_integer(1 << 62)));
        assert_eq!(convergents.next(), None);
        assert_eq!(convergents.next(), None);
        assert_eq!(
            big.to_fraction(),
            Ok(Approximation::Approximated(Fraction::from_integer(1 << 62)))
        );
    }

    #[test]
    fn cont_frac_conversion_test() {
        assert_eq!(
            ContinuedFraction::from(Fraction::from_integer(3)),
            ContinuedFraction::new(vec![3], false).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(frac(22, 7)),
            ContinuedFraction::new(vec![3, 7], false).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(frac(-22, 7)),
            ContinuedFraction::new(vec![3, 7], true).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(frac(7, 22)),
            ContinuedFraction::new(vec![0, 3, 7], false).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(frac(-7, 22)),
            ContinuedFraction::new(vec![0, 3, 7], true).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(frac(355, 113)),
            ContinuedFraction::new(vec![3, 7, 16], false).unwrap()
        );
        assert_eq!(
            ContinuedFraction::from(Fraction::ZERO),
            ContinuedFraction::new(vec![0], false).unwrap()
        );
    }

    #[test]
    fn fmt_test() {
        let fmt = |coeffs: Vec<u64>, negative| {
            format!("{}", ContinuedFraction::new(coeffs, negative).unwrap())
        };
        assert_eq!(fmt(vec![1], false), "[1]");
        assert_eq!(fmt(vec![1, 2, 3], false), "[1; 2, 3]");
        assert_eq!(fmt(vec![0, 3, 7], true), "-[0; 3, 7]");
        assert_eq!(fmt(vec![4, 2], false), "[4; 2]");
    }

    #[test]
    fn expansion_test() {
        let cfg = ApproxConfig::default();
        let cf = ContinuedFraction::expand_f64(0.75, &cfg).unwrap();
        assert!(cf.is_exact());
        assert_eq!(cf.value().coeffs(), &[0, 1, 3]);

        let cf = ContinuedFraction::expand_f64(-2.5, &cfg).unwrap().value();
        assert_eq!(cf.coeffs(), &[2, 2]);
        assert!(cf.is_negative());

        let cf = ContinuedFraction::expand_f64(-0.00001, &cfg).unwrap().value();
        assert_eq!(cf.coeffs(), &[0]);
        assert!(!cf.is_negative());
    }

    #[test]
    fn approximation_test() {
        let cfg = ApproxConfig::default();
        assert_eq!(Fraction::from_f64_approx(0., &cfg), Ok(Fraction::ZERO));
        assert_eq!(Fraction::from_f64_approx(-0., &cfg), Ok(Fraction::ZERO));
        assert_eq!(Fraction::from_f64_approx(0.5, &cfg), Ok(frac(1, 2)));
        assert_eq!(Fraction::from_f64_approx(-0.125, &cfg), Ok(frac(-1, 8)));
        assert_eq!(Fraction::from_f64_approx(1. / 3., &cfg), Ok(frac(1, 3)));
        assert_eq!(Fraction::from_f64_approx(-7. / 3., &cfg), Ok(frac(-7, 3)));

        // within eps of an integer
        assert_eq!(approx(3.00001, 1e-4, 20), Approximation::Exact(Fraction::from_integer(3)));
        assert_eq!(approx(-2.99995, 1e-4, 20), Approximation::Exact(Fraction::from_integer(-3)));
        assert_eq!(approx(1e12, 1e-4, 20), Approximation::Exact(Fraction::from_integer(1_000_000_000_000)));
        assert_eq!(approx(0.99999, 1e-4, 20), Approximation::Exact(Fraction::ONE));
        // a tighter tolerance resolves the same value
        assert_eq!(approx(0.99999, 5e-6, 20), Approximation::Exact(frac(99999, 100000)));
        assert_eq!(approx(0.99999, 5e-6, 20).value().to_string(), "99999/100000");
    }

    #[test]
    fn irrational_test() {
        // [1; 2, 2, 2, 2, 2] after five steps
        let sq2 = approx(SQRT_2, 1e-12, 5);
        assert_eq!(sq2, Approximation::Approximated(frac(99, 70)));

        // 1/0.0625133 = 15.9966 snaps to 16 with eps = 0.01
        let loose = approx(PI, 0.01, 5);
        assert_eq!(loose, Approximation::Exact(frac(355, 113)));

        let err = |a: Approximation<Fraction>| (a.value().to_f64() - PI).abs();
        let e_loose = err(loose);
        let e_tight_eps = err(approx(PI, 1e-6, 5));
        let e_more_iter = err(approx(PI, 0.01, 20));
        let e_tight = err(approx(PI, 1e-6, 20));
        assert!(e_loose < 3e-7);
        assert!(e_tight_eps <= e_loose);
        assert!(e_more_iter <= e_loose);
        assert!(e_tight <= e_loose);
        assert!(e_tight < 1e-9);

        // tiny tolerance and a large budget stop at the 64-bit range
        let far = approx(PI, 1e-300, 1000).value();
        assert!((far.to_f64() - PI).abs() < 1e-12);
    }

    #[test]
    fn invalid_input_test() {
        let cfg = ApproxConfig::default();
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY].iter() {
            assert!(matches!(
                Fraction::from_f64_approx(*v, &cfg),
                Err(FractionError::InvalidArgument(_))
            ));
        }
        assert!(matches!(
            Fraction::from_f64_approx(0.5, &ApproxConfig::new(0., 20)),
            Err(FractionError::InvalidArgument(_))
        ));
        assert!(matches!(
            Fraction::from_f64_approx(0.5, &ApproxConfig::new(1e-4, 0)),
            Err(FractionError::InvalidArgument(_))
        ));
        assert_eq!(
            Fraction::from_f64_approx(1e30, &cfg),
            Err(FractionError::Overflow)
        );
    }

    #[test]
    fn exact_rational_round_trip() {
        let cfg = ApproxConfig::new(0.0001, 15);
        for p in -1000i64..=1000 {
            for q in 1i64..=1000 {
                if gcd(p.unsigned_abs(), q as u64) != 1 {
                    continue;
                }
                let f = Fraction::approximate(p as f64 / q as f64, &cfg).unwrap();
                assert_eq!(f, Approximation::Exact(frac(p, q)), "{}/{}", p, q);
            }
        }
    }

    #[quickcheck]
    fn expansion_of_fraction_is_exact(n: i32, d: i32) -> TestResult {
        if d == 0 {
            return TestResult::discard();
        }
        let f = frac(n as i64, d as i64);
        let cf = ContinuedFraction::from(f);
        TestResult::from_bool(cf.to_fraction() == Ok(Approximation::Exact(f)))
    }
}
