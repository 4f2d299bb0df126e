//! Implementation of the 64-bit signed fraction
//!
//! A [Fraction] is stored as a sign and two unsigned magnitudes in lowest terms. All
//! arithmetic is carried out on 128-bit intermediates and narrowed back afterwards, so
//! a result that does not fit is reported as [FractionError::Overflow] rather than wrapped.

mod ops;

use crate::cont_frac::ContinuedFraction;
use crate::config::ApproxConfig;
use crate::errors::FractionError;
use crate::traits::Approximation;
use core::cmp::Ordering;
use core::convert::TryFrom;
use core::ops::{Mul, Neg};
use core::str::FromStr;
use num_integer::Integer;
use num_rational::Ratio;
use num_traits::{FromPrimitive, One, ToPrimitive, Unsigned, Zero};
use std::fmt;

/// Sign of a [Fraction]. Only the canonical zero carries [Sign::Zero]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Minus,
    Zero,
    Plus,
}

impl Sign {
    /// Sign of any number that can be compared against zero
    #[inline]
    pub fn of<T: Zero + PartialOrd>(v: &T) -> Sign {
        let zero = T::zero();
        if v < &zero {
            Sign::Minus
        } else if v > &zero {
            Sign::Plus
        } else {
            Sign::Zero
        }
    }

    #[inline]
    pub fn to_i8(self) -> i8 {
        match self {
            Sign::Minus => -1,
            Sign::Zero => 0,
            Sign::Plus => 1,
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Sign::Minus => Sign::Plus,
            Sign::Zero => Sign::Zero,
            Sign::Plus => Sign::Minus,
        }
    }
}

impl Mul for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (l, r) if l == r => Sign::Plus,
            _ => Sign::Minus,
        }
    }
}

/// Greatest common divisor of two unsigned integers.
///
/// The larger operand is repeatedly reduced modulo the smaller one until one of them
/// reaches zero; the remaining one is the result. `gcd(0, n) == n` and `gcd(0, 0) == 0`.
pub fn gcd<T: Integer + Unsigned + Copy>(mut a: T, mut b: T) -> T {
    while !a.is_zero() && !b.is_zero() {
        if a > b {
            a = a % b;
        } else {
            b = b % a;
        }
    }
    a + b
}

// magnitude of i64::MIN, the largest magnitude a negative numerator may have
const NEG_NUMER_LIMIT: u128 = 1 << 63;
const POS_NUMER_LIMIT: u128 = i64::MAX as u128;

/// An exact fraction `numer / denom` with a signed 64-bit numerator and an unsigned
/// 64-bit denominator, always kept in lowest terms.
///
/// Invariants:
/// - the denominator is never zero
/// - zero is represented as `0/1` with [Sign::Zero]
/// - numerator and denominator magnitudes are coprime
/// - the signed numerator fits in `i64`
///
/// Values are immutable: every operation returns a new fraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    sign: Sign,
    numer: u64, // magnitude of the numerator
    denom: u64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction::new_raw(Sign::Zero, 0, 1);
    pub const ONE: Fraction = Fraction::new_raw(Sign::Plus, 1, 1);

    #[inline]
    pub(crate) const fn new_raw(sign: Sign, numer: u64, denom: u64) -> Self {
        Fraction { sign, numer, denom }
    }

    /// Create a fraction from a signed numerator and denominator, reducing it to lowest terms.
    ///
    /// The sign of the result is the product of the signs of both arguments. A zero
    /// numerator gives the canonical zero whatever the (non-zero) denominator is.
    pub fn new(numer: i64, denom: i64) -> Result<Self, FractionError> {
        let numer = if denom < 0 {
            -(numer as i128)
        } else {
            numer as i128
        };
        Self::reduce_wide(numer, denom.unsigned_abs() as u128)
    }

    /// Create the integral fraction `n/1`
    #[inline]
    pub fn from_integer(n: i64) -> Self {
        Fraction::new_raw(Sign::of(&n), n.unsigned_abs(), 1)
    }

    /// Build a fraction from a wide signed numerator and an unsigned denominator
    pub(crate) fn reduce_wide(numer: i128, denom: u128) -> Result<Self, FractionError> {
        Self::reduce_parts(Sign::of(&numer), numer.unsigned_abs(), denom)
    }

    /// Build a fraction from a sign and two wide magnitudes
    pub(crate) fn reduce_parts(sign: Sign, numer: u128, denom: u128) -> Result<Self, FractionError> {
        if denom.is_zero() {
            return Err(FractionError::DivisionByZero);
        }
        if numer.is_zero() || sign == Sign::Zero {
            return Ok(Self::ZERO);
        }

        let g = gcd(numer, denom);
        let (numer, denom) = (numer / g, denom / g);

        let limit = if sign == Sign::Minus {
            NEG_NUMER_LIMIT
        } else {
            POS_NUMER_LIMIT
        };
        if numer > limit || denom > u64::MAX as u128 {
            return Err(FractionError::Overflow);
        }
        Ok(Fraction::new_raw(sign, numer as u64, denom as u64))
    }

    /// Approximate a float with a continued fraction expansion.
    ///
    /// The expansion stops once a remainder is within `config.eps` of zero (the result is
    /// [Approximation::Exact], meaning converged within tolerance, not equal to `value`),
    /// or when `config.max_iterations` reciprocal steps have been
    /// taken or the next convergent would leave the 64-bit range (the result is the last
    /// convergent, as [Approximation::Approximated]). A value within `eps` of an integer
    /// gives that integer.
    pub fn approximate(
        value: f64,
        config: &ApproxConfig,
    ) -> Result<Approximation<Fraction>, FractionError> {
        match ContinuedFraction::expand_f64(value, config)? {
            Approximation::Exact(cf) => cf.to_fraction(),
            Approximation::Approximated(cf) => {
                cf.to_fraction().map(|f| Approximation::Approximated(f.value()))
            }
        }
    }

    /// Same as [Fraction::approximate] without the exactness flag
    #[inline]
    pub fn from_f64_approx(value: f64, config: &ApproxConfig) -> Result<Self, FractionError> {
        Self::approximate(value, config).map(Approximation::value)
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// The signed numerator
    #[inline]
    pub fn numer(&self) -> i64 {
        match self.sign {
            Sign::Minus => (self.numer as i64).wrapping_neg(), // magnitude 2^63 maps to i64::MIN
            Sign::Zero => 0,
            Sign::Plus => self.numer as i64,
        }
    }

    #[inline]
    pub(crate) fn numer_wide(&self) -> i128 {
        self.numer as i128 * self.sign.to_i8() as i128
    }

    #[inline]
    pub fn unsigned_numer(&self) -> u64 {
        self.numer
    }

    #[inline]
    pub fn denom(&self) -> u64 {
        self.denom
    }

    /// Numerator of the fractional part of the mixed number, always non-negative
    #[inline]
    pub fn proper_numer(&self) -> u64 {
        self.numer % self.denom
    }

    /// Integer part of the mixed number, truncated toward zero
    #[inline]
    pub fn whole_number(&self) -> i64 {
        (self.numer_wide() / self.denom as i128) as i64
    }

    #[inline]
    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64 * self.sign.to_i8() as f64
    }

    /// Round to the nearest integer, ties go to the even neighbour
    pub fn to_integer_rounded(&self) -> i64 {
        let whole = self.whole_number();
        let twice_rem = 2 * self.proper_numer() as u128;
        let away = match twice_rem.cmp(&(self.denom as u128)) {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => whole.is_odd(),
        };
        match (away, self.sign) {
            (false, _) | (_, Sign::Zero) => whole,
            (true, Sign::Plus) => whole + 1,
            (true, Sign::Minus) => whole - 1,
        }
    }

    #[inline]
    pub fn is_integer(&self) -> bool {
        self.denom == 1
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign == Sign::Plus
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Sign::Minus
    }

    /// Absolute value. Fails only for `i64::MIN / d`
    pub fn abs(&self) -> Result<Self, FractionError> {
        match self.sign {
            Sign::Minus => Self::reduce_parts(Sign::Plus, self.numer as u128, self.denom as u128),
            _ => Ok(*self),
        }
    }

    /// The reciprocal `denom / numer`, keeping the sign
    pub fn recip(&self) -> Result<Self, FractionError> {
        if self.sign == Sign::Zero {
            return Err(FractionError::DivisionByZero);
        }
        Self::reduce_parts(self.sign, self.denom as u128, self.numer as u128)
    }

    /// Return a fraction with the numerator replaced.
    ///
    /// A zero numerator gives the canonical zero. Otherwise the current sign is kept
    /// (or becomes positive when the fraction was zero) and flipped when `numer` is
    /// negative, then the result is reduced against the current denominator.
    pub fn with_numer(&self, numer: i64) -> Result<Self, FractionError> {
        if numer == 0 {
            return Ok(Self::ZERO);
        }
        let mut sign = match self.sign {
            Sign::Zero => Sign::Plus,
            s => s,
        };
        if numer < 0 {
            sign = -sign;
        }
        Self::reduce_parts(sign, numer.unsigned_abs() as u128, self.denom as u128)
    }

    /// Return a fraction with the denominator replaced.
    ///
    /// A negative denominator flips the sign; zero fails with
    /// [FractionError::DivisionByZero]. The zero fraction stays the canonical zero.
    pub fn with_denom(&self, denom: i64) -> Result<Self, FractionError> {
        if denom == 0 {
            return Err(FractionError::DivisionByZero);
        }
        let sign = if denom < 0 { -self.sign } else { self.sign };
        Self::reduce_parts(sign, self.numer as u128, denom.unsigned_abs() as u128)
    }

    pub fn try_add(self, rhs: Self) -> Result<Self, FractionError> {
        let lhs_n = self.numer_wide() * rhs.denom as i128;
        let rhs_n = rhs.numer_wide() * self.denom as i128;
        let numer = lhs_n.checked_add(rhs_n).ok_or(FractionError::Overflow)?;
        Self::reduce_wide(numer, self.denom as u128 * rhs.denom as u128)
    }

    pub fn try_sub(self, rhs: Self) -> Result<Self, FractionError> {
        let lhs_n = self.numer_wide() * rhs.denom as i128;
        let rhs_n = rhs.numer_wide() * self.denom as i128;
        let numer = lhs_n.checked_sub(rhs_n).ok_or(FractionError::Overflow)?;
        Self::reduce_wide(numer, self.denom as u128 * rhs.denom as u128)
    }

    pub fn try_mul(self, rhs: Self) -> Result<Self, FractionError> {
        Self::reduce_parts(
            self.sign * rhs.sign,
            self.numer as u128 * rhs.numer as u128,
            self.denom as u128 * rhs.denom as u128,
        )
    }

    /// Division, equivalent to multiplying by the reciprocal of `rhs`
    pub fn try_div(self, rhs: Self) -> Result<Self, FractionError> {
        if rhs.sign == Sign::Zero {
            return Err(FractionError::DivisionByZero);
        }
        Self::reduce_parts(
            self.sign * rhs.sign,
            self.numer as u128 * rhs.denom as u128,
            self.denom as u128 * rhs.numer as u128,
        )
    }

    pub fn try_neg(self) -> Result<Self, FractionError> {
        Self::reduce_parts(-self.sign, self.numer as u128, self.denom as u128)
    }
}

impl Default for Fraction {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for Fraction {
    #[inline]
    fn from(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl TryFrom<Ratio<i64>> for Fraction {
    type Error = FractionError;

    #[inline]
    fn try_from(r: Ratio<i64>) -> Result<Self, FractionError> {
        Fraction::new(*r.numer(), *r.denom())
    }
}

impl From<Fraction> for Ratio<i128> {
    /// Lossless conversion, the fraction is already reduced
    #[inline]
    fn from(f: Fraction) -> Self {
        Ratio::new_raw(f.numer_wide(), f.denom as i128)
    }
}

impl PartialOrd for Fraction {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        // |numer| <= 2^63 and denom < 2^64, so the products fit in i128
        let lhs = self.numer_wide() * other.denom as i128;
        let rhs = other.numer_wide() * self.denom as i128;
        lhs.cmp(&rhs)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.sign, self.denom) {
            (Sign::Zero, _) => write!(f, "0"),
            (_, 1) => write!(f, "{}", self.numer()),
            _ => write!(f, "{}/{}", self.numer(), self.denom),
        }
    }
}

impl FromStr for Fraction {
    type Err = FractionError;

    /// Parse the textual form produced by [Display][fmt::Display], e.g. `"-3/4"` or `"7"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const MALFORMED: FractionError = FractionError::InvalidArgument("malformed fraction");

        let mut parts = s.trim().splitn(2, '/');
        let numer = parts
            .next()
            .and_then(|n| n.trim().parse::<i64>().ok())
            .ok_or(MALFORMED)?;
        match parts.next() {
            Some(d) => {
                let denom = d.trim().parse::<i64>().map_err(|_| MALFORMED)?;
                Fraction::new(numer, denom)
            }
            None => Ok(Fraction::from_integer(numer)),
        }
    }
}

impl Zero for Fraction {
    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.sign == Sign::Zero
    }
}

impl One for Fraction {
    #[inline]
    fn one() -> Self {
        Self::ONE
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}

impl ToPrimitive for Fraction {
    /// Truncated integer part
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        Some(self.whole_number())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.whole_number().to_u64()
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(Fraction::to_f64(self))
    }
}

impl FromPrimitive for Fraction {
    #[inline]
    fn from_i64(n: i64) -> Option<Self> {
        Some(Self::from_integer(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<Self> {
        Self::reduce_parts(Sign::of(&n), n as u128, 1).ok()
    }

    /// Approximated with the default [ApproxConfig]
    #[inline]
    fn from_f64(f: f64) -> Option<Self> {
        Self::from_f64_approx(f, &ApproxConfig::default()).ok()
    }
}
