//! Operator overloads of [Fraction].
//!
//! Operators panic where the `try_*` methods return an error (division by zero,
//! results outside the 64-bit range). Scalars are promoted to a fraction first: integers
//! exactly, floats through the default [ApproxConfig].

use super::Fraction;
use crate::config::ApproxConfig;
use crate::errors::FractionError;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedNeg, CheckedSub};

#[inline]
fn unwrap_op(result: Result<Fraction, FractionError>) -> Fraction {
    match result {
        Ok(v) => v,
        Err(e) => panic!("fraction arithmetic failed: {}", e),
    }
}

#[inline]
fn promote_f64(v: f64) -> Fraction {
    unwrap_op(Fraction::from_f64_approx(v, &ApproxConfig::default()))
}

impl Neg for Fraction {
    type Output = Fraction;

    #[inline]
    fn neg(self) -> Fraction {
        unwrap_op(self.try_neg())
    }
}

macro_rules! arith_impl {
    (impl $imp:ident, $method:ident, $try_method:ident, $imp_assign:ident, $method_assign:ident) => {
        impl $imp<Fraction> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $method(self, rhs: Fraction) -> Fraction {
                unwrap_op(self.$try_method(rhs))
            }
        }

        impl $imp<i64> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $method(self, rhs: i64) -> Fraction {
                unwrap_op(self.$try_method(Fraction::from_integer(rhs)))
            }
        }

        impl $imp<Fraction> for i64 {
            type Output = Fraction;

            #[inline]
            fn $method(self, rhs: Fraction) -> Fraction {
                unwrap_op(Fraction::from_integer(self).$try_method(rhs))
            }
        }

        impl $imp<f64> for Fraction {
            type Output = Fraction;

            #[inline]
            fn $method(self, rhs: f64) -> Fraction {
                unwrap_op(self.$try_method(promote_f64(rhs)))
            }
        }

        impl $imp<Fraction> for f64 {
            type Output = Fraction;

            #[inline]
            fn $method(self, rhs: Fraction) -> Fraction {
                unwrap_op(promote_f64(self).$try_method(rhs))
            }
        }

        impl $imp_assign<Fraction> for Fraction {
            #[inline]
            fn $method_assign(&mut self, rhs: Fraction) {
                *self = unwrap_op(self.$try_method(rhs));
            }
        }

        impl $imp_assign<i64> for Fraction {
            #[inline]
            fn $method_assign(&mut self, rhs: i64) {
                *self = unwrap_op(self.$try_method(Fraction::from_integer(rhs)));
            }
        }
    };
}

arith_impl!(impl Add, add, try_add, AddAssign, add_assign);
arith_impl!(impl Sub, sub, try_sub, SubAssign, sub_assign);
arith_impl!(impl Mul, mul, try_mul, MulAssign, mul_assign);
arith_impl!(impl Div, div, try_div, DivAssign, div_assign);

macro_rules! checked_impl {
    (impl $imp:ident, $method:ident, $try_method:ident) => {
        impl $imp for Fraction {
            #[inline]
            fn $method(&self, rhs: &Fraction) -> Option<Fraction> {
                self.$try_method(*rhs).ok()
            }
        }
    };
}

checked_impl!(impl CheckedAdd, checked_add, try_add);
checked_impl!(impl CheckedSub, checked_sub, try_sub);
checked_impl!(impl CheckedMul, checked_mul, try_mul);
checked_impl!(impl CheckedDiv, checked_div, try_div);

impl CheckedNeg for Fraction {
    #[inline]
    fn checked_neg(&self) -> Option<Fraction> {
        self.try_neg().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn fraction_ops_test() {
        let a = frac(1, 2);
        let b = frac(-1, 3);
        assert_eq!(a + b, frac(1, 6));
        assert_eq!(a - b, frac(5, 6));
        assert_eq!(b - a, frac(-5, 6));
        assert_eq!(a * b, frac(-1, 6));
        assert_eq!(a / b, frac(-3, 2));
        assert_eq!(b / a, frac(-2, 3));
        assert_eq!(-a, frac(-1, 2));
        assert_eq!(-Fraction::ZERO, Fraction::ZERO);
        assert!((a - a).is_zero());
        assert!((a / a).is_one());

        let sum = frac(100, 57) + frac(92, 11);
        assert!((sum.to_f64() - (100. / 57. + 92. / 11.)).abs() < 1e-6);
    }

    #[test]
    fn integer_ops_test() {
        let a = frac(3, 4);
        assert_eq!(a + 1, frac(7, 4));
        assert_eq!(1 + a, frac(7, 4));
        assert_eq!(a - 1, frac(-1, 4));
        assert_eq!(1 - a, frac(1, 4));
        assert_eq!(a * 2, frac(3, 2));
        assert_eq!(2 * a, frac(3, 2));
        assert_eq!(a / 3, frac(1, 4));
        assert_eq!(3 / a, Fraction::from_integer(4));
    }

    #[test]
    fn float_ops_test() {
        let a = frac(3, 4);
        assert_eq!(a + 0.5, frac(5, 4));
        assert_eq!(0.5 + a, frac(5, 4));
        assert_eq!(a - 0.25, frac(1, 2));
        assert_eq!(0.25 - a, frac(-1, 2));
        assert_eq!(a * 0.5, frac(3, 8));
        assert_eq!(0.5 * a, frac(3, 8));
        assert_eq!(a / 0.5, frac(3, 2));
        assert_eq!(0.5 / a, frac(2, 3));
        assert_eq!(a * (1. / 3.), frac(1, 4));
    }

    #[test]
    fn assign_ops_test() {
        let mut acc = Fraction::ZERO;
        for d in 1..=4 {
            acc += frac(1, d);
        }
        assert_eq!(acc, frac(25, 12));
        acc -= 2;
        assert_eq!(acc, frac(1, 12));
        acc *= frac(6, 5);
        assert_eq!(acc, frac(1, 10));
        acc /= frac(1, 10);
        assert_eq!(acc, Fraction::ONE);
        acc *= 7;
        assert_eq!(acc, Fraction::from_integer(7));
    }

    #[test]
    fn checked_ops_test() {
        let max = Fraction::from_integer(i64::MAX);
        assert_eq!(max.checked_add(&Fraction::ONE), None);
        assert_eq!(max.checked_sub(&Fraction::ONE), Some(Fraction::from_integer(i64::MAX - 1)));
        assert_eq!(max.checked_mul(&frac(1, 2)), Some(frac(i64::MAX, 2)));
        assert_eq!(max.checked_div(&Fraction::ZERO), None);
        assert_eq!(Fraction::from_integer(i64::MIN).checked_neg(), None);
        assert_eq!(max.checked_neg(), Some(Fraction::from_integer(-i64::MAX)));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_panics() {
        let _ = frac(1, 2) / Fraction::ZERO;
    }

    #[test]
    #[should_panic(expected = "does not fit in 64 bits")]
    fn overflow_panics() {
        let _ = Fraction::from_integer(i64::MAX) + 1;
    }
}
