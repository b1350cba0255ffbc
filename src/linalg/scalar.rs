//! The scalar field over which vectors, matrices and polyhedra are defined.

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, Num, Signed};
use std::fmt::{Debug, Display};
use std::str::FromStr;

/// Arithmetic that reports overflow instead of wrapping or panicking.
///
/// Integer and rational types return `None` when a result does not fit.
/// Floating point types never fail.
pub trait CheckedArith: Sized {
    /// `self + rhs`, or `None` on overflow.
    fn add_checked(self, rhs: Self) -> Option<Self>;

    /// `self - rhs`, or `None` on overflow.
    fn sub_checked(self, rhs: Self) -> Option<Self>;

    /// `self * rhs`, or `None` on overflow.
    fn mul_checked(self, rhs: Self) -> Option<Self>;

    /// `a·x - b·y`, or `None` if any step overflows.
    fn cross_checked(a: Self, x: Self, b: Self, y: Self) -> Option<Self> {
        let left = a.mul_checked(x)?;
        let right = b.mul_checked(y)?;
        left.sub_checked(right)
    }
}

macro_rules! checked_integer {
    ($($t:ty),*) => {$(
        impl CheckedArith for $t {
            #[inline]
            fn add_checked(self, rhs: Self) -> Option<Self> {
                self.checked_add(rhs)
            }

            #[inline]
            fn sub_checked(self, rhs: Self) -> Option<Self> {
                self.checked_sub(rhs)
            }

            #[inline]
            fn mul_checked(self, rhs: Self) -> Option<Self> {
                self.checked_mul(rhs)
            }
        }
    )*};
}

macro_rules! unchecked_float {
    ($($t:ty),*) => {$(
        impl CheckedArith for $t {
            #[inline]
            fn add_checked(self, rhs: Self) -> Option<Self> {
                Some(self + rhs)
            }

            #[inline]
            fn sub_checked(self, rhs: Self) -> Option<Self> {
                Some(self - rhs)
            }

            #[inline]
            fn mul_checked(self, rhs: Self) -> Option<Self> {
                Some(self * rhs)
            }
        }
    )*};
}

checked_integer!(i8, i16, i32, i64, i128, isize);
unchecked_float!(f32, f64);

impl<T> CheckedArith for Ratio<T>
where
    Ratio<T>: CheckedAdd + CheckedSub + CheckedMul,
{
    fn add_checked(self, rhs: Self) -> Option<Self> {
        CheckedAdd::checked_add(&self, &rhs)
    }

    fn sub_checked(self, rhs: Self) -> Option<Self> {
        CheckedSub::checked_sub(&self, &rhs)
    }

    fn mul_checked(self, rhs: Self) -> Option<Self> {
        CheckedMul::checked_mul(&self, &rhs)
    }
}

/// Capability set required of a coefficient type.
///
/// Implemented for every signed numeric type with value semantics and
/// [`CheckedArith`], which covers the signed primitive integers, `f32`/`f64`
/// and `num_rational::Ratio` over those integers.
pub trait Scalar:
    Num + Signed + Copy + PartialOrd + Debug + Display + FromStr + CheckedArith
{
    /// Parse a scalar literal, returning `None` when the text is rejected.
    fn parse_literal(text: &str) -> Option<Self> {
        text.parse().ok()
    }

    /// Check if the value is strictly below zero.
    fn is_negative_value(&self) -> bool {
        *self < Self::zero()
    }

    /// Check if the value is strictly above zero.
    fn is_positive_value(&self) -> bool {
        *self > Self::zero()
    }
}

impl<T> Scalar for T where
    T: Num + Signed + Copy + PartialOrd + Debug + Display + FromStr + CheckedArith
{
}
