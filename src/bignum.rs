//! Exact integer arithmetic on arbitrary-precision values.
//!
//! Permutation ranks live in `0..n!`, which leaves the range of `u64` at `n = 21`, so everything
//! rank-related is done on [`BigUint`]. The [`Int`] trait lets the public entry points accept
//! primitive integers and [`BigInt`] as well.
use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, ToPrimitive, Zero};

use crate::error::{Error, Result};

/// Read-only integer operations.
pub trait Int: fmt::Display + fmt::Debug {
    /// Returns the integer as a `usize`, if possible.
    fn as_usize(&self) -> Option<usize>;

    /// Returns `true` when the integer is strictly negative.
    fn is_negative(&self) -> bool;

    /// Returns the integer's absolute value.
    fn unsigned_abs(&self) -> BigUint;
}

macro_rules! unsigned_int_impl {
    ($($t:ty),*) => {
        $(
            impl Int for $t {
                fn as_usize(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }

                fn is_negative(&self) -> bool {
                    false
                }

                fn unsigned_abs(&self) -> BigUint {
                    BigUint::from(*self)
                }
            }
        )*
    };
}

macro_rules! signed_int_impl {
    ($($t:ty),*) => {
        $(
            impl Int for $t {
                fn as_usize(&self) -> Option<usize> {
                    usize::try_from(*self).ok()
                }

                fn is_negative(&self) -> bool {
                    *self < 0
                }

                fn unsigned_abs(&self) -> BigUint {
                    BigUint::from(<$t>::unsigned_abs(*self))
                }
            }
        )*
    };
}

unsigned_int_impl!(u8, u16, u32, u64, u128, usize);
signed_int_impl!(i8, i16, i32, i64, i128, isize);

impl Int for BigInt {
    fn as_usize(&self) -> Option<usize> {
        self.to_usize()
    }

    fn is_negative(&self) -> bool {
        self.sign() == Sign::Minus
    }

    fn unsigned_abs(&self) -> BigUint {
        self.magnitude().clone()
    }
}

impl Int for BigUint {
    fn as_usize(&self) -> Option<usize> {
        self.to_usize()
    }

    fn is_negative(&self) -> bool {
        false
    }

    fn unsigned_abs(&self) -> BigUint {
        self.clone()
    }
}

impl<T: Int> Int for &T {
    fn as_usize(&self) -> Option<usize> {
        (*self).as_usize()
    }

    fn is_negative(&self) -> bool {
        (*self).is_negative()
    }

    fn unsigned_abs(&self) -> BigUint {
        (*self).unsigned_abs()
    }
}

/// Returns `n!`.
///
/// `0! = 1! = 1`. The product is accumulated iteratively, so there is no recursion depth limit
/// on `n`.
pub fn factorial(n: usize) -> BigUint {
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= BigUint::from(k);
    }
    acc
}

/// Returns `n!` for any integer type, failing on negative or oversized `n`.
pub fn checked_factorial(n: impl Int) -> Result<BigUint> {
    if n.is_negative() {
        return Err(Error::NegativeLength(n.to_string()));
    }
    let n = n
        .as_usize()
        .ok_or_else(|| Error::LengthOverflow(n.to_string()))?;
    Ok(factorial(n))
}

/// Returns the non-negative greatest common divisor of `a` and `b`.
///
/// Signs are ignored, `gcd(0, x) = |x|` and `gcd(0, 0) = 0`.
pub fn gcd(a: impl Int, b: impl Int) -> BigUint {
    let mut a = a.unsigned_abs();
    let mut b = b.unsigned_abs();
    while !b.is_zero() {
        let rem = &a % &b;
        a = b;
        b = rem;
    }
    a
}

/// Divides `value` by `radix` in place and returns the remainder.
///
/// Panics when `radix` is zero.
pub(crate) fn take_digit(value: &mut BigUint, radix: usize) -> usize {
    let radix = BigUint::from(radix);
    let digit = &*value % &radix;
    *value /= &radix;
    // the remainder is below `radix`, so it fits into a single digit
    digit.iter_u64_digits().next().map_or(0, |d| d as usize)
}
