//! # Numeric Scalar Trait Bundle
//!
//! Defines which scalar types the symbolic engine can be instantiated with.
//! The engine itself is agnostic about the number type: everything it needs
//! beyond plain arithmetic is collected in the [`Scalar`] trait:
//!
//! 1. **Exact-integer predicate**: exponent handling (polynomial detection,
//!    expansion by repeated squaring, pow-of-pow folding) is only valid for
//!    integral exponents, so every scalar must be able to answer "is this
//!    value representable as an exact integer".
//! 2. **Exponentiation**: `raise` performs `base ^ exponent` in the scalar
//!    domain. Integer types route through truncating exponentiation so that
//!    `(-2)^3 = -8` and `2^-1 = 0`.
//! 3. **Domain exemption flag**: raising a negative base to a non-integer
//!    exponent is undefined over the reals and rejected at evaluation time,
//!    but every integer exponentiation is considered well-defined for
//!    integral scalar types. `INTEGRAL` marks the exempt types.
//! 4. **Mathematical constants**: `pi()` and `e()` back the corresponding
//!    expression singletons, truncated into the scalar type.

use num_traits::{FromPrimitive, Num, NumCast, Signed};
use std::fmt::{Debug, Display};

/// Scalar types usable as the numeric domain of symbolic expressions.
///
/// Implemented for `i32`, `i64`, `f32` and `f64`, mirroring the four
/// instantiations the engine is expected to serve.
pub trait Scalar:
    Num + Signed + NumCast + FromPrimitive + PartialOrd + Copy + Display + Debug + 'static
{
    /// true for integer-typed scalars, which are exempt from the pow domain
    /// check (every integer exponentiation is well-defined for them)
    const INTEGRAL: bool;

    /// Checks whether the value is representable as an exact integer.
    ///
    /// For `i64` the value must additionally fit into the `i32` range, so
    /// that exponent arithmetic stays exact after narrowing.
    fn is_exact_integer(&self) -> bool;

    /// true when the value is finite (always true for integer types)
    fn is_finite_value(&self) -> bool;

    /// Evaluates `self ^ exponent` in the scalar domain.
    fn raise(&self, exponent: &Self) -> Self;

    /// The constant pi truncated into the scalar type.
    fn pi() -> Self;

    /// The constant e truncated into the scalar type.
    fn e() -> Self;

    /// Narrows the value to a `u32` exponent when it is a non-negative
    /// exact integer; `None` otherwise. Used by the expansion algorithm to
    /// decide whether a power of a sum may be multiplied out.
    fn to_exponent(&self) -> Option<u32> {
        if self.is_exact_integer() && *self >= Self::zero() {
            self.to_u32()
        } else {
            None
        }
    }
}

/// Integer exponentiation with a truncating negative-exponent branch.
///
/// `base^n` for negative `n` is `1 / base^|n|` truncated toward zero, which
/// only survives truncation for bases 1 and -1; everything else collapses
/// to 0 (and `0^negative` is pinned to 0 as well instead of dividing by
/// zero).
fn integer_raise<T: Scalar>(base: T, exponent: T) -> T {
    if exponent < T::zero() {
        if base == T::one() {
            return T::one();
        }
        if base == -T::one() {
            // (-1)^n alternates sign; probe parity via halving
            let half = exponent / (T::one() + T::one());
            let even = half + half == exponent;
            return if even { T::one() } else { -T::one() };
        }
        return T::zero();
    }
    let mut result = T::one();
    let mut factor = base;
    let mut n = exponent
        .to_u64()
        .expect("non-negative integer exponent must fit in u64");
    while n > 0 {
        if n & 1 == 1 {
            result = result * factor;
        }
        n >>= 1;
        if n > 0 {
            factor = factor * factor;
        }
    }
    result
}

macro_rules! impl_integral_scalar {
    ($($t:ty),+) => {
        $(
            impl Scalar for $t {
                const INTEGRAL: bool = true;

                fn is_exact_integer(&self) -> bool {
                    *self >= i32::MIN as $t && *self <= i32::MAX as $t
                }

                fn is_finite_value(&self) -> bool {
                    true
                }

                fn raise(&self, exponent: &Self) -> Self {
                    integer_raise(*self, *exponent)
                }

                fn pi() -> Self {
                    std::f64::consts::PI as $t
                }

                fn e() -> Self {
                    std::f64::consts::E as $t
                }
            }
        )+
    };
}

macro_rules! impl_float_scalar {
    ($($t:ident),+) => {
        $(
            impl Scalar for $t {
                const INTEGRAL: bool = false;

                fn is_exact_integer(&self) -> bool {
                    self.is_finite() && self.fract() == 0.0
                }

                fn is_finite_value(&self) -> bool {
                    self.is_finite()
                }

                fn raise(&self, exponent: &Self) -> Self {
                    self.powf(*exponent)
                }

                fn pi() -> Self {
                    std::$t::consts::PI
                }

                fn e() -> Self {
                    std::$t::consts::E
                }
            }
        )+
    };
}

impl_integral_scalar!(i32, i64);
impl_float_scalar!(f32, f64);
