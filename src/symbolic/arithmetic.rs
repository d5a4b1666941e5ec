//! # Arithmetic operators with eager simplification
//!
//! Every arithmetic operator on expressions runs term-level simplification
//! before a new cell is published; nothing ever builds a naive binary tree.
//! The rules, first match wins:
//!
//! 1. **Identity / absorbing elements**: `x + 0 = x`, `0 + x = x`,
//!    `x * 1 = x`, `1 * x = x`, `x * 0 = 0`, `0 * x = 0`, `x / 1 = x`,
//!    `x / 0 = NaN` (except `0 / 0`, which keeps its cell so evaluation can
//!    report the indeterminate form), `0 / x = 0`, `pow(x, 0) = 1`,
//!    `pow(x, 1) = x`.
//! 2. **Constant folding**: two constant operands collapse into one
//!    constant. The assign operators additionally fold *in place* when the
//!    left handle uniquely owns its Constant cell, invalidating the memo
//!    caches instead of allocating.
//! 3. **Sign propagation**: unary minus and multiplication by exactly -1
//!    push the sign into the constant and coefficients of Add/Mul cells
//!    instead of wrapping a new multiplication.
//! 4. **Power-aware folding**: `pow(pow(b, e1), e2) = pow(b, e1 * e2)` for
//!    integer constant exponents (known-unsound in corner cases such as
//!    `(x^4) * (x^-3)` at x = 0; kept as designed).
//! 5. **Flattening**: additions merge term maps coefficient-wise,
//!    multiplications merge base/exponent maps, through the builders in
//!    `factories.rs`.
//! 6. **Division interaction**: `(a/b) * (c/d) = (a*c)/(b*d)` and
//!    `(c/b) * rhs = (c*rhs)/b` for constant `c`.
//!
//! Folding `pow` of two constants checks the numeric domain first; a
//! negative base with a non-integer exponent is left unfolded so the error
//! surfaces from `evaluate` as a catchable result instead of a panic.

use crate::symbolic::error::{SymbolicError, SymbolicResult};
use crate::symbolic::expression::{Expression, ExpressionNode};
use crate::symbolic::factories::{ProductBuilder, SumBuilder};
use crate::symbolic::scalar::Scalar;
use log::error;
use std::mem;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Checks the numeric domain of `base ^ exponent`: a finite negative base
/// with a finite non-integer exponent is undefined over the reals.
/// Integer-typed scalars are exempt.
pub(crate) fn check_pow_domain<T: Scalar>(base: &T, exponent: &T) -> SymbolicResult<()> {
    if T::INTEGRAL {
        return Ok(());
    }
    if *base < T::zero()
        && base.is_finite_value()
        && exponent.is_finite_value()
        && !exponent.is_exact_integer()
    {
        let err = SymbolicError::PowDomain {
            base: base.to_string(),
            exponent: exponent.to_string(),
        };
        error!("{}", err);
        return Err(err);
    }
    Ok(())
}

pub(crate) fn add_expression<T: Scalar>(
    lhs: Expression<T>,
    rhs: Expression<T>,
) -> Expression<T> {
    if rhs.is_constant_value(&T::zero()) {
        return lhs; // x + 0 = x
    }
    if lhs.is_constant_value(&T::zero()) {
        return rhs; // 0 + x = x
    }
    if lhs.is_constant() && rhs.is_constant() {
        return Expression::new_constant(lhs.constant() + rhs.constant());
    }
    let mut sum = SumBuilder::from_expression(&lhs);
    sum.add_expression(&rhs);
    sum.build()
}

pub(crate) fn sub_expression<T: Scalar>(
    lhs: Expression<T>,
    rhs: Expression<T>,
) -> Expression<T> {
    // a - b = a + (-b); negation propagates signs instead of nesting
    add_expression(lhs, negate_expression(rhs))
}

pub(crate) fn negate_expression<T: Scalar>(mut e: Expression<T>) -> Expression<T> {
    if e.try_mutate_constant(|v| -v) {
        return e;
    }
    match e.node() {
        ExpressionNode::Constant(v) => Expression::new_constant(-*v),
        ExpressionNode::Add { .. } => {
            let mut sum = SumBuilder::from_expression(&e);
            sum.negate();
            sum.build()
        }
        ExpressionNode::Mul { .. } => {
            let mut product = ProductBuilder::from_expression(&e);
            product.negate();
            product.build()
        }
        _ => {
            let mut product = ProductBuilder::new();
            product.mul_scalar(-T::one());
            product.mul_expression(&e);
            product.build()
        }
    }
}

pub(crate) fn mul_expression<T: Scalar>(
    lhs: Expression<T>,
    rhs: Expression<T>,
) -> Expression<T> {
    if rhs.is_constant_value(&T::one()) {
        return lhs; // x * 1 = x
    }
    if lhs.is_constant_value(&T::one()) {
        return rhs; // 1 * x = x
    }
    if lhs.is_constant_value(&T::zero()) || rhs.is_constant_value(&T::zero()) {
        return Expression::zero(); // x * 0 = 0 * x = 0
    }
    if lhs.is_constant() && rhs.is_constant() {
        return Expression::new_constant(lhs.constant() * rhs.constant());
    }
    // -1 * (a + b) and -1 * (a * b) flip signs instead of nesting
    if lhs.is_constant_value(&-T::one()) && (rhs.is_addition() || rhs.is_multiplication()) {
        return negate_expression(rhs);
    }
    if rhs.is_constant_value(&-T::one()) && (lhs.is_addition() || lhs.is_multiplication()) {
        return negate_expression(lhs);
    }
    if lhs.is_division() && rhs.is_division() {
        // (a / b) * (c / d) = (a * c) / (b * d)
        let numerator = mul_expression(lhs.lhs().clone(), rhs.lhs().clone());
        let denominator = mul_expression(lhs.rhs().clone(), rhs.rhs().clone());
        return div_expression(numerator, denominator);
    }
    if lhs.is_division() && lhs.lhs().is_constant() {
        // (c / b) * rhs = (c * rhs) / b
        let numerator = mul_expression(lhs.lhs().clone(), rhs);
        return div_expression(numerator, lhs.rhs().clone());
    }
    if rhs.is_division() && rhs.lhs().is_constant() {
        let numerator = mul_expression(lhs, rhs.lhs().clone());
        return div_expression(numerator, rhs.rhs().clone());
    }
    let mut product = ProductBuilder::from_expression(&lhs);
    product.mul_expression(&rhs);
    product.build()
}

pub(crate) fn div_expression<T: Scalar>(
    lhs: Expression<T>,
    rhs: Expression<T>,
) -> Expression<T> {
    if rhs.is_constant_value(&T::one()) {
        return lhs; // x / 1 = x
    }
    if rhs.is_constant_value(&T::zero()) {
        if lhs.is_constant_value(&T::zero()) {
            // 0 / 0 is an evaluation-time failure, not simplified away
            return Expression::new_div(lhs, rhs);
        }
        return Expression::nan(); // x / 0 = NaN
    }
    if lhs.is_constant_value(&T::zero()) {
        return Expression::zero(); // 0 / x = 0
    }
    if lhs.is_constant() && rhs.is_constant() {
        return Expression::new_constant(lhs.constant() / rhs.constant());
    }
    Expression::new_div(lhs, rhs)
}

pub(crate) fn pow_expression<T: Scalar>(
    base: Expression<T>,
    exponent: Expression<T>,
) -> Expression<T> {
    if exponent.is_constant_value(&T::zero()) {
        return Expression::one(); // pow(x, 0) = 1
    }
    if exponent.is_constant_value(&T::one()) {
        return base; // pow(x, 1) = x
    }
    if base.is_constant() && exponent.is_constant() {
        let b = base.constant();
        let e = exponent.constant();
        // fold only inside the numeric domain; a failing check leaves the
        // cell intact so evaluation reports the error as a result
        if check_pow_domain(&b, &e).is_ok() {
            return Expression::new_constant(b.raise(&e));
        }
        return Expression::new_pow(base, exponent);
    }
    // pow(pow(b, e1), e2) = pow(b, e1 * e2) for integer constant exponents
    if base.is_pow() && exponent.is_constant() && exponent.constant().is_exact_integer() {
        let inner_exponent = base.rhs();
        if inner_exponent.is_constant() && inner_exponent.constant().is_exact_integer() {
            let combined = inner_exponent.constant() * exponent.constant();
            return pow_expression(base.lhs().clone(), Expression::new_constant(combined));
        }
    }
    Expression::new_pow(base, exponent)
}

impl<T: Scalar> Expression<T> {
    /// Creates `self ^ exponent` with eager simplification.
    pub fn pow(self, exponent: Expression<T>) -> Expression<T> {
        pow_expression(self, exponent)
    }

    /// Raises this expression to `exponent` in place.
    pub fn pow_assign(&mut self, exponent: Expression<T>) {
        let base = mem::take(self);
        *self = pow_expression(base, exponent);
    }
}

impl<T: Scalar> Add for Expression<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        add_expression(self, rhs)
    }
}

impl<T: Scalar> Add<T> for Expression<T> {
    type Output = Self;

    fn add(self, rhs: T) -> Self::Output {
        add_expression(self, Expression::new_constant(rhs))
    }
}

impl<T: Scalar> Sub for Expression<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        sub_expression(self, rhs)
    }
}

impl<T: Scalar> Sub<T> for Expression<T> {
    type Output = Self;

    fn sub(self, rhs: T) -> Self::Output {
        sub_expression(self, Expression::new_constant(rhs))
    }
}

impl<T: Scalar> Mul for Expression<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        mul_expression(self, rhs)
    }
}

impl<T: Scalar> Mul<T> for Expression<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        mul_expression(self, Expression::new_constant(rhs))
    }
}

impl<T: Scalar> Div for Expression<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        div_expression(self, rhs)
    }
}

impl<T: Scalar> Div<T> for Expression<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        div_expression(self, Expression::new_constant(rhs))
    }
}

impl<T: Scalar> Neg for Expression<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        negate_expression(self)
    }
}

impl<T: Scalar> AddAssign for Expression<T> {
    fn add_assign(&mut self, rhs: Self) {
        if rhs.is_constant() {
            let v = rhs.constant();
            if self.try_mutate_constant(|old| old + v) {
                return;
            }
        }
        let lhs = mem::take(self);
        *self = add_expression(lhs, rhs);
    }
}

impl<T: Scalar> SubAssign for Expression<T> {
    fn sub_assign(&mut self, rhs: Self) {
        if rhs.is_constant() {
            let v = rhs.constant();
            if self.try_mutate_constant(|old| old - v) {
                return;
            }
        }
        let lhs = mem::take(self);
        *self = sub_expression(lhs, rhs);
    }
}

impl<T: Scalar> MulAssign for Expression<T> {
    fn mul_assign(&mut self, rhs: Self) {
        if rhs.is_constant() {
            let v = rhs.constant();
            if self.try_mutate_constant(|old| old * v) {
                return;
            }
        }
        let lhs = mem::take(self);
        *self = mul_expression(lhs, rhs);
    }
}

impl<T: Scalar> DivAssign for Expression<T> {
    fn div_assign(&mut self, rhs: Self) {
        if rhs.is_constant() {
            let v = rhs.constant();
            // the in-place path must not swallow x / 0, which becomes NaN
            if v != T::zero() && self.try_mutate_constant(|old| old / v) {
                return;
            }
        }
        let lhs = mem::take(self);
        *self = div_expression(lhs, rhs);
    }
}
