//! # Polynomial expansion
//!
//! Transforms an expression into a semantically equivalent normal form in
//! which every product is distributed over sums and every non-negative
//! integer power of a sum is multiplied out: `(x + 1) * (x - 1)` becomes
//! `x^2 - 1`, `(x + y)^2` becomes `x^2 + 2xy + y^2`. Expansion is
//! idempotent - the result carries the expanded flag, so re-expanding is an
//! O(1) no-op - and preserves evaluation (exactly for integer scalars,
//! within floating tolerance otherwise).
//!
//! ## Algorithm
//!
//! Post-order recursion. Children are expanded first, then combined:
//!
//! - an addition is re-summed through the sum builder so nested expansions
//!   flatten;
//! - a multiplication folds its factors pairwise through
//!   `expand_multiplication`, which distributes whenever one side is a sum;
//! - a power of a sum with a non-negative integer constant exponent is
//!   multiplied out by repeated squaring, `O(log n)` multiplications
//!   instead of `n`; any other power is left as `base ^ exponent`
//!   (non-integer and negative exponents of sums are not distributed);
//! - expanding a division is not implemented in this engine and fails
//!   loudly; expanding a NaN cell fails like every other operation on NaN.

use crate::symbolic::error::{SymbolicError, SymbolicResult};
use crate::symbolic::expression::{Expression, ExpressionNode};
use crate::symbolic::factories::SumBuilder;
use crate::symbolic::scalar::Scalar;
use log::error;

impl<T: Scalar> Expression<T> {
    /// Expands products over sums and integer powers of sums, returning
    /// the normal form. Idempotent and evaluation-preserving.
    pub fn expand(&self) -> SymbolicResult<Expression<T>> {
        // memoized fast path: an expanded cell returns its own handle
        if self.is_expanded() {
            return Ok(self.clone());
        }
        let result = match self.node() {
            ExpressionNode::Constant(_) | ExpressionNode::Var(_) => self.clone(),
            ExpressionNode::Add { constant, terms } => {
                let mut sum = SumBuilder::new();
                sum.add_scalar(*constant);
                for (term, coeff) in terms {
                    let scaled = expand_multiplication(
                        &Expression::new_constant(*coeff),
                        &term.expand()?,
                    );
                    sum.add_expression(&scaled);
                }
                sum.build()
            }
            ExpressionNode::Mul { constant, factors } => {
                let mut acc = Expression::new_constant(*constant);
                for (base, exponent) in factors {
                    let factor = expand_pow(&base.expand()?, &exponent.expand()?);
                    acc = expand_multiplication(&acc, &factor);
                }
                acc
            }
            ExpressionNode::Pow(base, exponent) => {
                expand_pow(&base.expand()?, &exponent.expand()?)
            }
            ExpressionNode::Div(..) => {
                let err = SymbolicError::NotImplemented("expansion of a division");
                error!("{}", err);
                return Err(err);
            }
            ExpressionNode::NaN => {
                let err = SymbolicError::NaNOperation("expand");
                error!("{}", err);
                return Err(err);
            }
        };
        result.mark_expanded();
        Ok(result)
    }
}

/// Multiplies two expanded expressions, distributing over whichever side is
/// a sum: `(c0 + sum ci * ei) * other = c0 * other + sum ci * (ei * other)`.
/// When neither side is a sum this is the plain (eagerly simplified)
/// product.
fn expand_multiplication<T: Scalar>(e1: &Expression<T>, e2: &Expression<T>) -> Expression<T> {
    if let ExpressionNode::Add { constant, terms } = e1.node() {
        let mut sum = SumBuilder::new();
        sum.add_expression(&expand_multiplication(
            &Expression::new_constant(*constant),
            e2,
        ));
        for (term, coeff) in terms {
            let scaled = expand_multiplication(&Expression::new_constant(*coeff), term);
            sum.add_expression(&expand_multiplication(&scaled, e2));
        }
        return sum.build();
    }
    if e2.is_addition() {
        return expand_multiplication(e2, e1);
    }
    e1.clone() * e2.clone()
}

/// Raises an expanded base to an expanded exponent. A sum raised to a
/// non-negative integer constant is multiplied out by repeated squaring;
/// everything else stays a plain power.
fn expand_pow<T: Scalar>(base: &Expression<T>, exponent: &Expression<T>) -> Expression<T> {
    if base.is_addition() && exponent.is_constant() {
        if let Some(n) = exponent.constant().to_exponent() {
            return expand_pow_integer(base, n);
        }
    }
    base.clone().pow(exponent.clone())
}

/// Exponentiation by squaring over `expand_multiplication`:
/// `pow(b, n) = pow(b, n/2) * pow(b, n/2)`, one extra factor of `b` when
/// `n` is odd.
fn expand_pow_integer<T: Scalar>(base: &Expression<T>, n: u32) -> Expression<T> {
    if n == 0 {
        return Expression::one();
    }
    if n == 1 {
        return base.clone();
    }
    let half = expand_pow_integer(base, n / 2);
    let squared = expand_multiplication(&half, &half);
    if n % 2 == 1 {
        expand_multiplication(base, &squared)
    } else {
        squared
    }
}
