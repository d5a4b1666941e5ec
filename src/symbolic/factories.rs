//! # Term-collection builders
//!
//! Addition and multiplication are not stored as binary trees: an addition
//! cell is `constant + sum(coeff_i * term_i)` and a multiplication cell is
//! `constant * prod(base_i ^ exponent_i)`, with canonically ordered maps.
//! The two builders in this module accumulate operands into that shape,
//! merging like terms (`2x + 3x = 5x`) and like bases (`x^3 * x^2 = x^5`)
//! as they go, and finally collapse degenerate shapes on `build`:
//!
//! - a sum with no terms is its constant, a sum of exactly one unscaled
//!   term is the term itself, a sum of one scaled term is a product;
//! - a product with constant 0 is zero, with no factors its constant, with
//!   constant 1 and one factor the base (or a plain power).
//!
//! Both the eager operator-level simplifier (`arithmetic.rs`) and the
//! expansion algorithm (`expansion.rs`) funnel through these builders, so
//! the two produce identical canonical structures.

use crate::symbolic::expression::{Expression, ExpressionNode, FactorMap, TermMap};
use crate::symbolic::scalar::Scalar;
use std::collections::btree_map::Entry;

/// Rebuilds the constant-free part of a factor map: the product
/// `prod(base_i ^ exponent_i)` with constant 1, collapsed the same way
/// `ProductBuilder::build` collapses it.
fn unit_product<T: Scalar>(factors: &FactorMap<T>) -> Expression<T> {
    if factors.len() == 1 {
        let (base, exponent) = factors.iter().next().expect("one entry");
        if exponent.is_constant_value(&T::one()) {
            return base.clone();
        }
        return Expression::new_pow(base.clone(), exponent.clone());
    }
    Expression::new_mul(T::one(), factors.clone())
}

/// Accumulates an addition as `constant + sum(coeff * term)`.
#[derive(Debug)]
pub struct SumBuilder<T: Scalar> {
    constant: T,
    terms: TermMap<T>,
}

impl<T: Scalar> Default for SumBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> SumBuilder<T> {
    pub fn new() -> Self {
        SumBuilder {
            constant: T::zero(),
            terms: TermMap::new(),
        }
    }

    /// Starts the sum from an existing expression.
    pub fn from_expression(e: &Expression<T>) -> Self {
        let mut builder = Self::new();
        builder.add_expression(e);
        builder
    }

    /// Adds a plain scalar to the constant part.
    pub fn add_scalar(&mut self, value: T) {
        self.constant = self.constant + value;
    }

    /// Adds an expression, flattening it into the canonical shape:
    /// constants fold into the constant part, additions merge their maps, a
    /// product with a constant contributes that constant as the coefficient
    /// of its constant-free part (this is what makes `2x + 3x` merge), and
    /// everything else becomes a term with coefficient 1.
    pub fn add_expression(&mut self, e: &Expression<T>) {
        match e.node() {
            ExpressionNode::Constant(v) => self.add_scalar(*v),
            ExpressionNode::Add { constant, terms } => {
                self.add_scalar(*constant);
                for (term, coeff) in terms {
                    self.add_term(*coeff, term.clone());
                }
            }
            ExpressionNode::Mul { constant, factors } if *constant != T::one() => {
                self.add_term(*constant, unit_product(factors));
            }
            _ => self.add_term(T::one(), e.clone()),
        }
    }

    /// Adds `coeff * term`, merging with an existing entry for the same
    /// term. An entry whose coefficient cancels to zero is dropped.
    pub fn add_term(&mut self, coeff: T, term: Expression<T>) {
        if coeff == T::zero() {
            return;
        }
        match self.terms.entry(term) {
            Entry::Occupied(mut entry) => {
                let merged = *entry.get() + coeff;
                if merged == T::zero() {
                    entry.remove();
                } else {
                    *entry.get_mut() = merged;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(coeff);
            }
        }
    }

    /// Flips the sign of the constant and of every coefficient.
    pub fn negate(&mut self) {
        self.constant = -self.constant;
        for coeff in self.terms.values_mut() {
            *coeff = -*coeff;
        }
    }

    /// Publishes the accumulated sum in canonical form.
    pub fn build(self) -> Expression<T> {
        if self.terms.is_empty() {
            return Expression::new_constant(self.constant);
        }
        if self.constant == T::zero() && self.terms.len() == 1 {
            let (term, coeff) = self.terms.into_iter().next().expect("one entry");
            if coeff == T::one() {
                return term;
            }
            let mut product = ProductBuilder::new();
            product.mul_scalar(coeff);
            product.mul_expression(&term);
            return product.build();
        }
        Expression::new_add(self.constant, self.terms)
    }
}

/// Accumulates a multiplication as `constant * prod(base ^ exponent)`.
#[derive(Debug)]
pub struct ProductBuilder<T: Scalar> {
    constant: T,
    factors: FactorMap<T>,
}

impl<T: Scalar> Default for ProductBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> ProductBuilder<T> {
    pub fn new() -> Self {
        ProductBuilder {
            constant: T::one(),
            factors: FactorMap::new(),
        }
    }

    /// Starts the product from an existing expression.
    pub fn from_expression(e: &Expression<T>) -> Self {
        let mut builder = Self::new();
        builder.mul_expression(e);
        builder
    }

    /// Multiplies the constant part by a plain scalar; zero absorbs the
    /// whole product.
    pub fn mul_scalar(&mut self, value: T) {
        if self.constant == T::zero() || value == T::one() {
            return;
        }
        if value == T::zero() {
            self.constant = T::zero();
            self.factors.clear();
            return;
        }
        self.constant = self.constant * value;
    }

    /// Multiplies by an expression, flattening it into the canonical shape:
    /// constants fold into the constant part, multiplications merge their
    /// maps, a power contributes its (base, exponent) pair, and everything
    /// else becomes a base with exponent 1.
    pub fn mul_expression(&mut self, e: &Expression<T>) {
        if self.constant == T::zero() {
            return;
        }
        match e.node() {
            ExpressionNode::Constant(v) => self.mul_scalar(*v),
            ExpressionNode::Mul { constant, factors } => {
                self.mul_scalar(*constant);
                for (base, exponent) in factors {
                    self.mul_factor(base.clone(), exponent.clone());
                }
            }
            ExpressionNode::Pow(base, exponent) => {
                self.mul_factor(base.clone(), exponent.clone());
            }
            _ => self.mul_factor(e.clone(), Expression::one()),
        }
    }

    /// Multiplies by `base ^ exponent`, merging exponents of an existing
    /// entry for the same base (`x^3 * x^2 = x^5`). An exponent sum that
    /// cancels to constant zero drops the base from the product even though
    /// the base might evaluate to zero - a known trade-off of this engine,
    /// kept as designed.
    pub fn mul_factor(&mut self, base: Expression<T>, exponent: Expression<T>) {
        // pow(pow(b, e1), e2) = pow(b, e1 * e2) when both exponents are
        // integer constants; also known-unsound in general, kept as designed
        if base.is_pow() && exponent.is_constant() && exponent.constant().is_exact_integer() {
            let inner_exponent = base.rhs().clone();
            if inner_exponent.is_constant() && inner_exponent.constant().is_exact_integer() {
                let inner_base = base.lhs().clone();
                return self.mul_factor(inner_base, inner_exponent * exponent);
            }
        }
        match self.factors.entry(base) {
            Entry::Occupied(mut entry) => {
                let merged = entry.get().clone() + exponent;
                if merged.is_constant_value(&T::zero()) {
                    entry.remove();
                } else {
                    *entry.get_mut() = merged;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(exponent);
            }
        }
    }

    /// Flips the sign of the constant part.
    pub fn negate(&mut self) {
        self.constant = -self.constant;
    }

    /// Publishes the accumulated product in canonical form.
    pub fn build(self) -> Expression<T> {
        if self.constant == T::zero() {
            return Expression::zero();
        }
        if self.factors.is_empty() {
            return Expression::new_constant(self.constant);
        }
        if self.constant == T::one() && self.factors.len() == 1 {
            let (base, exponent) = self.factors.into_iter().next().expect("one entry");
            if exponent.is_constant_value(&T::one()) {
                return base;
            }
            return Expression::new_pow(base, exponent);
        }
        Expression::new_mul(self.constant, self.factors)
    }
}
