//! # Evaluation, substitution and differentiation
//!
//! The top-down walkers over an expression tree:
//!
//! - `evaluate` folds the tree into a scalar, consulting the environment
//!   for variable bindings; it fails on an unbound variable, a zero
//!   denominator (including the indeterminate 0/0), a pow outside the
//!   numeric domain and on any NaN cell it reaches.
//! - `evaluate_partial` is substitution restricted to the variables the
//!   environment binds; it returns an expression, so a tree with only some
//!   free variables bound stays manipulable.
//! - `substitute` replaces variables with expressions *simultaneously*:
//!   every replacement is computed against the original tree, never against
//!   a partially substituted intermediate (`{x -> y, y -> x}` applied to
//!   `x / y` gives `y / x`).
//! - `differentiate` covers the implemented table: constants, variables,
//!   additions (linearity) and divisions (quotient rule). Differentiating
//!   a multiplication or power cell is a documented gap of this engine and
//!   fails with a NotImplemented error rather than guessing.
//!
//! All failures propagate to the caller; no partial result is ever usable.

use crate::symbolic::arithmetic::check_pow_domain;
use crate::symbolic::environment::Environment;
use crate::symbolic::error::{SymbolicError, SymbolicResult};
use crate::symbolic::expression::{Expression, ExpressionNode, Substitution};
use crate::symbolic::scalar::Scalar;
use crate::symbolic::variable::Variable;
use log::error;

fn nan_error<V>(operation: &'static str) -> SymbolicResult<V> {
    let err = SymbolicError::NaNOperation(operation);
    error!("{}", err);
    Err(err)
}

impl<T: Scalar> Expression<T> {
    /// Evaluates the expression under the given environment.
    ///
    /// # Examples
    /// ```
    /// use RustedAlgebra::symbolic::expression::Expression;
    /// use RustedAlgebra::symbolic::variable::Variable;
    /// use RustedAlgebra::symbolic::environment::Environment;
    ///
    /// let x = Variable::new("x");
    /// let e = Expression::from(&x) * Expression::new_constant(3.0);
    /// let mut env = Environment::new();
    /// env.insert(&x, 2.0);
    /// assert_eq!(e.evaluate(&env).unwrap(), 6.0);
    /// ```
    pub fn evaluate(&self, env: &Environment<T>) -> SymbolicResult<T> {
        match self.node() {
            ExpressionNode::Constant(v) => Ok(*v),
            ExpressionNode::Var(var) => env.at(var),
            ExpressionNode::Add { constant, terms } => {
                let mut acc = *constant;
                for (term, coeff) in terms {
                    acc = acc + *coeff * term.evaluate(env)?;
                }
                Ok(acc)
            }
            ExpressionNode::Mul { constant, factors } => {
                let mut acc = *constant;
                for (base, exponent) in factors {
                    let base_value = base.evaluate(env)?;
                    let exponent_value = exponent.evaluate(env)?;
                    check_pow_domain(&base_value, &exponent_value)?;
                    acc = acc * base_value.raise(&exponent_value);
                }
                Ok(acc)
            }
            ExpressionNode::Div(numerator, denominator) => {
                let numerator_value = numerator.evaluate(env)?;
                let denominator_value = denominator.evaluate(env)?;
                if denominator_value == T::zero() {
                    let err = SymbolicError::DivisionByZero {
                        numerator: numerator_value.to_string(),
                        denominator: denominator_value.to_string(),
                    };
                    error!("{}", err);
                    return Err(err);
                }
                Ok(numerator_value / denominator_value)
            }
            ExpressionNode::Pow(base, exponent) => {
                let base_value = base.evaluate(env)?;
                let exponent_value = exponent.evaluate(env)?;
                check_pow_domain(&base_value, &exponent_value)?;
                Ok(base_value.raise(&exponent_value))
            }
            ExpressionNode::NaN => nan_error("evaluate"),
        }
    }

    /// Substitutes the variables bound in `env` with their values, leaving
    /// other variables free, and re-simplifies eagerly on the way up.
    pub fn evaluate_partial(&self, env: &Environment<T>) -> SymbolicResult<Expression<T>> {
        match self.node() {
            ExpressionNode::Constant(_) => Ok(self.clone()),
            ExpressionNode::Var(var) => Ok(match env.get(var) {
                Some(value) => Expression::new_constant(*value),
                None => self.clone(),
            }),
            ExpressionNode::Add { constant, terms } => {
                let mut acc = Expression::new_constant(*constant);
                for (term, coeff) in terms {
                    acc = acc + Expression::new_constant(*coeff) * term.evaluate_partial(env)?;
                }
                Ok(acc)
            }
            ExpressionNode::Mul { constant, factors } => {
                let mut acc = Expression::new_constant(*constant);
                for (base, exponent) in factors {
                    acc = acc
                        * base
                            .evaluate_partial(env)?
                            .pow(exponent.evaluate_partial(env)?);
                }
                Ok(acc)
            }
            ExpressionNode::Div(numerator, denominator) => {
                Ok(numerator.evaluate_partial(env)? / denominator.evaluate_partial(env)?)
            }
            ExpressionNode::Pow(base, exponent) => Ok(base
                .evaluate_partial(env)?
                .pow(exponent.evaluate_partial(env)?)),
            ExpressionNode::NaN => nan_error("partially evaluate"),
        }
    }

    /// Replaces all occurrences of the variables in `s` with the
    /// corresponding expressions, simultaneously.
    pub fn substitute(&self, s: &Substitution<T>) -> SymbolicResult<Expression<T>> {
        match self.node() {
            ExpressionNode::Constant(_) => Ok(self.clone()),
            ExpressionNode::Var(var) => {
                Ok(s.get(var).cloned().unwrap_or_else(|| self.clone()))
            }
            ExpressionNode::Add { constant, terms } => {
                let mut acc = Expression::new_constant(*constant);
                for (term, coeff) in terms {
                    acc = acc + Expression::new_constant(*coeff) * term.substitute(s)?;
                }
                Ok(acc)
            }
            ExpressionNode::Mul { constant, factors } => {
                let mut acc = Expression::new_constant(*constant);
                for (base, exponent) in factors {
                    acc = acc * base.substitute(s)?.pow(exponent.substitute(s)?);
                }
                Ok(acc)
            }
            ExpressionNode::Div(numerator, denominator) => {
                Ok(numerator.substitute(s)? / denominator.substitute(s)?)
            }
            ExpressionNode::Pow(base, exponent) => {
                Ok(base.substitute(s)?.pow(exponent.substitute(s)?))
            }
            ExpressionNode::NaN => nan_error("substitute"),
        }
    }

    /// Replaces all occurrences of `var` with `replacement`.
    pub fn substitute_variable(
        &self,
        var: &Variable,
        replacement: &Expression<T>,
    ) -> SymbolicResult<Expression<T>> {
        let mut s = Substitution::new();
        s.insert(var.clone(), replacement.clone());
        self.substitute(&s)
    }

    /// Differentiates with respect to `x`.
    ///
    /// Implemented for constants, variables, additions and divisions.
    /// Multiplication and power cells are a documented gap and fail with
    /// `NotImplemented`.
    pub fn differentiate(&self, x: &Variable) -> SymbolicResult<Expression<T>> {
        match self.node() {
            ExpressionNode::Constant(_) => Ok(Expression::zero()),
            ExpressionNode::Var(var) => Ok(if var.equal_to(x) {
                Expression::one()
            } else {
                Expression::zero()
            }),
            ExpressionNode::Add { terms, .. } => {
                // d(c0 + sum ci * ti) = sum ci * d(ti)
                let mut acc = Expression::zero();
                for (term, coeff) in terms {
                    acc = acc + Expression::new_constant(*coeff) * term.differentiate(x)?;
                }
                Ok(acc)
            }
            ExpressionNode::Div(numerator, denominator) => {
                // quotient rule: (n / d)' = (n' * d - n * d') / d^2
                let numerator_diff = numerator.differentiate(x)?;
                let denominator_diff = denominator.differentiate(x)?;
                Ok(
                    (numerator_diff * denominator.clone()
                        - numerator.clone() * denominator_diff)
                        / (denominator.clone() * denominator.clone()),
                )
            }
            ExpressionNode::Mul { .. } => {
                let err = SymbolicError::NotImplemented("differentiation of a multiplication");
                error!("{}", err);
                Err(err)
            }
            ExpressionNode::Pow(..) => {
                let err = SymbolicError::NotImplemented("differentiation of a power");
                error!("{}", err);
                Err(err)
            }
            ExpressionNode::NaN => nan_error("differentiate"),
        }
    }
}
