//! # Error taxonomy
//!
//! Every recoverable failure of the top-level expression operations
//! (`evaluate`, `expand`, `substitute`, `differentiate`) is reported as a
//! [`SymbolicError`] and propagated to the caller; nothing is swallowed or
//! retried internally and there is no partial-success mode. Programmer
//! errors - calling a typed accessor on the wrong cell kind, inserting the
//! dummy variable into an environment - are not part of this enum: they
//! panic at the call site.

use crate::symbolic::variable::Variable;
use thiserror::Error;

/// Recoverable failures of symbolic operations.
///
/// The variants carry enough context to report the failure without access
/// to the expression it came from: the offending variable, or both operand
/// values rendered in the scalar domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolicError {
    /// A free variable of the expression has no binding in the environment.
    #[error("variable '{0}' is not bound in the evaluation environment")]
    UnboundVariable(Variable),
    /// Negative base raised to a non-integer finite exponent; undefined
    /// over the reals. Integer-typed scalars never produce this.
    #[error("pow({base}, {exponent}) is undefined: negative base with non-integer exponent")]
    PowDomain { base: String, exponent: String },
    /// Division by an exact zero denominator, including the indeterminate
    /// form 0 / 0.
    #[error("division by zero: {numerator} / {denominator}")]
    DivisionByZero { numerator: String, denominator: String },
    /// An operation reached a NaN cell. NaN cells are inert placeholders
    /// and must never appear on an executed path.
    #[error("cannot {0} a NaN expression")]
    NaNOperation(&'static str),
    /// A documented gap of the engine was reached (multiplication/power
    /// differentiation, division expansion). Failing loudly keeps every
    /// implemented path correct.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}

/// Result alias used by all fallible operations of the engine.
pub type SymbolicResult<V> = Result<V, SymbolicError>;
