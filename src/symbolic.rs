#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
//! # Symbolic algebra core
//!
//! An immutable, structurally-shared symbolic expression engine over a
//! generic numeric scalar type. Expressions are built from constants and
//! variables with the usual arithmetic operators; every operator call runs
//! an eager simplifier (constant folding, identity elimination, like-term
//! merging) before a new node is published, so the tree you hold is always
//! in a canonical form. On top of that the engine provides structural
//! equality and a total order, evaluation against an [`environment::Environment`],
//! simultaneous substitution, differentiation and polynomial expansion.
//!
//! # Example
//! ```
//! use RustedAlgebra::symbolic::expression::Expression;
//! use RustedAlgebra::symbolic::variable::Variable;
//! use RustedAlgebra::symbolic::environment::Environment;
//!
//! let x = Variable::new("x");
//! let y = Variable::new("y");
//! // 2 * (x + y) and 2x + 2y are extensionally equal but structurally distinct
//! let e1 = Expression::new_constant(2.0) * (Expression::from(&x) + Expression::from(&y));
//! let e2 = Expression::new_constant(2.0) * Expression::from(&x)
//!     + Expression::new_constant(2.0) * Expression::from(&y);
//! assert!(!e1.equal_to(&e2));
//! assert!(e1.expand().unwrap().equal_to(&e2.expand().unwrap()));
//!
//! let mut env = Environment::new();
//! env.insert(&x, 3.0);
//! env.insert(&y, 4.0);
//! assert_eq!(e1.evaluate(&env).unwrap(), 14.0);
//! ```

/// numeric scalar trait bundle: which scalar types the engine accepts and
/// the type-specific predicates the engine needs (exact-integer check for
/// exponents, pow domain exemption for integer types, pi/e constants)
pub mod scalar;
///____________________________________________________________________________________________________________________________
/// error taxonomy of the engine: every recoverable failure of evaluate /
/// expand / substitute / differentiate is a variant of `SymbolicError`
pub mod error;
///____________________________________________________________________________________________________________________________
/// console logger setup helper; the library itself only talks to the `log`
/// facade, this module wires it to a terminal logger for tests and binaries
pub mod logging;
///____________________________________________________________________________________________________________________________
/// symbolic variable with a process-unique id, a type tag and the dummy
/// (anonymous) sentinel used as "no variable"
pub mod variable;
///____________________________________________________________________________________________________________________________
/// ordered set of variables with union/difference/intersection and subset
/// checks; produced by `Expression::variables()`
pub mod variables;
///____________________________________________________________________________________________________________________________
/// mapping from variables to scalar values consumed by evaluation;
/// fail-fast `at` vs optional `get` lookups
pub mod environment;
///____________________________________________________________________________________________________________________________
/// # Expression
/// the expression node store and the shared handle:
/// 1) `ExpressionKind` - the closed tag of node kinds
/// 2) `ExpressionCell` - one immutable AST node with memoized derived data
/// 3) `Expression` - the cheap-to-copy shared handle, singletons, typed
///    accessors, structural equality/ordering and display
pub mod expression;
///____________________________________________________________________________________________________________________________
/// term-collection builders: addition accumulated as (constant + sum of
/// coefficient * term), multiplication as (constant * product of
/// base^exponent), merging like terms; used by the eager simplifier and by
/// the expansion algorithm
pub mod factories;
///____________________________________________________________________________________________________________________________
/// arithmetic operators with eager simplification: identity elimination,
/// constant folding (in place when the cell is uniquely owned), sign
/// propagation, flattening into the term-collection builders
pub mod arithmetic;
///____________________________________________________________________________________________________________________________
/// evaluation against an environment, partial evaluation, simultaneous
/// substitution and differentiation
pub mod evaluation;
///____________________________________________________________________________________________________________________________
/// polynomial expansion: distribute products over sums, expand non-negative
/// integer powers by repeated squaring; idempotent and evaluation-preserving
pub mod expansion;

#[cfg(test)]
mod expression_tests;
