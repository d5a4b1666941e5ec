//! # Expression node store and shared handle
//!
//! The heart of the engine. Every expression is one [`ExpressionCell`] - an
//! immutable tagged-union AST node - shared behind a reference-counted
//! handle, [`Expression`]. Handles are cheap to copy and structurally
//! shared: building `(x + y) * (x + y)` reuses the `(x + y)` cell rather
//! than copying it.
//!
//! ## Main structures
//!
//! ### `ExpressionKind`
//! The closed tag of node kinds: `Constant, Var, Add, Mul, Div, Pow, NaN`.
//! Its declaration order is the major key of the total order on
//! expressions.
//!
//! ### `ExpressionCell`
//! One AST node plus memoized derived data (free-variable set, polynomial
//! flag) and the is-expanded flag. A cell never changes its structural
//! content after construction; the single exception is the in-place update
//! of a *uniquely owned* Constant performed by the assign operators, which
//! invalidates the memo caches (see `arithmetic.rs`).
//!
//! ### `Expression`
//! The shared handle. Addition cells store `constant + sum(coeff_i *
//! term_i)` as an ordered term map, multiplication cells store `constant *
//! prod(base_i ^ exponent_i)` as an ordered factor map; the map order is
//! the total order defined here, which makes display deterministic and
//! comparison canonical.
//!
//! ## Singletons
//!
//! `zero()`, `one()`, `nan()`, `pi()` and `e()` are lazily initialized
//! shared cells, one per scalar type per thread (the handle is `Rc`-based,
//! so nothing in this engine crosses threads). Constructing the constant 0
//! or 1 through `new_constant` returns the shared singleton cell instead of
//! allocating. The registry keeps one reference to each singleton forever,
//! so a singleton is never uniquely owned and therefore never touched by
//! the in-place mutation fast path.

use crate::symbolic::scalar::Scalar;
use crate::symbolic::variable::Variable;
use crate::symbolic::variables::Variables;
use std::any::{Any, TypeId};
use std::cell::{Cell, OnceCell, RefCell};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use strum_macros::Display;

/// Ordered map from term to coefficient inside an Add cell.
pub type TermMap<T> = BTreeMap<Expression<T>, T>;
/// Ordered map from base to exponent inside a Mul cell.
pub type FactorMap<T> = BTreeMap<Expression<T>, Expression<T>>;
/// Simultaneous substitution: variable to replacement expression.
pub type Substitution<T> = HashMap<Variable, Expression<T>>;

/// Kinds of symbolic expressions. The declaration order defines the major
/// key of the total order on expressions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum ExpressionKind {
    /// constant value
    Constant,
    /// variable
    Var,
    /// addition (+)
    Add,
    /// multiplication (*)
    Mul,
    /// division (/)
    Div,
    /// power function
    Pow,
    /// NaN sentinel
    NaN,
}

/// The tagged union of node contents.
#[derive(Debug)]
pub(crate) enum ExpressionNode<T: Scalar> {
    Constant(T),
    Var(Variable),
    /// constant + sum of coeff * term; no zero coefficients
    Add { constant: T, terms: TermMap<T> },
    /// constant * product of base ^ exponent; constant never zero, no
    /// constant-zero exponents, one entry per base
    Mul { constant: T, factors: FactorMap<T> },
    Div(Expression<T>, Expression<T>),
    Pow(Expression<T>, Expression<T>),
    NaN,
}

/// One immutable expression node with memoized derived data.
#[derive(Debug)]
pub struct ExpressionCell<T: Scalar> {
    node: ExpressionNode<T>,
    variables: OnceCell<Variables>,
    polynomial: OnceCell<bool>,
    expanded: Cell<bool>,
}

impl<T: Scalar> ExpressionCell<T> {
    fn new(node: ExpressionNode<T>, expanded: bool) -> Self {
        ExpressionCell {
            node,
            variables: OnceCell::new(),
            polynomial: OnceCell::new(),
            expanded: Cell::new(expanded),
        }
    }

    /// Drops memoized derived data after an in-place constant update; a
    /// constant is trivially expanded, so the flag is reasserted.
    fn invalidate_caches(&mut self) {
        self.variables.take();
        self.polynomial.take();
        self.expanded.set(true);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum SingletonKind {
    Zero,
    One,
    NaN,
    Pi,
    E,
}

thread_local! {
    /// per-thread singleton cells keyed by scalar type; holding an Rc here
    /// keeps every singleton permanently shared (never uniquely owned)
    static SINGLETONS: RefCell<HashMap<(TypeId, SingletonKind), Rc<dyn Any>>> =
        RefCell::new(HashMap::new());
}

fn singleton<T: Scalar>(which: SingletonKind, build: fn() -> ExpressionCell<T>) -> Expression<T> {
    SINGLETONS.with(|registry| {
        let mut registry = registry.borrow_mut();
        let entry = registry
            .entry((TypeId::of::<T>(), which))
            .or_insert_with(|| Rc::new(build()) as Rc<dyn Any>);
        let cell = entry
            .clone()
            .downcast::<ExpressionCell<T>>()
            .expect("singleton registry entry has the scalar type it was keyed with");
        Expression { cell }
    })
}

/// Shared handle to one [`ExpressionCell`].
///
/// Copying an `Expression` copies the handle, not the tree. Two handles are
/// structurally equal (`equal_to`) when their cells have the same kind and
/// recursively equal content - which is *not* extensional equality:
/// `2 * (x + y)` and `2x + 2y` evaluate identically but only become
/// structurally equal after both are expanded.
#[derive(Clone, Debug)]
pub struct Expression<T: Scalar> {
    cell: Rc<ExpressionCell<T>>,
}

impl<T: Scalar> Expression<T> {
    //___________________________________CONSTRUCTION____________________________________

    /// Creates a constant expression. The constants 0 and 1 resolve to the
    /// shared singleton cells.
    pub fn new_constant(value: T) -> Self {
        if value == T::zero() {
            return Self::zero();
        }
        if value == T::one() {
            return Self::one();
        }
        Self::from_cell(ExpressionCell::new(ExpressionNode::Constant(value), true))
    }

    /// Creates a variable expression.
    ///
    /// # Panics
    /// Panics when `var` is the dummy variable.
    pub fn new_variable(var: Variable) -> Self {
        assert!(
            !var.is_dummy(),
            "cannot build an expression from the dummy variable"
        );
        Self::from_cell(ExpressionCell::new(ExpressionNode::Var(var), true))
    }

    /// the shared constant 0
    pub fn zero() -> Self {
        singleton(SingletonKind::Zero, || {
            ExpressionCell::new(ExpressionNode::Constant(T::zero()), true)
        })
    }

    /// the shared constant 1
    pub fn one() -> Self {
        singleton(SingletonKind::One, || {
            ExpressionCell::new(ExpressionNode::Constant(T::one()), true)
        })
    }

    /// the shared constant pi (truncated into the scalar type)
    pub fn pi() -> Self {
        singleton(SingletonKind::Pi, || {
            ExpressionCell::new(ExpressionNode::Constant(T::pi()), true)
        })
    }

    /// the shared constant e (truncated into the scalar type)
    pub fn e() -> Self {
        singleton(SingletonKind::E, || {
            ExpressionCell::new(ExpressionNode::Constant(T::e()), true)
        })
    }

    /// The shared NaN sentinel: an inert placeholder cell. Every operation
    /// reaching it fails; it exists only to occupy a position in an
    /// expression that is never evaluated.
    pub fn nan() -> Self {
        singleton(SingletonKind::NaN, || {
            ExpressionCell::new(ExpressionNode::NaN, false)
        })
    }

    fn from_cell(cell: ExpressionCell<T>) -> Self {
        Expression {
            cell: Rc::new(cell),
        }
    }

    /// Publishes an Add cell. Conservative expanded detection: every term
    /// is expanded and none is itself a sum (a sum used as a term still
    /// needs distribution against its coefficient).
    pub(crate) fn new_add(constant: T, terms: TermMap<T>) -> Self {
        debug_assert!(!terms.is_empty(), "Add cell must carry at least one term");
        debug_assert!(
            terms.values().all(|c| *c != T::zero()),
            "Add cell must not carry zero coefficients"
        );
        let expanded = terms.keys().all(|t| t.is_expanded() && !t.is_addition());
        Self::from_cell(ExpressionCell::new(
            ExpressionNode::Add { constant, terms },
            expanded,
        ))
    }

    /// Publishes a Mul cell. Conservative expanded detection: every base
    /// and exponent is expanded and no base is a sum (a product with a sum
    /// base needs distribution).
    pub(crate) fn new_mul(constant: T, factors: FactorMap<T>) -> Self {
        debug_assert!(constant != T::zero(), "Mul cell must not carry constant 0");
        debug_assert!(
            !factors.is_empty(),
            "Mul cell must carry at least one factor"
        );
        let expanded = factors
            .iter()
            .all(|(b, e)| b.is_expanded() && e.is_expanded() && !b.is_addition());
        Self::from_cell(ExpressionCell::new(
            ExpressionNode::Mul { constant, factors },
            expanded,
        ))
    }

    pub(crate) fn new_div(numerator: Expression<T>, denominator: Expression<T>) -> Self {
        Self::from_cell(ExpressionCell::new(
            ExpressionNode::Div(numerator, denominator),
            false,
        ))
    }

    pub(crate) fn new_pow(base: Expression<T>, exponent: Expression<T>) -> Self {
        let expanded = base.is_expanded() && exponent.is_expanded() && !base.is_addition();
        Self::from_cell(ExpressionCell::new(
            ExpressionNode::Pow(base, exponent),
            expanded,
        ))
    }

    //___________________________________STRUCTURE ACCESS____________________________________

    pub(crate) fn node(&self) -> &ExpressionNode<T> {
        &self.cell.node
    }

    /// kind tag of the underlying cell
    pub fn kind(&self) -> ExpressionKind {
        match self.cell.node {
            ExpressionNode::Constant(_) => ExpressionKind::Constant,
            ExpressionNode::Var(_) => ExpressionKind::Var,
            ExpressionNode::Add { .. } => ExpressionKind::Add,
            ExpressionNode::Mul { .. } => ExpressionKind::Mul,
            ExpressionNode::Div(..) => ExpressionKind::Div,
            ExpressionNode::Pow(..) => ExpressionKind::Pow,
            ExpressionNode::NaN => ExpressionKind::NaN,
        }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Constant(_))
    }

    /// true when the cell is the constant `value`
    pub fn is_constant_value(&self, value: &T) -> bool {
        matches!(&self.cell.node, ExpressionNode::Constant(v) if v == value)
    }

    pub fn is_variable(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Var(_))
    }

    pub fn is_addition(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Add { .. })
    }

    pub fn is_multiplication(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Mul { .. })
    }

    pub fn is_division(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Div(..))
    }

    pub fn is_pow(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::Pow(..))
    }

    pub fn is_nan(&self) -> bool {
        matches!(self.cell.node, ExpressionNode::NaN)
    }

    pub fn is_leaf(&self) -> bool {
        self.is_constant() || self.is_variable() || self.is_nan()
    }

    /// Value of a Constant cell.
    ///
    /// # Panics
    /// Panics when the cell is not a Constant; check `is_constant()` first.
    pub fn constant(&self) -> T {
        match &self.cell.node {
            ExpressionNode::Constant(v) => *v,
            _ => panic!("constant() called on a {} expression", self.kind()),
        }
    }

    /// Variable of a Var cell.
    ///
    /// # Panics
    /// Panics when the cell is not a Var; check `is_variable()` first.
    pub fn variable(&self) -> &Variable {
        match &self.cell.node {
            ExpressionNode::Var(v) => v,
            _ => panic!("variable() called on a {} expression", self.kind()),
        }
    }

    /// Term map of an Add cell.
    ///
    /// # Panics
    /// Panics when the cell is not an Add; check `is_addition()` first.
    pub fn expression_to_coeff_map(&self) -> &TermMap<T> {
        match &self.cell.node {
            ExpressionNode::Add { terms, .. } => terms,
            _ => panic!(
                "expression_to_coeff_map() called on a {} expression",
                self.kind()
            ),
        }
    }

    /// Factor map of a Mul cell.
    ///
    /// # Panics
    /// Panics when the cell is not a Mul; check `is_multiplication()` first.
    pub fn base_to_exponent_map(&self) -> &FactorMap<T> {
        match &self.cell.node {
            ExpressionNode::Mul { factors, .. } => factors,
            _ => panic!(
                "base_to_exponent_map() called on a {} expression",
                self.kind()
            ),
        }
    }

    /// First operand of a Div or Pow cell.
    ///
    /// # Panics
    /// Panics on any other kind.
    pub fn lhs(&self) -> &Expression<T> {
        match &self.cell.node {
            ExpressionNode::Div(e1, _) | ExpressionNode::Pow(e1, _) => e1,
            _ => panic!("lhs() called on a {} expression", self.kind()),
        }
    }

    /// Second operand of a Div or Pow cell.
    ///
    /// # Panics
    /// Panics on any other kind.
    pub fn rhs(&self) -> &Expression<T> {
        match &self.cell.node {
            ExpressionNode::Div(_, e2) | ExpressionNode::Pow(_, e2) => e2,
            _ => panic!("rhs() called on a {} expression", self.kind()),
        }
    }

    /// Number of handles currently sharing the underlying cell.
    pub fn use_count(&self) -> usize {
        Rc::strong_count(&self.cell)
    }

    /// true when both handles share one cell
    pub fn same_cell(&self, other: &Expression<T>) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    //___________________________________DERIVED DATA____________________________________

    /// Free variables of the expression, memoized on first call.
    pub fn variables(&self) -> Variables {
        self.cell
            .variables
            .get_or_init(|| self.compute_variables())
            .clone()
    }

    fn compute_variables(&self) -> Variables {
        match &self.cell.node {
            ExpressionNode::Constant(_) | ExpressionNode::NaN => Variables::new(),
            ExpressionNode::Var(v) => Variables::from(v.clone()),
            ExpressionNode::Add { terms, .. } => terms
                .keys()
                .fold(Variables::new(), |acc, t| acc + &t.variables()),
            ExpressionNode::Mul { factors, .. } => factors
                .iter()
                .fold(Variables::new(), |acc, (b, e)| {
                    acc + &b.variables() + &e.variables()
                }),
            ExpressionNode::Div(e1, e2) | ExpressionNode::Pow(e1, e2) => {
                e1.variables() + &e2.variables()
            }
        }
    }

    /// Whether the expression is a polynomial over its variables, memoized
    /// on first call. Division never counts as polynomial-preserving; every
    /// exponent must be a non-negative integer constant.
    pub fn is_polynomial(&self) -> bool {
        *self.cell.polynomial.get_or_init(|| match &self.cell.node {
            ExpressionNode::Constant(_) | ExpressionNode::Var(_) => true,
            ExpressionNode::Add { terms, .. } => terms.keys().all(|t| t.is_polynomial()),
            ExpressionNode::Mul { factors, .. } => factors
                .iter()
                .all(|(b, e)| b.is_polynomial() && is_nonnegative_integer_constant(e)),
            ExpressionNode::Pow(base, exponent) => {
                base.is_polynomial() && is_nonnegative_integer_constant(exponent)
            }
            ExpressionNode::Div(..) | ExpressionNode::NaN => false,
        })
    }

    /// Whether the expression is known to be in expanded normal form. The
    /// check is conservative: `false` only means expansion has not been
    /// proven unnecessary.
    pub fn is_expanded(&self) -> bool {
        self.cell.expanded.get()
    }

    pub(crate) fn mark_expanded(&self) {
        self.cell.expanded.set(true);
    }

    /// In-place update of a uniquely owned Constant cell; the caches are
    /// invalidated on success. Returns false (leaving the handle untouched)
    /// when the cell is shared or not a Constant - the caller then takes
    /// the allocating path.
    pub(crate) fn try_mutate_constant(&mut self, update: impl FnOnce(T) -> T) -> bool {
        if let Some(cell) = Rc::get_mut(&mut self.cell) {
            if let ExpressionNode::Constant(value) = &mut cell.node {
                *value = update(*value);
                cell.invalidate_caches();
                return true;
            }
        }
        false
    }

    //___________________________________STRUCTURAL COMPARISON____________________________________

    /// Structural equality: same kind, recursively equal content.
    ///
    /// NaN cells are never equal to anything, including themselves,
    /// matching the IEEE convention; use `is_nan()` to detect them.
    pub fn equal_to(&self, other: &Expression<T>) -> bool {
        if self.kind() != other.kind() {
            return false;
        }
        equal_cells(&self.cell.node, &other.cell.node)
    }

    /// Total order on expressions: kind first, then content
    /// lexicographically. This is the order of the term/factor maps.
    pub fn less(&self, other: &Expression<T>) -> bool {
        self.cmp(other) == Ordering::Less
    }
}

/// Content equality of two same-kind nodes.
///
/// The kind precondition is the caller's burden (`Expression::equal_to`
/// checks it); reaching the mismatch arm is a programmer error.
fn equal_cells<T: Scalar>(lhs: &ExpressionNode<T>, rhs: &ExpressionNode<T>) -> bool {
    match (lhs, rhs) {
        (ExpressionNode::Constant(a), ExpressionNode::Constant(b)) => a == b,
        (ExpressionNode::Var(a), ExpressionNode::Var(b)) => a.equal_to(b),
        (
            ExpressionNode::Add {
                constant: c1,
                terms: m1,
            },
            ExpressionNode::Add {
                constant: c2,
                terms: m2,
            },
        ) => {
            c1 == c2
                && m1.len() == m2.len()
                && m1
                    .iter()
                    .zip(m2.iter())
                    .all(|((t1, k1), (t2, k2))| k1 == k2 && t1.equal_to(t2))
        }
        (
            ExpressionNode::Mul {
                constant: c1,
                factors: m1,
            },
            ExpressionNode::Mul {
                constant: c2,
                factors: m2,
            },
        ) => {
            c1 == c2
                && m1.len() == m2.len()
                && m1
                    .iter()
                    .zip(m2.iter())
                    .all(|((b1, e1), (b2, e2))| b1.equal_to(b2) && e1.equal_to(e2))
        }
        (ExpressionNode::Div(a1, b1), ExpressionNode::Div(a2, b2))
        | (ExpressionNode::Pow(a1, b1), ExpressionNode::Pow(a2, b2)) => {
            a1.equal_to(a2) && b1.equal_to(b2)
        }
        // two NaN cells are never equal, by design
        (ExpressionNode::NaN, ExpressionNode::NaN) => false,
        _ => panic!("cell equality invoked on cells of different kind"),
    }
}

fn is_nonnegative_integer_constant<T: Scalar>(e: &Expression<T>) -> bool {
    e.is_constant() && e.constant().to_exponent().is_some()
}

fn cmp_scalar<T: Scalar>(a: &T, b: &T) -> Ordering {
    // constructed cells never store incomparable scalar values (the NaN
    // sentinel is a kind of its own), so Equal is a safe fallback
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

impl<T: Scalar> PartialEq for Expression<T> {
    /// Key equivalence of the canonical order; unlike `equal_to` it treats
    /// NaN cells as equivalent so ordered maps stay coherent.
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T: Scalar> Eq for Expression<T> {}

impl<T: Scalar> PartialOrd for Expression<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Scalar> Ord for Expression<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        if Rc::ptr_eq(&self.cell, &other.cell) {
            return Ordering::Equal;
        }
        self.kind()
            .cmp(&other.kind())
            .then_with(|| cmp_cells(&self.cell.node, &other.cell.node))
    }
}

fn cmp_cells<T: Scalar>(lhs: &ExpressionNode<T>, rhs: &ExpressionNode<T>) -> Ordering {
    match (lhs, rhs) {
        (ExpressionNode::Constant(a), ExpressionNode::Constant(b)) => cmp_scalar(a, b),
        (ExpressionNode::Var(a), ExpressionNode::Var(b)) => a.cmp(b),
        (
            ExpressionNode::Add {
                constant: c1,
                terms: m1,
            },
            ExpressionNode::Add {
                constant: c2,
                terms: m2,
            },
        ) => cmp_scalar(c1, c2).then_with(|| {
            for ((t1, k1), (t2, k2)) in m1.iter().zip(m2.iter()) {
                let ord = t1.cmp(t2).then_with(|| cmp_scalar(k1, k2));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            m1.len().cmp(&m2.len())
        }),
        (
            ExpressionNode::Mul {
                constant: c1,
                factors: m1,
            },
            ExpressionNode::Mul {
                constant: c2,
                factors: m2,
            },
        ) => cmp_scalar(c1, c2).then_with(|| {
            for ((b1, e1), (b2, e2)) in m1.iter().zip(m2.iter()) {
                let ord = b1.cmp(b2).then_with(|| e1.cmp(e2));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            m1.len().cmp(&m2.len())
        }),
        (ExpressionNode::Div(a1, b1), ExpressionNode::Div(a2, b2))
        | (ExpressionNode::Pow(a1, b1), ExpressionNode::Pow(a2, b2)) => {
            a1.cmp(a2).then_with(|| b1.cmp(b2))
        }
        (ExpressionNode::NaN, ExpressionNode::NaN) => Ordering::Equal,
        _ => unreachable!("cmp_cells invoked on cells of different kind"),
    }
}

impl<T: Scalar> Default for Expression<T> {
    /// the constant zero
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Scalar> From<T> for Expression<T> {
    fn from(value: T) -> Self {
        Expression::new_constant(value)
    }
}

impl<T: Scalar> From<Variable> for Expression<T> {
    fn from(var: Variable) -> Self {
        Expression::new_variable(var)
    }
}

impl<T: Scalar> From<&Variable> for Expression<T> {
    fn from(var: &Variable) -> Self {
        Expression::new_variable(var.clone())
    }
}

//___________________________________DISPLAY____________________________________

/// Canonical textual form. Deterministic because term/factor maps iterate
/// in the expression total order; a diagnostic format, not a wire format.
impl<T: Scalar> fmt::Display for Expression<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.cell.node {
            ExpressionNode::Constant(v) => write!(f, "{}", v),
            ExpressionNode::Var(v) => write!(f, "{}", v),
            ExpressionNode::Add { constant, terms } => display_add(f, constant, terms),
            ExpressionNode::Mul { constant, factors } => display_mul(f, constant, factors),
            ExpressionNode::Div(e1, e2) => write!(f, "({} / {})", e1, e2),
            ExpressionNode::Pow(e1, e2) => write!(f, "pow({}, {})", e1, e2),
            ExpressionNode::NaN => write!(f, "NaN"),
        }
    }
}

fn display_add<T: Scalar>(f: &mut fmt::Formatter, constant: &T, terms: &TermMap<T>) -> fmt::Result {
    write!(f, "(")?;
    let mut printed = false;
    if *constant != T::zero() {
        write!(f, "{}", constant)?;
        printed = true;
    }
    for (term, coeff) in terms {
        if coeff.is_negative() {
            write!(f, "{}", if printed { " - " } else { "-" })?;
        } else if printed {
            write!(f, " + ")?;
        }
        let magnitude = coeff.abs();
        if magnitude != T::one() {
            write!(f, "{} * ", magnitude)?;
        }
        write!(f, "{}", term)?;
        printed = true;
    }
    write!(f, ")")
}

fn display_mul<T: Scalar>(
    f: &mut fmt::Formatter,
    constant: &T,
    factors: &FactorMap<T>,
) -> fmt::Result {
    write!(f, "(")?;
    let mut printed = false;
    if *constant != T::one() {
        write!(f, "{}", constant)?;
        printed = true;
    }
    for (base, exponent) in factors {
        if printed {
            write!(f, " * ")?;
        }
        if exponent.is_constant_value(&T::one()) {
            write!(f, "{}", base)?;
        } else {
            write!(f, "pow({}, {})", base, exponent)?;
        }
        printed = true;
    }
    write!(f, ")")
}

/// expressions over `i32`
pub type ExpressionI = Expression<i32>;
/// expressions over `i64`
pub type ExpressionL = Expression<i64>;
/// expressions over `f32`
pub type ExpressionF = Expression<f32>;
/// expressions over `f64`
pub type ExpressionD = Expression<f64>;
