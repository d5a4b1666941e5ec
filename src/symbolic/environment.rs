//! # Environment
//!
//! A mapping from variables to scalar values, consumed by expression
//! evaluation. The two lookup flavors have deliberately different failure
//! semantics:
//!
//! - [`Environment::at`] is fail-fast: a missing key is an
//!   `UnboundVariable` error carrying the variable, which `evaluate`
//!   forwards unchanged;
//! - [`Environment::get`] is optional: partial evaluation and substitution
//!   use it to leave unbound variables alone.
//!
//! Inserting the dummy variable, or a value that is not a number, is a
//! programmer error and panics.

use crate::symbolic::error::{SymbolicError, SymbolicResult};
use crate::symbolic::scalar::Scalar;
use crate::symbolic::variable::Variable;
use crate::symbolic::variables::Variables;
use itertools::Itertools;
use std::collections::HashMap;
use std::fmt;

/// Variable to value binding used during evaluation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment<T: Scalar> {
    map: HashMap<Variable, T>,
}

impl<T: Scalar> Environment<T> {
    /// empty environment
    pub fn new() -> Self {
        Environment {
            map: HashMap::new(),
        }
    }

    /// number of bindings
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// true when no variable is bound
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Binds `var` to `value` if it is not bound yet; an existing binding
    /// is kept unchanged.
    ///
    /// # Panics
    /// Panics when `var` is the dummy variable or `value` is not a number.
    pub fn insert(&mut self, var: &Variable, value: T) {
        assert!(
            !var.is_dummy(),
            "cannot bind the dummy variable in an environment"
        );
        assert!(value == value, "cannot bind variable '{}' to NaN", var);
        self.map.entry(var.clone()).or_insert(value);
    }

    /// Binds `var` to `value`, overwriting an existing binding.
    ///
    /// # Panics
    /// Panics when `var` is the dummy variable or `value` is not a number.
    pub fn insert_or_assign(&mut self, var: &Variable, value: T) {
        assert!(
            !var.is_dummy(),
            "cannot bind the dummy variable in an environment"
        );
        assert!(value == value, "cannot bind variable '{}' to NaN", var);
        self.map.insert(var.clone(), value);
    }

    /// Fail-fast lookup: the value bound to `var`, or an
    /// [`SymbolicError::UnboundVariable`] carrying the variable.
    pub fn at(&self, var: &Variable) -> SymbolicResult<T> {
        self.map
            .get(var)
            .copied()
            .ok_or_else(|| SymbolicError::UnboundVariable(var.clone()))
    }

    /// Optional lookup.
    pub fn get(&self, var: &Variable) -> Option<&T> {
        self.map.get(var)
    }

    /// membership test
    pub fn contains(&self, var: &Variable) -> bool {
        self.map.contains_key(var)
    }

    /// The set of bound variables.
    pub fn domain(&self) -> Variables {
        self.map.keys().cloned().collect()
    }

    /// iteration over bindings, unordered
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, &T)> {
        self.map.iter()
    }
}

impl<T: Scalar> FromIterator<(Variable, T)> for Environment<T> {
    /// # Panics
    /// Panics when the bindings include the dummy variable or a NaN value.
    fn from_iter<I: IntoIterator<Item = (Variable, T)>>(iter: I) -> Self {
        let mut env = Environment::new();
        for (var, value) in iter {
            env.insert_or_assign(&var, value);
        }
        env
    }
}

impl<T: Scalar> fmt::Display for Environment<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // sorted for a deterministic rendering; the map itself is unordered
        write!(
            f,
            "{{{}}}",
            self.map
                .iter()
                .sorted_by_key(|(var, _)| var.id())
                .map(|(var, value)| format!("{} -> {}", var, value))
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_vs_get() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let mut env = Environment::new();
        env.insert(&x, 2.0);

        assert_eq!(env.at(&x).unwrap(), 2.0);
        assert_eq!(env.get(&y), None);
        match env.at(&y) {
            Err(SymbolicError::UnboundVariable(var)) => assert!(var.equal_to(&y)),
            other => panic!("expected UnboundVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_insert_keeps_existing_binding() {
        let x = Variable::new("x");
        let mut env = Environment::new();
        env.insert(&x, 1.0);
        env.insert(&x, 5.0);
        assert_eq!(env.at(&x).unwrap(), 1.0);
        env.insert_or_assign(&x, 5.0);
        assert_eq!(env.at(&x).unwrap(), 5.0);
    }

    #[test]
    #[should_panic(expected = "dummy variable")]
    fn test_dummy_variable_is_rejected() {
        let mut env = Environment::new();
        env.insert(&Variable::default(), 1.0);
    }

    #[test]
    #[should_panic(expected = "NaN")]
    fn test_nan_value_is_rejected() {
        let x = Variable::new("x");
        let mut env = Environment::new();
        env.insert(&x, f64::NAN);
    }

    #[test]
    fn test_domain() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let env: Environment<i32> = [(x.clone(), 1), (y.clone(), 2)].into_iter().collect();
        let domain = env.domain();
        assert_eq!(domain.len(), 2);
        assert!(domain.contains(&x) && domain.contains(&y));
    }
}
