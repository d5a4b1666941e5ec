//! # Variable Set
//!
//! An ordered set of variables, iterated in id order. Produced by
//! `Expression::variables()` and consumed wherever a free-variable set is
//! needed. Beyond plain set semantics it carries the union (`+`),
//! difference (`-`), intersection and subset/superset checks of the
//! collaborating containers.

use crate::symbolic::variable::Variable;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Ordered set of [`Variable`] values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Variables {
    vars: BTreeSet<Variable>,
}

impl Variables {
    /// empty set
    pub fn new() -> Self {
        Variables {
            vars: BTreeSet::new(),
        }
    }

    /// number of variables in the set
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// true when the set holds no variable
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Inserts a variable; duplicates are ignored.
    pub fn insert(&mut self, var: Variable) {
        self.vars.insert(var);
    }

    /// Removes a variable, returning whether it was present.
    pub fn remove(&mut self, var: &Variable) -> bool {
        self.vars.remove(var)
    }

    /// membership test
    pub fn contains(&self, var: &Variable) -> bool {
        self.vars.contains(var)
    }

    /// iteration in id order
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    /// true when every variable of `self` is in `other`
    pub fn is_subset_of(&self, other: &Variables) -> bool {
        self.vars.is_subset(&other.vars)
    }

    /// true when every variable of `other` is in `self`
    pub fn is_superset_of(&self, other: &Variables) -> bool {
        self.vars.is_superset(&other.vars)
    }

    /// subset and not equal
    pub fn is_strict_subset_of(&self, other: &Variables) -> bool {
        self.vars.len() < other.vars.len() && self.is_subset_of(other)
    }

    /// superset and not equal
    pub fn is_strict_superset_of(&self, other: &Variables) -> bool {
        self.vars.len() > other.vars.len() && self.is_superset_of(other)
    }

    /// Returns the variables present in both sets.
    pub fn intersect(&self, other: &Variables) -> Variables {
        Variables {
            vars: self.vars.intersection(&other.vars).cloned().collect(),
        }
    }
}

impl FromIterator<Variable> for Variables {
    fn from_iter<I: IntoIterator<Item = Variable>>(iter: I) -> Self {
        Variables {
            vars: iter.into_iter().collect(),
        }
    }
}

impl From<Variable> for Variables {
    fn from(var: Variable) -> Self {
        let mut vars = Variables::new();
        vars.insert(var);
        vars
    }
}

impl AddAssign<&Variables> for Variables {
    fn add_assign(&mut self, rhs: &Variables) {
        for var in rhs.iter() {
            self.vars.insert(var.clone());
        }
    }
}

impl AddAssign<Variable> for Variables {
    fn add_assign(&mut self, rhs: Variable) {
        self.vars.insert(rhs);
    }
}

impl Add<&Variables> for Variables {
    type Output = Variables;

    fn add(mut self, rhs: &Variables) -> Self::Output {
        self += rhs;
        self
    }
}

impl Add<Variable> for Variables {
    type Output = Variables;

    fn add(mut self, rhs: Variable) -> Self::Output {
        self += rhs;
        self
    }
}

impl SubAssign<&Variables> for Variables {
    fn sub_assign(&mut self, rhs: &Variables) {
        for var in rhs.iter() {
            self.vars.remove(var);
        }
    }
}

impl SubAssign<Variable> for Variables {
    fn sub_assign(&mut self, rhs: Variable) {
        self.vars.remove(&rhs);
    }
}

impl Sub<&Variables> for Variables {
    type Output = Variables;

    fn sub(mut self, rhs: &Variables) -> Self::Output {
        self -= rhs;
        self
    }
}

impl Sub<Variable> for Variables {
    type Output = Variables;

    fn sub(mut self, rhs: Variable) -> Self::Output {
        self -= rhs;
        self
    }
}

impl fmt::Display for Variables {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{}}}", self.vars.iter().join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_and_difference() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");
        let xy: Variables = [x.clone(), y.clone()].into_iter().collect();
        let yz: Variables = [y.clone(), z.clone()].into_iter().collect();

        let all = xy.clone() + &yz;
        assert_eq!(all.len(), 3);
        assert!(all.contains(&x) && all.contains(&y) && all.contains(&z));

        let only_x = xy.clone() - &yz;
        assert_eq!(only_x.len(), 1);
        assert!(only_x.contains(&x));
    }

    #[test]
    fn test_subset_checks() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let xy: Variables = [x.clone(), y.clone()].into_iter().collect();
        let just_x = Variables::from(x.clone());

        assert!(just_x.is_subset_of(&xy));
        assert!(just_x.is_strict_subset_of(&xy));
        assert!(xy.is_superset_of(&just_x));
        assert!(xy.is_subset_of(&xy));
        assert!(!xy.is_strict_subset_of(&xy));
    }

    #[test]
    fn test_intersection_and_display() {
        let x = Variable::new("x");
        let y = Variable::new("y");
        let z = Variable::new("z");
        let xy: Variables = [x.clone(), y.clone()].into_iter().collect();
        let yz: Variables = [y.clone(), z.clone()].into_iter().collect();
        let common = xy.intersect(&yz);
        assert_eq!(common.len(), 1);
        assert!(common.contains(&y));
        assert_eq!(common.to_string(), "{y}");
    }

    #[test]
    fn test_iteration_is_id_ordered() {
        let a = Variable::new("a");
        let b = Variable::new("b");
        let set: Variables = [b.clone(), a.clone()].into_iter().collect();
        let ids: Vec<_> = set.iter().map(|v| v.id()).collect();
        assert_eq!(ids, vec![a.id(), b.id()]);
    }
}
