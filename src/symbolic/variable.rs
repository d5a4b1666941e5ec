//! # Symbolic Variable
//!
//! A variable is a named entity identified by a process-unique id. The name
//! is only used for display; identity, equality, ordering and hashing all
//! go through the id, so two variables created with the same name are still
//! different variables.
//!
//! Id 0 is reserved for the *dummy* (anonymous) variable produced by
//! `Variable::default()`. All dummy variables compare equal to each other.
//! The dummy is a placeholder meaning "no variable" and is rejected by
//! every evaluation context (see `Environment`).

use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use strum_macros::Display;

/// Unique identifier of a variable.
pub type VariableId = u64;

/// Supported domains of a symbolic variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum VariableType {
    /// takes a floating value
    Continuous,
    /// takes an integer value
    Integer,
    /// takes an integer value from {0, 1}
    Binary,
    /// takes a boolean value
    Boolean,
}

// id 0 is reserved for the dummy variable
static NEXT_VARIABLE_ID: AtomicU64 = AtomicU64::new(1);

fn next_variable_id() -> VariableId {
    NEXT_VARIABLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// A symbolic variable.
///
/// Cheap to clone: the name is shared. The default-constructed variable is
/// the dummy sentinel with id 0 and no name.
#[derive(Clone, Debug)]
pub struct Variable {
    id: VariableId,
    variable_type: VariableType,
    name: Option<Rc<str>>,
}

impl Variable {
    /// Creates a fresh continuous variable with the given display name.
    pub fn new(name: &str) -> Self {
        Self::new_typed(name, VariableType::Continuous)
    }

    /// Creates a fresh variable with the given display name and type.
    pub fn new_typed(name: &str, variable_type: VariableType) -> Self {
        Variable {
            id: next_variable_id(),
            variable_type,
            name: Some(Rc::from(name)),
        }
    }

    /// unique identifier; 0 for the dummy variable
    pub fn id(&self) -> VariableId {
        self.id
    }

    /// type tag of the variable
    pub fn variable_type(&self) -> VariableType {
        self.variable_type
    }

    /// Checks whether this is the dummy (anonymous) variable.
    ///
    /// The dummy variable is a placeholder representing "no variable" and
    /// must not be used in any evaluation context.
    pub fn is_dummy(&self) -> bool {
        self.id == 0
    }

    /// display name; the dummy variable has none
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Two variables are equal when they have the same id.
    pub fn equal_to(&self, other: &Variable) -> bool {
        self.id == other.id
    }

    /// Ordering on ids.
    pub fn less(&self, other: &Variable) -> bool {
        self.id < other.id
    }
}

impl Default for Variable {
    /// the dummy variable
    fn default() -> Self {
        Variable {
            id: 0,
            variable_type: VariableType::Continuous,
            name: None,
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "<dummy>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_unique() {
        let x = Variable::new("x");
        let x2 = Variable::new("x");
        assert_ne!(x.id(), x2.id());
        assert!(!x.equal_to(&x2));
        assert_eq!(x.name(), x2.name());
    }

    #[test]
    fn test_dummy_variables_are_all_equal() {
        let d1 = Variable::default();
        let d2 = Variable::default();
        assert!(d1.is_dummy());
        assert!(d1.equal_to(&d2));
        assert_eq!(d1.id(), 0);
    }

    #[test]
    fn test_ordering_follows_creation() {
        let a = Variable::new("a");
        let b = Variable::new("b");
        assert!(a.less(&b));
        assert!(!b.less(&a));
        assert!(Variable::default().less(&a));
    }

    #[test]
    fn test_display() {
        let v = Variable::new_typed("velocity", VariableType::Integer);
        assert_eq!(v.to_string(), "velocity");
        assert_eq!(v.variable_type(), VariableType::Integer);
        assert_eq!(Variable::default().to_string(), "<dummy>");
    }
}
