//! Integer parameters of parameterized types

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric slot of a parameterized type, such as the length of
/// `varchar<L1>` or the precision and scale of `decimal<10,5>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntegerParameter {
    /// A literal value written in the signature
    Concrete(i32),
    /// A named placeholder bound later by type inference
    Variable(String),
}

impl IntegerParameter {
    pub fn concrete(value: i32) -> Self {
        IntegerParameter::Concrete(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        IntegerParameter::Variable(name.into())
    }

    pub fn as_concrete(&self) -> Option<i32> {
        match self {
            IntegerParameter::Concrete(value) => Some(*value),
            IntegerParameter::Variable(_) => None,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, IntegerParameter::Variable(_))
    }
}

impl fmt::Display for IntegerParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegerParameter::Concrete(value) => write!(f, "{value}"),
            IntegerParameter::Variable(name) => f.write_str(name),
        }
    }
}
