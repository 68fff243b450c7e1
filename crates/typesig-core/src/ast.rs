//! Abstract Syntax Tree for signature type expressions
//!
//! A parse produces one root [`Expr`]. Type nodes nest through [`TypeArg`],
//! whose leaves are integer parameters. The `Display` impls are the renderer:
//! they print the canonical textual form of any node.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::TypeCatalog;
use crate::error::SignatureError;
use crate::types::FuncArgType;

mod params;
mod span;

pub use params::IntegerParameter;
pub use span::Span;

/// Root of a parsed signature string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// Bare signed integer literal, kept verbatim (`2`, `-2`)
    Number(String),
    Type(TypeNode),
}

impl Expr {
    pub fn as_type(&self) -> Option<&TypeNode> {
        match self {
            Expr::Type(node) => Some(node),
            Expr::Number(_) => None,
        }
    }

    pub fn into_type(self) -> Option<TypeNode> {
        match self {
            Expr::Type(node) => Some(node),
            Expr::Number(_) => None,
        }
    }
}

/// A type expression: base name, nullability marker and optional arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeNode {
    pub name: String,
    pub nullable: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub args: Vec<TypeArg>,
}

/// One argument between `<` and `>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeArg {
    Type(TypeNode),
    Integer(IntegerParameter),
}

impl TypeNode {
    pub fn new(name: impl Into<String>, nullable: bool, args: Vec<TypeArg>) -> Self {
        Self {
            name: name.into(),
            nullable,
            args,
        }
    }

    /// A node without arguments
    pub fn simple(name: impl Into<String>, nullable: bool) -> Self {
        Self::new(name, nullable, Vec::new())
    }

    /// True for `any` and its labelled forms (`any1`, `anyT`, ...)
    pub fn is_wildcard(&self) -> bool {
        TypeCatalog::is_wildcard_name(&self.name)
    }

    /// Short name of this node's base type in the built-in catalog.
    pub fn short_type(&self) -> Result<&'static str, SignatureError> {
        TypeCatalog::builtin().short_name(&self.name)
    }

    /// Resolve this node against the built-in catalog.
    pub fn arg_type(&self) -> Result<FuncArgType, SignatureError> {
        TypeCatalog::builtin().resolve(self)
    }
}

impl TypeArg {
    pub fn as_type(&self) -> Option<&TypeNode> {
        match self {
            TypeArg::Type(node) => Some(node),
            TypeArg::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<&IntegerParameter> {
        match self {
            TypeArg::Integer(param) => Some(param),
            TypeArg::Type(_) => None,
        }
    }
}

impl From<TypeNode> for TypeArg {
    fn from(node: TypeNode) -> Self {
        TypeArg::Type(node)
    }
}

impl From<IntegerParameter> for TypeArg {
    fn from(param: IntegerParameter) -> Self {
        TypeArg::Integer(param)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(text) => f.write_str(text),
            Expr::Type(node) => write!(f, "{node}"),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.nullable {
            f.write_str("?")?;
        }
        if self.args.is_empty() {
            return Ok(());
        }

        // Parameter-only lists stay compact: decimal<10,5>, decimal<P,S>
        let separator = if self.args.iter().all(|a| matches!(a, TypeArg::Integer(_))) {
            ","
        } else {
            ", "
        };

        f.write_str("<")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(">")
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeArg::Type(node) => write!(f, "{node}"),
            TypeArg::Integer(param) => write!(f, "{param}"),
        }
    }
}
