//! Type catalog: the table of known base names
//!
//! Each entry maps a base name to its short name and a [`TypeClass`]. The class
//! decides how many arguments the type takes and of what kind ([`ArgRule`]),
//! which the resolver checks uniformly before building a value.
//!
//! The built-in table is fixed. Extension types can be layered on top, for
//! example from a RON file:
//!
//! ```ron
//! (
//!     types: [
//!         (name: "point", short_name: "pt", min_args: 0, max_args: Some(0), arg_kind: Empty),
//!         (name: "vector", short_name: "vec", min_args: 1, max_args: Some(1), arg_kind: Type),
//!     ],
//! )
//! ```

use serde::{Deserialize, Serialize};

use crate::ast::{TypeArg, TypeNode};
use crate::error::SignatureError;
use crate::types::{FuncArgType, ScalarKind};

/// What an argument slot accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArgKind {
    /// The type takes no arguments
    Empty,
    /// Integer parameters (`5`, `L1`)
    Integer,
    /// Nested types
    Type,
    /// Either, per slot
    Mixed,
}

/// Argument count and kind expected by a base type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArgRule {
    pub min: usize,
    /// `None` means unbounded
    pub max: Option<usize>,
    pub kind: ArgKind,
}

impl ArgRule {
    pub const fn none() -> Self {
        Self {
            min: 0,
            max: Some(0),
            kind: ArgKind::Empty,
        }
    }

    pub const fn exactly(count: usize, kind: ArgKind) -> Self {
        Self {
            min: count,
            max: Some(count),
            kind,
        }
    }

    pub const fn at_least(count: usize, kind: ArgKind) -> Self {
        Self {
            min: count,
            max: None,
            kind,
        }
    }

    /// Check a node's arguments against this rule: count first, then kind.
    pub fn check(&self, node: &TypeNode) -> Result<(), SignatureError> {
        let found = node.args.len();
        let count_ok = found >= self.min && self.max.is_none_or(|max| found <= max);
        if !count_ok {
            return Err(SignatureError::arity(
                &node.name,
                format!("expects {}, found {found}", self.describe_count()),
            ));
        }

        for (i, arg) in node.args.iter().enumerate() {
            let mismatch = match (self.kind, arg) {
                (ArgKind::Integer, TypeArg::Type(inner)) => {
                    Some(format!("an integer parameter, found type `{inner}`"))
                }
                (ArgKind::Type, TypeArg::Integer(param)) => {
                    Some(format!("a type, found integer parameter `{param}`"))
                }
                _ => None,
            };
            if let Some(detail) = mismatch {
                return Err(SignatureError::arity(
                    &node.name,
                    format!("argument {} must be {detail}", i + 1),
                ));
            }
        }
        Ok(())
    }

    fn describe_count(&self) -> String {
        let noun = match self.kind {
            ArgKind::Empty => return "no arguments".to_string(),
            ArgKind::Integer => "integer parameter",
            ArgKind::Type => "type argument",
            ArgKind::Mixed => "argument",
        };
        let plural = |n: usize| if n == 1 { noun.to_string() } else { format!("{noun}s") };
        match self.max {
            Some(0) => "no arguments".to_string(),
            Some(max) if max == self.min => format!("exactly {max} {}", plural(max)),
            Some(max) => format!("between {} and {max} {}", self.min, plural(max)),
            None => format!("at least {} {}", self.min, plural(self.min)),
        }
    }
}

/// How a base name is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Scalar(ScalarKind),
    FixedChar,
    VarChar,
    FixedBinary,
    Decimal,
    PrecisionTimestamp,
    PrecisionTimestampTz,
    List,
    Map,
    Struct,
    Any,
    Extension(ArgRule),
}

impl TypeClass {
    pub fn rule(&self) -> ArgRule {
        match self {
            TypeClass::Scalar(_) | TypeClass::Any => ArgRule::none(),
            TypeClass::FixedChar
            | TypeClass::VarChar
            | TypeClass::FixedBinary
            | TypeClass::PrecisionTimestamp
            | TypeClass::PrecisionTimestampTz => ArgRule::exactly(1, ArgKind::Integer),
            TypeClass::Decimal => ArgRule::exactly(2, ArgKind::Integer),
            TypeClass::List => ArgRule::exactly(1, ArgKind::Type),
            TypeClass::Map => ArgRule::exactly(2, ArgKind::Type),
            TypeClass::Struct => ArgRule::at_least(1, ArgKind::Type),
            TypeClass::Extension(rule) => *rule,
        }
    }
}

/// Built-in base names: (name, short name, class)
const BUILTIN_TYPES: &[(&str, &str, TypeClass)] = &[
    ("boolean", "bool", TypeClass::Scalar(ScalarKind::Boolean)),
    ("i8", "i8", TypeClass::Scalar(ScalarKind::I8)),
    ("i16", "i16", TypeClass::Scalar(ScalarKind::I16)),
    ("i32", "i32", TypeClass::Scalar(ScalarKind::I32)),
    ("i64", "i64", TypeClass::Scalar(ScalarKind::I64)),
    ("fp32", "fp32", TypeClass::Scalar(ScalarKind::Fp32)),
    ("fp64", "fp64", TypeClass::Scalar(ScalarKind::Fp64)),
    ("string", "str", TypeClass::Scalar(ScalarKind::String)),
    ("binary", "vbin", TypeClass::Scalar(ScalarKind::Binary)),
    ("timestamp", "ts", TypeClass::Scalar(ScalarKind::Timestamp)),
    ("timestamp_tz", "tstz", TypeClass::Scalar(ScalarKind::TimestampTz)),
    ("date", "date", TypeClass::Scalar(ScalarKind::Date)),
    ("time", "time", TypeClass::Scalar(ScalarKind::Time)),
    ("interval_year", "iyear", TypeClass::Scalar(ScalarKind::IntervalYear)),
    ("interval_day", "iday", TypeClass::Scalar(ScalarKind::IntervalDay)),
    ("uuid", "uuid", TypeClass::Scalar(ScalarKind::Uuid)),
    ("fixedchar", "fchar", TypeClass::FixedChar),
    ("varchar", "vchar", TypeClass::VarChar),
    ("fixedbinary", "fbin", TypeClass::FixedBinary),
    ("decimal", "dec", TypeClass::Decimal),
    ("precision_timestamp", "prets", TypeClass::PrecisionTimestamp),
    ("precision_timestamp_tz", "pretstz", TypeClass::PrecisionTimestampTz),
    ("list", "list", TypeClass::List),
    ("map", "map", TypeClass::Map),
    ("struct", "struct", TypeClass::Struct),
    ("any", "any", TypeClass::Any),
];

/// An extension type entry as written in a catalog file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionType {
    pub name: String,
    pub short_name: String,
    #[serde(default)]
    pub min_args: usize,
    #[serde(default)]
    pub max_args: Option<usize>,
    pub arg_kind: ArgKind,
}

impl ExtensionType {
    pub fn rule(&self) -> ArgRule {
        ArgRule {
            min: self.min_args,
            max: self.max_args,
            kind: self.arg_kind,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<ExtensionType>,
}

/// A catalog lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeEntry<'a> {
    pub short_name: &'a str,
    pub class: TypeClass,
}

/// The set of base names the parser and resolvers recognize
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeCatalog {
    extensions: Vec<ExtensionType>,
}

impl TypeCatalog {
    /// The fixed built-in catalog, shared by every caller.
    pub fn builtin() -> &'static TypeCatalog {
        static BUILTIN: TypeCatalog = TypeCatalog {
            extensions: Vec::new(),
        };
        &BUILTIN
    }

    /// Built-in types plus the given extensions.
    pub fn with_extensions(
        extensions: impl IntoIterator<Item = ExtensionType>,
    ) -> Result<Self, SignatureError> {
        let mut catalog = TypeCatalog::default();
        for ext in extensions {
            catalog.add_extension(ext)?;
        }
        Ok(catalog)
    }

    /// Parse a RON catalog file (see the module docs for the format).
    pub fn from_ron_str(source: &str) -> Result<Self, SignatureError> {
        let file: CatalogFile = ron::from_str(source).map_err(|e| SignatureError::Catalog {
            message: format!("invalid catalog file: {e}"),
        })?;
        tracing::debug!(count = file.types.len(), "loaded extension types");
        Self::with_extensions(file.types)
    }

    pub fn add_extension(&mut self, ext: ExtensionType) -> Result<(), SignatureError> {
        let catalog_err = |message: String| Err(SignatureError::Catalog { message });

        if !is_identifier(&ext.name) {
            return catalog_err(format!("'{}' is not a valid type name", ext.name));
        }
        if ext.short_name.is_empty() {
            return catalog_err(format!("extension type '{}' has an empty short name", ext.name));
        }
        if Self::is_wildcard_name(&ext.name) || builtin_entry(&ext.name).is_some() {
            return catalog_err(format!("extension type '{}' shadows a built-in type", ext.name));
        }
        if self.extensions.iter().any(|e| e.name == ext.name) {
            return catalog_err(format!("extension type '{}' is defined twice", ext.name));
        }
        let rule = ext.rule();
        if rule.max.is_some_and(|max| max < rule.min) {
            return catalog_err(format!(
                "extension type '{}' has max_args below min_args",
                ext.name
            ));
        }
        if rule.kind == ArgKind::Empty && rule.max != Some(0) {
            return catalog_err(format!(
                "extension type '{}' takes no arguments but allows some",
                ext.name
            ));
        }

        self.extensions.push(ext);
        Ok(())
    }

    pub fn extensions(&self) -> &[ExtensionType] {
        &self.extensions
    }

    /// True for `any` followed by any letters or digits
    pub fn is_wildcard_name(name: &str) -> bool {
        name.strip_prefix("any")
            .is_some_and(|label| label.chars().all(|c| c.is_ascii_alphanumeric()))
    }

    pub fn lookup(&self, name: &str) -> Option<TypeEntry<'_>> {
        if let Some(entry) = builtin_entry(name) {
            return Some(entry);
        }
        if let Some(ext) = self.extensions.iter().find(|e| e.name == name) {
            return Some(TypeEntry {
                short_name: &ext.short_name,
                class: TypeClass::Extension(ext.rule()),
            });
        }
        if Self::is_wildcard_name(name) {
            return Some(TypeEntry {
                short_name: "any",
                class: TypeClass::Any,
            });
        }
        None
    }

    pub fn is_type_name(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Every exact base name in the catalog, built-ins first
    pub fn names(&self) -> impl Iterator<Item = &str> {
        BUILTIN_TYPES
            .iter()
            .map(|(name, _, _)| *name)
            .chain(self.extensions.iter().map(|e| e.name.as_str()))
    }

    pub fn short_name(&self, name: &str) -> Result<&str, SignatureError> {
        self.lookup(name)
            .map(|entry| entry.short_name)
            .ok_or_else(|| SignatureError::unknown_type(name))
    }

    pub fn rule(&self, name: &str) -> Result<ArgRule, SignatureError> {
        self.lookup(name)
            .map(|entry| entry.class.rule())
            .ok_or_else(|| SignatureError::unknown_type(name))
    }

    pub fn resolve(&self, node: &TypeNode) -> Result<FuncArgType, SignatureError> {
        crate::resolve::resolve(self, node)
    }
}

fn builtin_entry(name: &str) -> Option<TypeEntry<'static>> {
    BUILTIN_TYPES
        .iter()
        .find(|(builtin, _, _)| *builtin == name)
        .map(|(_, short_name, class)| TypeEntry {
            short_name: *short_name,
            class: *class,
        })
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
