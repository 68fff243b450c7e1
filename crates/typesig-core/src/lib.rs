pub mod ast;
pub mod catalog;
pub mod diagnostics;
pub mod error;
pub mod parser;
pub mod resolve;
pub mod types;

// Re-export commonly used types for convenience
pub use ast::{Expr, IntegerParameter, Span, TypeArg, TypeNode};
pub use catalog::{ArgKind, ArgRule, TypeCatalog};
pub use diagnostics::{Diagnostic, Severity};
pub use error::SignatureError;
pub use parser::{ParseResult, SignatureParser, parse};
pub use types::{FuncArgType, Nullability, ScalarKind, TimestampPrecision, TypeKind};
