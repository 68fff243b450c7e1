//! Error taxonomy for signature parsing and resolution

use thiserror::Error;

use crate::ast::Span;
use crate::diagnostics::{Diagnostic, DiagnosticKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Unrecognized character or malformed numeric token
    #[error("lex error at offset {}: {message}", .span.start)]
    Lex { message: String, span: Span },

    /// Grammar violation: unbalanced brackets, empty argument list, trailing input
    #[error("syntax error at offset {}: {message}", .span.start)]
    Syntax { message: String, span: Span },

    /// Argument count or kind does not match the base type
    #[error("type '{name}' {message}")]
    Arity { name: String, message: String },

    #[error("unknown type '{name}'")]
    UnknownType { name: String },

    #[error("catalog error: {message}")]
    Catalog { message: String },
}

impl SignatureError {
    pub fn arity(name: &str, message: impl Into<String>) -> Self {
        SignatureError::Arity {
            name: name.to_string(),
            message: message.into(),
        }
    }

    pub fn unknown_type(name: &str) -> Self {
        SignatureError::UnknownType {
            name: name.to_string(),
        }
    }

    /// Source location, for errors raised while reading the input
    pub fn span(&self) -> Option<Span> {
        match self {
            SignatureError::Lex { span, .. } | SignatureError::Syntax { span, .. } => Some(*span),
            _ => None,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            SignatureError::Lex { .. } => DiagnosticKind::Lex,
            SignatureError::Syntax { .. } => DiagnosticKind::Syntax,
            SignatureError::Arity { .. }
            | SignatureError::UnknownType { .. } => DiagnosticKind::Resolve,
            SignatureError::Catalog { .. } => DiagnosticKind::Catalog,
        }
    }

    /// Message without the location prefix used by `Display`
    pub fn message(&self) -> String {
        match self {
            SignatureError::Lex { message, .. } | SignatureError::Syntax { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }

    /// Convert into a diagnostic against `source`, the text that was parsed.
    /// Errors without a location underline the whole input.
    pub fn to_diagnostic(&self, filename: &str, source: &str) -> Diagnostic {
        let span = self.span().unwrap_or_else(|| Span::new(0, source.len()));
        let diag = Diagnostic::error(self.kind(), self.message(), span, filename.to_string());
        match self {
            SignatureError::Arity { .. } => {
                diag.with_help("check the number and kind of arguments between '<' and '>'")
            }
            SignatureError::Syntax { .. } if self.message().contains("end of input") => {
                diag.with_note("the signature may be missing a closing '>'")
            }
            _ => diag,
        }
    }
}
