//! User-facing rendering of signature errors
//!
//! A [`Diagnostic`] pairs a message with a byte span in the parsed text and
//! renders a snippet with a caret underline:
//!
//! ```text
//! error: expected '>', found end of input
//!   --> <arg>:1:12
//!   |
//! 1 | list<i32
//!   |         ^
//!   |
//! ```

use crate::ast::Span;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Stage that produced the diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    Lex,
    Syntax,
    Resolve,
    Catalog,
    /// A signature repeated within one input
    Duplicate,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::Lex => "lex",
            DiagnosticKind::Syntax => "syntax",
            DiagnosticKind::Resolve => "resolve",
            DiagnosticKind::Catalog => "catalog",
            DiagnosticKind::Duplicate => "duplicate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub filename: String,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn error(kind: DiagnosticKind, message: String, span: Span, filename: String) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message,
            span,
            filename,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn warning(kind: DiagnosticKind, message: String, span: Span, filename: String) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(kind, message, span, filename)
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Format the diagnostic with a snippet of `source`
    pub fn format(&self, source: &str) -> String {
        let line_index = LineIndex::new(source);
        let mut output = format!("{}: {}\n", self.severity.as_str(), self.message);

        let (start_line, start_col) = line_index.line_col(self.span.start);
        let (end_line, end_col) = line_index.line_col(self.span.end);
        output.push_str(&format!(
            "  --> {}:{}:{}\n",
            self.filename, start_line, start_col
        ));

        let width = end_line.to_string().len();
        output.push_str(&format!("{:width$} |\n", ""));
        for line_num in start_line..=end_line {
            let Some((line_start, line_end)) = line_index.line_range(line_num) else {
                continue;
            };
            let line_text = &source[line_start..line_end.min(source.len())];
            output.push_str(&format!("{line_num:width$} | {line_text}\n"));

            let from = if line_num == start_line { start_col - 1 } else { 0 };
            let to = if line_num == end_line {
                end_col - 1
            } else {
                line_text.chars().count()
            };
            let underline_width = to.saturating_sub(from).max(1);
            output.push_str(&format!(
                "{:width$} | {}^{}\n",
                "",
                " ".repeat(from),
                "~".repeat(underline_width - 1)
            ));
        }
        output.push_str(&format!("{:width$} |\n", ""));

        for note in &self.notes {
            output.push_str(&format!("note: {note}\n"));
        }
        if let Some(help) = &self.help {
            output.push_str(&format!("help: {help}\n"));
        }
        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at {}:{}",
            self.severity.as_str(),
            self.message,
            self.filename,
            self.span
        )
    }
}

/// Offset to line/column conversion
#[derive(Debug)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// (line, column), both 1-indexed
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        (line + 1, offset.saturating_sub(self.line_starts[line]) + 1)
    }

    /// Byte range of a 1-indexed line, excluding the newline
    pub fn line_range(&self, line: usize) -> Option<(usize, usize)> {
        if line == 0 || line > self.line_starts.len() {
            return None;
        }
        let start = self.line_starts[line - 1];
        let end = match self.line_starts.get(line) {
            Some(next) => next.saturating_sub(1),
            None => usize::MAX,
        };
        Some((start, end))
    }
}
