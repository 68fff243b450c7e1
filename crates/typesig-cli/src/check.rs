//! `check` subcommand handler

use crate::utils::{load_parser, read_source};
use std::collections::HashMap;
use std::process;
use typesig_core::diagnostics::DiagnosticKind;
use typesig_core::{Diagnostic, Severity, SignatureError, SignatureParser, Span};

/// Parse and resolve one signature, numbers included. Returns its canonical form.
fn check_signature(parser: &SignatureParser, signature: &str) -> Result<String, SignatureError> {
    let result = parser.parse_string(signature)?;
    if let Some(node) = result.as_type() {
        parser.arg_type(node)?;
    }
    Ok(result.expr.to_string())
}

/// Check every signature line in `source`.
/// Blank lines and lines starting with '#' are skipped. Diagnostic spans are
/// offsets into the whole of `source`. A signature whose canonical form
/// repeats an earlier line is reported as a warning.
pub fn check_source(parser: &SignatureParser, source: &str, filename: &str) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut offset = 0;

    for (index, line) in source.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += line.len();

        let text = line.trim_end_matches(['\n', '\r']);
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match check_signature(parser, text) {
            Ok(canonical) => {
                if let Some(first) = seen.get(&canonical) {
                    let start = line_start + (text.len() - trimmed.len());
                    let span = Span::new(start, line_start + text.trim_end().len());
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticKind::Duplicate,
                            format!("duplicate signature `{canonical}`"),
                            span,
                            filename.to_string(),
                        )
                        .with_note(format!("first listed on line {first}")),
                    );
                } else {
                    seen.insert(canonical, index + 1);
                }
            }
            Err(err) => {
                let mut diag = err.to_diagnostic(filename, text);
                diag.span = Span::new(line_start + diag.span.start, line_start + diag.span.end);
                diagnostics.push(diag);
            }
        }
    }

    diagnostics
}

/// Resolve every signature in a file without printing the results
pub fn handle_check(catalog: Option<&str>, file: &str) {
    let source = match read_source(file) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading file '{file}': {err}");
            process::exit(1);
        }
    };

    let parser = load_parser(catalog);
    let diagnostics = check_source(&parser, &source, file);
    for diag in &diagnostics {
        eprint!("{}", diag.format(&source));
    }

    let errors = diagnostics
        .iter()
        .filter(|diag| diag.severity == Severity::Error)
        .count();
    if errors > 0 {
        eprintln!("{errors} signature(s) failed");
        process::exit(1);
    }
    println!("Check: OK");
}
