//! `parse`, `short` and `resolve` subcommand handlers

use crate::utils::{ARG_SOURCE, load_parser};
use std::process;
use typesig_core::diagnostics::DiagnosticKind;
use typesig_core::{Diagnostic, Expr, ParseResult, SignatureError, SignatureParser, Span, TypeNode};

/// Run `f` over every signature, printing its output or a diagnostic.
/// Exits with status 1 if any signature failed.
fn for_each_signature<F>(parser: &SignatureParser, signatures: &[String], mut f: F)
where
    F: FnMut(&SignatureParser, &str) -> Result<String, Diagnostic>,
{
    let mut failed = false;
    for signature in signatures {
        match f(parser, signature) {
            Ok(output) => println!("{output}"),
            Err(diag) => {
                eprint!("{}", diag.format(signature));
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

fn diagnose(signature: &str) -> impl Fn(SignatureError) -> Diagnostic + '_ {
    move |err| err.to_diagnostic(ARG_SOURCE, signature)
}

/// The type a signature names, or an error if it is a bare number
pub fn signature_type<'a>(
    result: &'a ParseResult,
    signature: &str,
) -> Result<&'a TypeNode, Diagnostic> {
    match &result.expr {
        Expr::Type(node) => Ok(node),
        Expr::Number(text) => Err(Diagnostic::error(
            DiagnosticKind::Resolve,
            format!("'{text}' is a number literal, not a type"),
            Span::new(0, signature.len()),
            ARG_SOURCE.to_string(),
        )),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("<unserializable: {err}>"))
}

/// Print the canonical form (or the JSON syntax tree) of each signature
pub fn handle_parse(catalog: Option<&str>, signatures: &[String], json: bool) {
    let parser = load_parser(catalog);
    for_each_signature(&parser, signatures, |parser, signature| {
        let result = parser.parse_string(signature).map_err(diagnose(signature))?;
        Ok(if json {
            to_json(&result.expr)
        } else {
            result.expr.to_string()
        })
    });
}

/// Print the short name of each signature's base type
pub fn handle_short(catalog: Option<&str>, signatures: &[String]) {
    let parser = load_parser(catalog);
    for_each_signature(&parser, signatures, |parser, signature| {
        let result = parser.parse_string(signature).map_err(diagnose(signature))?;
        let node = signature_type(&result, signature)?;
        parser
            .short_type(node)
            .map(str::to_string)
            .map_err(diagnose(signature))
    });
}

/// Print the resolved argument type of each signature
pub fn handle_resolve(catalog: Option<&str>, signatures: &[String], json: bool) {
    let parser = load_parser(catalog);
    for_each_signature(&parser, signatures, |parser, signature| {
        let result = parser.parse_string(signature).map_err(diagnose(signature))?;
        let node = signature_type(&result, signature)?;
        let resolved = parser.arg_type(node).map_err(diagnose(signature))?;
        Ok(if json {
            to_json(&resolved)
        } else {
            format!("{resolved} ({:?})", resolved.kind())
        })
    });
}
