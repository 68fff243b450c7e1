//! Shared CLI utilities for reading input, building the parser and reporting errors

use std::fs;
use std::io::{self, Read};
use std::process;
use typesig_core::{SignatureParser, TypeCatalog};

/// Name shown in diagnostics for signatures given on the command line
pub const ARG_SOURCE: &str = "<arg>";

/// Read text from a file or stdin.
/// If `file` is "-", reads from stdin. Otherwise reads from the specified file.
pub fn read_source(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(file)
    }
}

/// Build a catalog from an optional RON extension file
pub fn load_catalog(path: Option<&str>) -> Result<TypeCatalog, String> {
    let Some(path) = path else {
        return Ok(TypeCatalog::default());
    };
    let source =
        read_source(path).map_err(|err| format!("Error reading catalog '{path}': {err}"))?;
    let catalog = TypeCatalog::from_ron_str(&source).map_err(|err| format!("{path}: {err}"))?;
    tracing::debug!(path, extensions = catalog.extensions().len(), "loaded catalog");
    Ok(catalog)
}

/// Parser for the given catalog file, exiting on failure
pub fn load_parser(catalog: Option<&str>) -> SignatureParser {
    match load_catalog(catalog) {
        Ok(catalog) => SignatureParser::with_catalog(catalog),
        Err(message) => {
            eprintln!("{message}");
            process::exit(1);
        }
    }
}
