//! Recursive-descent parser for signature type expressions
//!
//! Parsing runs in two passes: [`lexer::lexer`] turns the string into tokens,
//! then [`signature`] builds the tree with one token of lookahead.
//!
//! Argument lists hold either nested types or integer parameters. Which one an
//! argument is depends on its shape:
//! - an integer not followed by `?` or `<` is a concrete parameter;
//! - a name followed by `?` or `<`, or a name the catalog knows, is a type;
//! - any other bare name is a variable parameter (`L1`, `P`, `S`).

use chumsky::input::ValueInput;
use chumsky::prelude::*;

use crate::ast::{Expr, IntegerParameter, TypeArg, TypeNode};
use crate::catalog::TypeCatalog;
use crate::error::SignatureError;
use crate::types::FuncArgType;

mod errors;
pub mod lexer;

use lexer::Token;

type ParserError<'t, 'src> = extra::Err<Rich<'t, Token<'src>>>;

/// Leading token of a type expression
#[derive(Debug, Clone, Copy)]
enum Atom<'src> {
    Name(&'src str),
    Int(&'src str),
}

impl<'src> Atom<'src> {
    fn text(self) -> &'src str {
        match self {
            Atom::Name(s) | Atom::Int(s) => s,
        }
    }
}

/// Parser for one complete signature over a token stream
pub fn signature<'t, 'src: 't, I>(
    catalog: &'t TypeCatalog,
) -> impl Parser<'t, I, Expr, ParserError<'t, 'src>> + Clone
where
    I: ValueInput<'t, Token = Token<'src>, Span = SimpleSpan>,
{
    let atom = select! {
        Token::Ident(name) => Atom::Name(name),
        Token::Int(text) => Atom::Int(text),
    }
    .labelled("type name or integer");

    let nullable = just(Token::Question).or_not().map(|q| q.is_some());

    let argument = recursive(|argument| {
        let args = argument
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<TypeArg>>()
            .delimited_by(just(Token::Lt), just(Token::Gt));

        atom.clone()
            .then(nullable.clone())
            .then(args.or_not())
            .try_map(move |((atom, nullable), args), span| {
                classify_argument(catalog, atom, nullable, args, span)
            })
    });

    let args = argument
        .separated_by(just(Token::Comma))
        .at_least(1)
        .collect::<Vec<TypeArg>>()
        .delimited_by(just(Token::Lt), just(Token::Gt));

    atom.then(nullable)
        .then(args.or_not())
        .try_map(|((atom, nullable), args), span| match (atom, args) {
            (Atom::Int(_), None) if nullable => Err(Rich::custom(
                span,
                "a number literal cannot be marked nullable",
            )),
            (Atom::Int(text), None) => Ok(Expr::Number(text.to_string())),
            (atom, args) => Ok(Expr::Type(TypeNode::new(
                atom.text(),
                nullable,
                args.unwrap_or_default(),
            ))),
        })
        .then_ignore(end())
}

fn classify_argument<'t, 'src>(
    catalog: &TypeCatalog,
    atom: Atom<'src>,
    nullable: bool,
    args: Option<Vec<TypeArg>>,
    span: SimpleSpan,
) -> Result<TypeArg, Rich<'t, Token<'src>>> {
    match (atom, nullable, args) {
        (Atom::Int(text), false, None) => text
            .parse::<i32>()
            .map(|value| TypeArg::Integer(IntegerParameter::Concrete(value)))
            .map_err(|_| Rich::custom(span, format!("invalid integer parameter '{text}'"))),
        (Atom::Name(name), false, None) if !catalog.is_type_name(name) => {
            Ok(TypeArg::Integer(IntegerParameter::Variable(name.to_string())))
        }
        (atom, nullable, args) => Ok(TypeArg::Type(TypeNode::new(
            atom.text(),
            nullable,
            args.unwrap_or_default(),
        ))),
    }
}

/// Output of [`SignatureParser::parse_string`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult {
    pub expr: Expr,
}

impl ParseResult {
    pub fn as_type(&self) -> Option<&TypeNode> {
        self.expr.as_type()
    }
}

/// Reusable parser bound to a type catalog
///
/// Holds no mutable state, so one instance can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct SignatureParser {
    catalog: TypeCatalog,
}

impl SignatureParser {
    /// Parser over the built-in catalog
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: TypeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn parse_string(&self, input: &str) -> Result<ParseResult, SignatureError> {
        parse_with(&self.catalog, input).map(|expr| ParseResult { expr })
    }

    pub fn short_type(&self, node: &TypeNode) -> Result<&str, SignatureError> {
        self.catalog.short_name(&node.name)
    }

    pub fn arg_type(&self, node: &TypeNode) -> Result<FuncArgType, SignatureError> {
        self.catalog.resolve(node)
    }
}

/// Parse one signature against the built-in catalog
pub fn parse(input: &str) -> Result<Expr, SignatureError> {
    parse_with(TypeCatalog::builtin(), input)
}

fn parse_with(catalog: &TypeCatalog, input: &str) -> Result<Expr, SignatureError> {
    tracing::trace!(input, "parsing signature");

    let tokens = lexer::lexer()
        .parse(input)
        .into_result()
        .map_err(errors::lex_error)?;

    let eoi = SimpleSpan::from(input.len()..input.len());
    let expr = signature(catalog)
        .parse(tokens.as_slice().map(eoi, |(tok, span)| (tok, span)))
        .into_result()
        .map_err(errors::syntax_error)?;

    tracing::debug!(%expr, "parsed signature");
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Span;
    use crate::catalog::{ArgKind, ExtensionType};
    use pretty_assertions::assert_eq;

    fn parse_type(source: &str) -> TypeNode {
        match parse(source).expect("parse failed") {
            Expr::Type(node) => node,
            other => panic!("expected a type, got {other:?}"),
        }
    }

    fn int(value: i32) -> TypeArg {
        TypeArg::Integer(IntegerParameter::Concrete(value))
    }

    fn var(name: &str) -> TypeArg {
        TypeArg::Integer(IntegerParameter::Variable(name.to_string()))
    }

    fn ty(name: &str, nullable: bool, args: Vec<TypeArg>) -> TypeArg {
        TypeArg::Type(TypeNode::new(name, nullable, args))
    }

    // ===== Literals =====

    #[test]
    fn test_parse_bare_numbers() {
        assert_eq!(parse("2").unwrap(), Expr::Number("2".to_string()));
        assert_eq!(parse("-2").unwrap(), Expr::Number("-2".to_string()));
    }

    #[test]
    fn test_number_cannot_be_nullable() {
        let err = parse("2?").unwrap_err();
        assert!(matches!(err, SignatureError::Syntax { .. }));
    }

    // ===== Types =====

    #[test]
    fn test_parse_nullable_scalar() {
        assert_eq!(parse_type("i16?"), TypeNode::simple("i16", true));
        assert_eq!(parse_type("boolean"), TypeNode::simple("boolean", false));
    }

    #[test]
    fn test_nullability_does_not_leak_between_levels() {
        let node = parse_type("list?<decimal?<10,5>>");
        assert_eq!(
            node,
            TypeNode::new("list", true, vec![ty("decimal", true, vec![int(10), int(5)])])
        );

        let node = parse_type("list<decimal?<10,5>>");
        assert!(!node.nullable);
        assert!(node.args[0].as_type().is_some_and(|inner| inner.nullable));
    }

    #[test]
    fn test_variable_and_concrete_parameters() {
        assert_eq!(
            parse_type("varchar<L1>"),
            TypeNode::new("varchar", false, vec![var("L1")])
        );
        assert_eq!(
            parse_type("fixedchar<5>"),
            TypeNode::new("fixedchar", false, vec![int(5)])
        );
        assert_eq!(
            parse_type("decimal<38,S>"),
            TypeNode::new("decimal", false, vec![int(38), var("S")])
        );
    }

    #[test]
    fn test_known_names_are_types_not_variables() {
        let node = parse_type("struct<i16, any1, T>");
        assert_eq!(
            node.args,
            vec![ty("i16", false, vec![]), ty("any1", false, vec![]), var("T")]
        );
    }

    #[test]
    fn test_unknown_name_with_marker_is_a_type() {
        let node = parse_type("list<T?>");
        assert_eq!(node.args, vec![ty("T", true, vec![])]);
    }

    #[test]
    fn test_map_preserves_argument_order() {
        let node = parse_type("map<boolean?,struct?<i16?,i32?,i64?>>");
        assert_eq!(
            node.args,
            vec![
                ty("boolean", true, vec![]),
                ty(
                    "struct",
                    true,
                    vec![
                        ty("i16", true, vec![]),
                        ty("i32", true, vec![]),
                        ty("i64", true, vec![]),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_whitespace_is_tolerated() {
        let node = parse_type("  map < decimal < P , S > ,  i16 ? >  ");
        assert_eq!(node.to_string(), "map<decimal<P,S>, i16?>");
    }

    #[test]
    fn test_parser_accepts_semantically_wrong_arity() {
        // arity is checked by the resolver, not the parser
        assert_eq!(parse_type("decimal<10>").args, vec![int(10)]);
        assert_eq!(parse_type("list<5>").args, vec![int(5)]);
    }

    // ===== Errors =====

    #[test]
    fn test_lex_error_position() {
        let err = parse("list<i32$>").unwrap_err();
        match err {
            SignatureError::Lex { span, message } => {
                assert_eq!(span.start, 8);
                assert!(message.contains('$'), "{message}");
            }
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_argument_list() {
        let err = parse("list<>").unwrap_err();
        match err {
            SignatureError::Syntax { span, message } => {
                assert_eq!(span, Span::new(5, 6));
                assert!(message.contains("type name or integer"), "{message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_unclosed_argument_list() {
        let err = parse("list<i32").unwrap_err();
        match err {
            SignatureError::Syntax { span, message } => {
                assert_eq!(span.start, 8);
                assert!(message.contains("'>'"), "{message}");
                assert!(message.contains("end of input"), "{message}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(
            parse("i32 i64"),
            Err(SignatureError::Syntax { .. })
        ));
        assert!(matches!(
            parse("list<i32>>"),
            Err(SignatureError::Syntax { .. })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse(""), Err(SignatureError::Syntax { .. })));
        assert!(matches!(parse("   "), Err(SignatureError::Syntax { .. })));
    }

    // ===== Catalog-aware parsing =====

    #[test]
    fn test_extension_names_parse_as_types() {
        let catalog = TypeCatalog::with_extensions([ExtensionType {
            name: "point".to_string(),
            short_name: "pt".to_string(),
            min_args: 0,
            max_args: Some(0),
            arg_kind: ArgKind::Empty,
        }])
        .unwrap();
        let parser = SignatureParser::with_catalog(catalog);

        let result = parser.parse_string("list<point>").unwrap();
        let node = result.as_type().unwrap();
        assert_eq!(node.args, vec![ty("point", false, vec![])]);

        // without the extension the bare name is a variable
        assert_eq!(parse_type("list<point>").args, vec![var("point")]);
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let parser = std::sync::Arc::new(SignatureParser::new());
        let handles: Vec<_> = ["i16?", "decimal<P,S>", "map<i8, list<any>>"]
            .into_iter()
            .map(|src| {
                let parser = std::sync::Arc::clone(&parser);
                std::thread::spawn(move || parser.parse_string(src).map(|r| r.expr.to_string()))
            })
            .collect();
        let rendered: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert_eq!(rendered, vec!["i16?", "decimal<P,S>", "map<i8, list<any>>"]);
    }
}
