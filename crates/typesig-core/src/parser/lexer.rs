//! Tokenizer for signature strings
//!
//! Produces identifier runs, signed integer runs and the punctuation
//! `<`, `>`, `,` and `?`. Whitespace between tokens is skipped.

use chumsky::prelude::*;
use std::fmt;

pub type Spanned<T> = (T, SimpleSpan);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token<'src> {
    Ident(&'src str),
    /// Signed decimal literal, validated to fit in an `i32`
    Int(&'src str),
    Lt,
    Gt,
    Comma,
    Question,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s) | Token::Int(s) => f.write_str(s),
            Token::Lt => f.write_str("<"),
            Token::Gt => f.write_str(">"),
            Token::Comma => f.write_str(","),
            Token::Question => f.write_str("?"),
        }
    }
}

/// Lexer over the raw string
pub fn lexer<'src>()
-> impl Parser<'src, &'src str, Vec<Spanned<Token<'src>>>, extra::Err<Rich<'src, char>>> {
    let ident_char = any().filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_');

    let int = just('-')
        .or_not()
        .then(text::digits(10))
        .to_slice()
        .then_ignore(ident_char.not())
        .try_map(|s: &str, span| match s.parse::<i32>() {
            Ok(_) => Ok(Token::Int(s)),
            Err(_) => Err(Rich::custom(
                span,
                format!("integer literal '{s}' does not fit in 32 bits"),
            )),
        });

    // A sign with no digits is kept as a token so the error stays on the '-'
    let stray_minus = just('-')
        .then_ignore(text::digits(10).not())
        .to_slice()
        .validate(|s: &'src str, e, emitter| {
            emitter.emit(Rich::custom(e.span(), "'-' must be followed by digits"));
            Token::Int(s)
        });

    let ident = text::ascii::ident().map(Token::Ident);

    let punct = choice((
        just('<').to(Token::Lt),
        just('>').to(Token::Gt),
        just(',').to(Token::Comma),
        just('?').to(Token::Question),
    ));

    let token = choice((int, ident, punct, stray_minus)).map_with(|tok, e| (tok, e.span()));

    // leading whitespace is skipped once so blank input yields no tokens
    text::whitespace().ignore_then(
        token
            .then_ignore(text::whitespace())
            .repeated()
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignatureError;
    use pretty_assertions::assert_eq;

    fn tokens(src: &str) -> Vec<Token<'_>> {
        lexer()
            .parse(src)
            .into_result()
            .expect("lex failed")
            .into_iter()
            .map(|(tok, _)| tok)
            .collect()
    }

    #[test]
    fn test_lex_nested_signature() {
        assert_eq!(
            tokens("list?<decimal<10, -5>>"),
            vec![
                Token::Ident("list"),
                Token::Question,
                Token::Lt,
                Token::Ident("decimal"),
                Token::Lt,
                Token::Int("10"),
                Token::Comma,
                Token::Int("-5"),
                Token::Gt,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_lex_spans_skip_whitespace() {
        let toks = lexer().parse("  i16 ?").into_result().unwrap();
        assert_eq!(toks[0].1, SimpleSpan::from(2..5));
        assert_eq!(toks[1].1, SimpleSpan::from(6..7));
    }

    #[test]
    fn test_lex_identifiers_with_digits_and_underscores() {
        assert_eq!(
            tokens("precision_timestamp_tz<L1>"),
            vec![
                Token::Ident("precision_timestamp_tz"),
                Token::Lt,
                Token::Ident("L1"),
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_lex_rejects_unknown_character() {
        let errs = lexer().parse("i32$").into_errors();
        assert!(!errs.is_empty());
        assert_eq!(errs[0].span().start, 3);
    }

    #[test]
    fn test_lex_rejects_malformed_numbers() {
        assert!(lexer().parse("12abc").has_errors());
        assert!(lexer().parse("99999999999").has_errors());
        assert!(lexer().parse("-").has_errors());
    }

    #[test]
    fn test_lex_blank_input_has_no_tokens() {
        assert_eq!(tokens(""), vec![]);
        assert_eq!(tokens("   \t "), vec![]);
    }

    #[test]
    fn test_lex_lone_minus_points_at_the_sign() {
        for (src, offset) in [("-", 0), ("list<->", 5), ("- 2", 0)] {
            match crate::parser::parse(src) {
                Err(SignatureError::Lex { message, span }) => {
                    assert_eq!(span.start, offset, "{src}");
                    assert_eq!(span.end, offset + 1, "{src}");
                    assert!(message.contains("'-'"), "{src}: {message}");
                }
                other => panic!("{src}: expected a lex error, got {other:?}"),
            }
        }
    }
}
