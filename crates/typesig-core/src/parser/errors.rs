//! Conversion of chumsky errors into [`SignatureError`]s

use chumsky::error::{Rich, RichPattern, RichReason};

use super::lexer::Token;
use crate::ast::Span;
use crate::error::SignatureError;

/// First lexer error as a `Lex` error
pub fn lex_error(errors: Vec<Rich<'_, char>>) -> SignatureError {
    let Some(err) = errors.into_iter().next() else {
        return SignatureError::Lex {
            message: "invalid input".to_string(),
            span: Span::default(),
        };
    };

    let message = match err.reason() {
        RichReason::ExpectedFound {
            found: Some(c), ..
        } => format!("unrecognized character '{}'", c.escape_debug()),
        RichReason::ExpectedFound { found: None, .. } => "unexpected end of input".to_string(),
        RichReason::Custom(msg) => msg.to_string(),
    };

    SignatureError::Lex {
        message,
        span: Span::from_chumsky(*err.span()),
    }
}

/// First parser error as a `Syntax` error
pub fn syntax_error(errors: Vec<Rich<'_, Token<'_>>>) -> SignatureError {
    let Some(err) = errors.into_iter().next() else {
        return SignatureError::Syntax {
            message: "invalid signature".to_string(),
            span: Span::default(),
        };
    };

    let message = match err.reason() {
        RichReason::ExpectedFound { expected, found } => {
            let found = match found {
                Some(tok) => format!("'{}'", &**tok),
                None => "end of input".to_string(),
            };
            let mut expected: Vec<String> = expected.iter().filter_map(describe_pattern).collect();
            expected.sort();
            expected.dedup();
            if expected.is_empty() {
                format!("unexpected {found}")
            } else {
                format!("expected {}, found {found}", expected.join(" or "))
            }
        }
        RichReason::Custom(msg) => msg.to_string(),
    };

    SignatureError::Syntax {
        message,
        span: Span::from_chumsky(*err.span()),
    }
}

fn describe_pattern(pattern: &RichPattern<'_, Token<'_>>) -> Option<String> {
    match pattern {
        RichPattern::Token(tok) => Some(format!("'{}'", &**tok)),
        RichPattern::Label(label) => Some(label.to_string()),
        RichPattern::EndOfInput => Some("end of input".to_string()),
        _ => None,
    }
}
