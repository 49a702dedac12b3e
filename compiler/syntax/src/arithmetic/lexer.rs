//! Split arithmetic source into tokens.

use crate::arithmetic::Operator;
use logos::Logos;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Logos)]
#[logos(skip r#"[ \t\r\n]+"#)]
enum RawToken<'src> {
    #[token("(")]
    LeftParenthesis,

    #[token(")")]
    RightParenthesis,

    #[regex(r#"[-+*/]"#, |lex| lex.slice().parse::<Operator>().ok())]
    Operator(Operator),

    #[regex(r#"[0-9]+(\.[0-9]*)?|\.[0-9]+"#, |lex| lex.slice())]
    Number(&'src str),
}

/// A token in an arithmetic expression.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Token<'src> {
    LeftParenthesis,
    RightParenthesis,
    Operator(Operator),
    Number(&'src str),

    /// Any other character. The parser rejects it if it reaches it.
    Unknown(&'src str),
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftParenthesis => f.write_str("("),
            Token::RightParenthesis => f.write_str(")"),
            Token::Operator(operator) => write!(f, "{operator}"),
            Token::Number(number) | Token::Unknown(number) => f.write_str(number),
        }
    }
}

/// Split an arithmetic expression into tokens.
///
/// Consecutive digits, along with at most one decimal point, form a single
/// number. Whitespace is skipped, and every other character is a token of its
/// own.
pub fn lex(source: &str) -> Vec<Token<'_>> {
    RawToken::lexer(source)
        .spanned()
        .map(|(result, span)| match result {
            Ok(RawToken::LeftParenthesis) => Token::LeftParenthesis,
            Ok(RawToken::RightParenthesis) => Token::RightParenthesis,
            Ok(RawToken::Operator(operator)) => Token::Operator(operator),
            Ok(RawToken::Number(number)) => Token::Number(number),
            Err(()) => Token::Unknown(source.get(span).unwrap_or_default()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_merge_into_numbers() {
        assert_eq!(
            lex("12+3.5 * .25"),
            [
                Token::Number("12"),
                Token::Operator(Operator::Add),
                Token::Number("3.5"),
                Token::Operator(Operator::Multiply),
                Token::Number(".25"),
            ]
        );
    }

    #[test]
    fn a_second_decimal_point_starts_a_new_number() {
        assert_eq!(lex("1.2.3"), [Token::Number("1.2"), Token::Number(".3")]);
    }

    #[test]
    fn other_characters_stand_alone() {
        assert_eq!(
            lex("(x)"),
            [
                Token::LeftParenthesis,
                Token::Unknown("x"),
                Token::RightParenthesis,
            ]
        );
    }
}
