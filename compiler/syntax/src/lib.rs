//! Compiler pass that turns indented source code into a fully parenthesized
//! expression tree.
//!
//! Parsing runs in stages, each consuming the complete output of the one
//! before it:
//!
//! 1. [`block::build`] turns indented lines into a tree of [`block::Block`]s.
//! 2. [`tokenize::tokenize`] turns a block into a sequence of
//!    [`tokenize::Token`]s, with nested blocks becoming groups.
//! 3. [`group::group`] splits the tokens by a [`PrecedenceTable`] into an
//!    [`Expression`].
//! 4. [`render`] prints the expression in canonical, fully parenthesized form.
//!
//! [`arithmetic`] is a separate recursive-descent parser for conventional
//! infix arithmetic that produces the same [`Expression`] type.

pub mod arithmetic;
pub mod block;
pub mod expression;
pub mod group;
pub mod tokenize;

pub use expression::{render, Expression};
pub use group::PrecedenceTable;

use serde::{Deserialize, Serialize};

/// The number of columns making up one level of indentation.
pub const INDENT_WIDTH: usize = 2;

/// Lines whose first non-blank character is this are comments.
pub const COMMENT_PREFIX: char = '#';

/// How deeply expressions may nest before parsing gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// The grammar used by [`parse_block_language_with`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    /// The operators to split on, loosest first.
    pub operators: PrecedenceTable,

    /// The maximum nesting depth before parsing fails with
    /// [`Error::NestingTooDeep`].
    pub max_depth: usize,
}

impl Grammar {
    /// Use `operators` with the default nesting limit.
    pub fn with_operators(operators: PrecedenceTable) -> Self {
        Grammar {
            operators,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Grammar::with_operators(PrecedenceTable::default())
    }
}

/// An error occurring during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Error {
    /// A line's indentation is not a whole number of levels, contains a tab,
    /// or has no enclosing line.
    #[error("line {line}: malformed indentation ({width} leading columns)")]
    MalformedIndentation {
        /// The 1-based line number.
        line: usize,

        /// The number of leading whitespace characters.
        width: usize,
    },

    /// The input contained nothing to parse.
    #[error("nothing to parse")]
    EmptyInput,

    /// The parser needed another token, but the input ended.
    #[error("unexpected end of input")]
    CursorOverrun,

    /// The parser could not classify part of the input.
    #[error("cannot parse {0}")]
    UnknownConstruct(String),

    /// An operator is missing the expression on one of its sides.
    #[error("operator `{operator}` is missing an operand")]
    MissingOperand {
        /// The operator's symbol.
        operator: String,
    },

    /// A parenthesis has no partner.
    #[error(
        "unbalanced parenthesis{}",
        .found.as_deref().map_or_else(String::new, |found| format!(", found `{found}`"))
    )]
    UnbalancedParenthesis {
        /// The token found instead of the expected parenthesis, or `None` if
        /// the line or input ended first.
        found: Option<String>,
    },

    /// The input nests deeper than the configured limit.
    #[error("expression nests more than {limit} levels deep")]
    NestingTooDeep {
        /// The configured limit.
        limit: usize,
    },

    /// A precedence table could not be constructed.
    #[error("invalid precedence table: {0}")]
    InvalidTable(String),
}

/// The result of a parsing stage.
pub type Result<T> = std::result::Result<T, Error>;

/// Parse indented source code with the default [`Grammar`].
pub fn parse_block_language(text: &str) -> Result<Expression> {
    parse_block_language_with(text, &Grammar::default())
}

/// Parse indented source code with a custom [`Grammar`].
pub fn parse_block_language_with(text: &str, grammar: &Grammar) -> Result<Expression> {
    let root = block::build(text, grammar.max_depth)?;
    let tokens = tokenize::tokenize(&root, grammar.max_depth)?;
    group::group(tokens, grammar)
}

/// Parse a conventional infix arithmetic expression into binary nodes.
pub fn parse_arithmetic(text: &str) -> Result<Expression> {
    arithmetic::parse(text, DEFAULT_MAX_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1 + 2 + 3", "(+ 1 2 3)")]
    #[case("1 + 2\n3\n5 * 3", "(last (+ 1 2) 3 (* 5 3))")]
    #[case("fn = x ~ x + 1", "(= fn (~ (x) (+ x 1)))")]
    #[case("fn = x ~\n  x + 1", "(= fn (~ (x) (+ x 1)))")]
    #[case("1 + 2 * 3", "(* (+ 1 2) 3)")]
    fn parses_with_default_table(#[case] code: &str, #[case] expected: &str) {
        assert_eq!(render(&parse_block_language(code).unwrap()), expected);
    }

    #[test]
    fn conventional_table_binds_multiplication_tighter() {
        let grammar = Grammar::with_operators(PrecedenceTable::conventional());
        let expression = parse_block_language_with("1 + 2 * 3", &grammar).unwrap();
        assert_eq!(render(&expression), "(+ 1 (* 2 3))");
    }

    #[rstest]
    #[case("1 + 2 + 3")]
    #[case("1 + 2\n3\n5 * 3")]
    #[case("fn = x ~\n  x + 1")]
    #[case("a = f1 f2 f3 1 + 2 * 3 * 4 + 3 / 2 * 4")]
    #[case("fn = x ~\n\n  add\n\n    x - 2\n\n\n    1")]
    #[case("f x y ~ x * (y - 1)")]
    fn rendering_is_idempotent(#[case] code: &str) {
        let once = render(&parse_block_language(code).unwrap());
        let twice = render(&parse_block_language(&once).unwrap());
        assert_eq!(once, twice);
    }

    #[rstest]
    #[case("2 + 3")]
    #[case("1 + 2 * 3")]
    #[case("(1 + 2) * 3")]
    #[case("8 / 4 - 1")]
    fn engines_agree_on_shared_operators(#[case] code: &str) {
        let grammar = Grammar::with_operators(PrecedenceTable::conventional());
        let grouped = parse_block_language_with(code, &grammar).unwrap();
        let descended = parse_arithmetic(code).unwrap();
        assert_eq!(grouped, descended);
    }

    #[test]
    fn odd_indentation_is_rejected() {
        assert_eq!(
            parse_block_language("x =\n   1"),
            Err(Error::MalformedIndentation { line: 2, width: 3 })
        );
    }

    #[test]
    fn deeply_nested_parentheses_are_reported() {
        let code = format!("{}x{}", "(".repeat(200_000), ")".repeat(200_000));

        assert_eq!(
            parse_block_language(&code),
            Err(Error::NestingTooDeep {
                limit: DEFAULT_MAX_DEPTH
            })
        );
    }

    #[test]
    fn errors_display_their_cause() {
        insta::assert_snapshot!(
            Error::UnbalancedParenthesis { found: Some(String::from("3")) },
            @"unbalanced parenthesis, found `3`"
        );
        insta::assert_snapshot!(
            Error::UnbalancedParenthesis { found: None },
            @"unbalanced parenthesis"
        );
        insta::assert_snapshot!(
            Error::MissingOperand { operator: String::from("+") },
            @"operator `+` is missing an operand"
        );
    }
}
