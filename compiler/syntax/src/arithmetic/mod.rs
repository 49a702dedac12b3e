//! A recursive-descent parser for conventional infix arithmetic.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | '(' expression ')'
//! ```
//!
//! Unlike [`group`](crate::group::group), operators here always build binary,
//! left-associative nodes: `1 - 2 - 3` is `(- (- 1 2) 3)`.

mod lexer;
mod parser;

pub use lexer::{lex, Token};

use crate::{Error, Expression, Result};
use serde::{Deserialize, Serialize};

/// An arithmetic operator.
#[allow(missing_docs)]
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumString,
    strum::Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    #[strum(serialize = "+")]
    Add,

    #[strum(serialize = "-")]
    Subtract,

    #[strum(serialize = "*")]
    Multiply,

    #[strum(serialize = "/")]
    Divide,
}

/// Parse `source`, allowing parentheses to nest at most `max_depth` deep.
pub fn parse(source: &str, max_depth: usize) -> Result<Expression> {
    let tokens = lex(source);
    if tokens.is_empty() {
        return Err(Error::EmptyInput);
    }

    tracing::debug!(tokens = tokens.len(), "lexed arithmetic expression");

    parser::Parser::new(tokens, max_depth).parse()
}
