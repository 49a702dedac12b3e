//! Convert a block tree to a sequence of tokens.

use crate::{block::Block, Error, Result};
use serde::{Deserialize, Serialize};

/// A token produced from a block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Token {
    /// A space-delimited word.
    Atom(String),

    /// The tokens of a nested block.
    Group(Vec<Token>),

    /// The tokens between a pair of parentheses on one line.
    Parenthesized(Vec<Token>),
}

impl Token {
    /// Create an atom.
    pub fn atom(word: impl Into<String>) -> Self {
        Token::Atom(word.into())
    }

    /// The word contained in this token, if it's an atom.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Token::Atom(word) => Some(word),
            _ => None,
        }
    }
}

/// Tokenize a block and, recursively, its children.
///
/// The block's own words come first, followed by one [`Token::Group`] per
/// child block in source order. Parentheses may nest at most `max_depth`
/// deep on a single line.
pub fn tokenize(block: &Block, max_depth: usize) -> Result<Vec<Token>> {
    let mut tokens = tokenize_line(&block.text, max_depth)?;

    for child in &block.children {
        tokens.push(Token::Group(tokenize(child, max_depth)?));
    }

    Ok(tokens)
}

fn tokenize_line(text: &str, max_depth: usize) -> Result<Vec<Token>> {
    // The bottom of the stack is the line itself; every open parenthesis pushes
    // a new level.
    let mut stack = vec![Vec::new()];
    let mut word_start = None;

    fn push(stack: &mut [Vec<Token>], token: Token) {
        if let Some(level) = stack.last_mut() {
            level.push(token);
        }
    }

    for (index, c) in text.char_indices() {
        if !matches!(c, ' ' | '(' | ')') {
            word_start.get_or_insert(index);
            continue;
        }

        if let Some(start) = word_start.take() {
            push(&mut stack, Token::atom(&text[start..index]));
        }

        match c {
            '(' => {
                if stack.len() > max_depth {
                    return Err(Error::NestingTooDeep { limit: max_depth });
                }

                stack.push(Vec::new());
            }
            ')' => {
                if stack.len() == 1 {
                    return Err(Error::UnbalancedParenthesis {
                        found: Some(String::from(")")),
                    });
                }

                if let Some(contents) = stack.pop() {
                    push(&mut stack, Token::Parenthesized(contents));
                }
            }
            _ => {}
        }
    }

    if let Some(start) = word_start {
        push(&mut stack, Token::atom(&text[start..]));
    }

    if stack.len() != 1 {
        return Err(Error::UnbalancedParenthesis { found: None });
    }

    Ok(stack.pop().unwrap_or_default())
}
