//! Group a token sequence into an expression tree using a
//! [`PrecedenceTable`].

mod table;

pub use table::PrecedenceTable;

use crate::{tokenize::Token, Error, Expression, Grammar, Result};
use itertools::Itertools;

/// Group `tokens` into a single expression.
///
/// The first operator in the table that occurs in the sequence governs: the
/// sequence is split at _every_ occurrence of it, and each span between the
/// occurrences is grouped recursively. `1 + 2 + 3` therefore becomes one
/// `+` node with three operands rather than nested binary nodes. A sequence
/// containing no operator is an application of its tokens.
///
/// Parenthesized tokens starting with an operator are read in the prefix form
/// produced by [`render`](crate::render), so rendering and reparsing yields
/// the same tree.
pub fn group(tokens: Vec<Token>, grammar: &Grammar) -> Result<Expression> {
    if tokens.is_empty() {
        return Err(Error::EmptyInput);
    }

    let expression = Grouper {
        operators: &grammar.operators,
        max_depth: grammar.max_depth,
    }
    .span(tokens, 0)?;

    tracing::debug!(%expression, "grouped tokens");

    Ok(expression)
}

struct Grouper<'a> {
    operators: &'a PrecedenceTable,
    max_depth: usize,
}

impl Grouper<'_> {
    fn descend(&self, depth: usize) -> Result<usize> {
        if depth >= self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        Ok(depth + 1)
    }

    fn span(&self, mut tokens: Vec<Token>, depth: usize) -> Result<Expression> {
        let depth = self.descend(depth)?;

        if tokens.len() == 1 {
            if let Some(token) = tokens.pop() {
                return self.token(token, depth);
            }
        }

        let split = self.operators.iter().find_map(|operator| {
            let positions = tokens
                .iter()
                .positions(|token| token.as_atom() == Some(operator))
                .collect::<Vec<_>>();

            (!positions.is_empty()).then_some((operator, positions))
        });

        let Some((operator, positions)) = split else {
            return self.application(tokens, depth);
        };

        tracing::trace!(operator, occurrences = positions.len(), "splitting span");

        let mut operands = Vec::with_capacity(positions.len() + 1);
        for (index, span) in split_at(tokens, &positions).into_iter().enumerate() {
            if span.is_empty() {
                return Err(Error::MissingOperand {
                    operator: String::from(operator),
                });
            }

            operands.push(if index == 0 && self.operators.is_binder(operator) {
                self.parameters(span, depth)?
            } else {
                self.span(span, depth)?
            });
        }

        Ok(Expression::operator(operator, operands))
    }

    fn token(&self, token: Token, depth: usize) -> Result<Expression> {
        match token {
            Token::Atom(word) => Ok(Expression::Atom(word)),
            Token::Group(tokens) => {
                // Only reachable from token sequences built outside `tokenize`.
                if tokens.is_empty() {
                    return Err(Error::UnknownConstruct(String::from("an empty block")));
                }

                self.span(tokens, depth)
            }
            Token::Parenthesized(tokens) => self.parenthesized(tokens, depth),
        }
    }

    fn parenthesized(&self, tokens: Vec<Token>, depth: usize) -> Result<Expression> {
        let depth = self.descend(depth)?;

        let operator = match tokens.first() {
            None => return Err(Error::UnknownConstruct(String::from("`()`"))),
            Some(token) => token
                .as_atom()
                .filter(|&symbol| self.operators.contains(symbol))
                .map(String::from),
        };

        let Some(operator) = operator else {
            return self.span(tokens, depth);
        };

        if tokens.len() == 1 {
            return Err(Error::MissingOperand { operator });
        }

        let binder = self.operators.is_binder(&operator);

        let operands = tokens
            .into_iter()
            .skip(1)
            .enumerate()
            .map(|(index, token)| match token {
                Token::Parenthesized(parameters) if index == 0 && binder => {
                    self.parameters(parameters, depth)
                }
                token if index == 0 && binder => self.parameters(vec![token], depth),
                token => self.token(token, depth),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Expression::List {
            operator: Some(operator),
            operands,
        })
    }

    fn parameters(&self, tokens: Vec<Token>, depth: usize) -> Result<Expression> {
        if tokens.is_empty() {
            return Err(Error::UnknownConstruct(String::from(
                "an empty parameter list",
            )));
        }

        self.application(tokens, depth)
    }

    fn application(&self, tokens: Vec<Token>, depth: usize) -> Result<Expression> {
        let operands = tokens
            .into_iter()
            .map(|token| self.token(token, depth))
            .collect::<Result<Vec<_>>>()?;

        Ok(Expression::application(operands))
    }
}

/// Split `tokens` around the operators at `positions`, dropping the operators.
fn split_at(tokens: Vec<Token>, positions: &[usize]) -> Vec<Vec<Token>> {
    let mut positions = positions.iter().copied().peekable();

    let mut spans = vec![Vec::new()];
    for (index, token) in tokens.into_iter().enumerate() {
        if positions.next_if_eq(&index).is_some() {
            spans.push(Vec::new());
            continue;
        }

        if let Some(span) = spans.last_mut() {
            span.push(token);
        }
    }

    spans
}
