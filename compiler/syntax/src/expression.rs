//! The grouped expression tree and its canonical rendering.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A fully grouped expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type", content = "value")]
pub enum Expression {
    /// A literal or identifier.
    Atom(String),

    /// An operator applied to its operands, or, without an operator, the
    /// application of the first operand to the rest.
    #[serde(rename_all = "camelCase")]
    List {
        /// The operator's symbol, if the list was split on one.
        operator: Option<String>,

        /// The operands, in source order. Never empty.
        operands: Vec<Expression>,
    },
}

impl Expression {
    /// Create an atom.
    pub fn atom(word: impl Into<String>) -> Self {
        Expression::Atom(word.into())
    }

    /// Apply `operator` to `operands`.
    pub fn operator(operator: impl Into<String>, operands: Vec<Expression>) -> Self {
        Expression::List {
            operator: Some(operator.into()),
            operands,
        }
    }

    /// Juxtapose `operands` without an operator.
    pub fn application(operands: Vec<Expression>) -> Self {
        Expression::List {
            operator: None,
            operands,
        }
    }

    /// The symbol of the operator at the root of this expression, if any.
    pub fn operator_symbol(&self) -> Option<&str> {
        match self {
            Expression::List {
                operator: Some(operator),
                ..
            } => Some(operator),
            _ => None,
        }
    }

    /// The operands at the root of this expression; empty for atoms.
    pub fn operands(&self) -> &[Expression] {
        match self {
            Expression::Atom(_) => &[],
            Expression::List { operands, .. } => operands,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Atom(word) => f.write_str(word),
            Expression::List { operator, operands } => {
                f.write_str("(")?;

                if let Some(operator) = operator {
                    f.write_str(operator)?;

                    if !operands.is_empty() {
                        f.write_str(" ")?;
                    }
                }

                write!(f, "{})", operands.iter().format(" "))
            }
        }
    }
}

/// Render an expression in canonical, fully parenthesized form.
pub fn render(expression: &Expression) -> String {
    expression.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_render_bare() {
        insta::assert_snapshot!(render(&Expression::atom("x")), @"x");
    }

    #[test]
    fn operators_render_first() {
        let expression = Expression::operator(
            "=",
            vec![
                Expression::atom("fn"),
                Expression::operator(
                    "~",
                    vec![
                        Expression::application(vec![Expression::atom("x")]),
                        Expression::operator(
                            "+",
                            vec![Expression::atom("x"), Expression::atom("1")],
                        ),
                    ],
                ),
            ],
        );

        insta::assert_snapshot!(render(&expression), @"(= fn (~ (x) (+ x 1)))");
    }

    #[test]
    fn applications_render_without_an_operator() {
        let expression = Expression::application(vec![
            Expression::atom("last"),
            Expression::operator("+", vec![Expression::atom("1"), Expression::atom("2")]),
            Expression::atom("3"),
        ]);

        insta::assert_snapshot!(render(&expression), @"(last (+ 1 2) 3)");
    }

    #[test]
    fn accessors_see_the_root() {
        let expression =
            Expression::operator("*", vec![Expression::atom("2"), Expression::atom("3")]);

        assert_eq!(expression.operator_symbol(), Some("*"));
        assert_eq!(expression.operands().len(), 2);
        assert!(Expression::atom("2").operands().is_empty());
    }
}
