//! Cursor-based recursive descent over arithmetic tokens.

use crate::{
    arithmetic::{Operator, Token},
    Error, Expression, Result,
};

pub struct Parser<'src> {
    tokens: Vec<Token<'src>>,
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'src> Parser<'src> {
    pub fn new(tokens: Vec<Token<'src>>, max_depth: usize) -> Self {
        Parser {
            tokens,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    pub fn parse(mut self) -> Result<Expression> {
        let expression = self.expression()?;

        match self.current() {
            None => Ok(expression),
            Some(Token::RightParenthesis) => Err(Error::UnbalancedParenthesis {
                found: Some(String::from(")")),
            }),
            Some(token) => Err(Error::UnknownConstruct(format!(
                "`{token}` after the end of the expression"
            ))),
        }
    }

    fn current(&self) -> Option<Token<'src>> {
        self.tokens.get(self.position).copied()
    }

    fn advance(&mut self) -> Result<Token<'src>> {
        let token = self.current().ok_or(Error::CursorOverrun)?;
        self.position += 1;
        Ok(token)
    }

    fn binary(
        &mut self,
        operators: [Operator; 2],
        mut operand: impl FnMut(&mut Self) -> Result<Expression>,
    ) -> Result<Expression> {
        let mut left = operand(self)?;

        while let Some(Token::Operator(operator)) = self.current() {
            if !operators.contains(&operator) {
                break;
            }

            self.position += 1;
            let right = operand(self)?;

            left = Expression::operator(operator.to_string(), vec![left, right]);
        }

        Ok(left)
    }

    fn expression(&mut self) -> Result<Expression> {
        self.binary([Operator::Add, Operator::Subtract], Self::term)
    }

    fn term(&mut self) -> Result<Expression> {
        self.binary([Operator::Multiply, Operator::Divide], Self::factor)
    }

    fn factor(&mut self) -> Result<Expression> {
        match self.advance()? {
            Token::Number(number) => Ok(Expression::atom(number)),
            Token::LeftParenthesis => {
                if self.depth >= self.max_depth {
                    return Err(Error::NestingTooDeep {
                        limit: self.max_depth,
                    });
                }

                self.depth += 1;
                let expression = self.expression()?;
                self.depth -= 1;

                match self.advance()? {
                    Token::RightParenthesis => Ok(expression),
                    found => Err(Error::UnbalancedParenthesis {
                        found: Some(found.to_string()),
                    }),
                }
            }
            token => Err(Error::UnknownConstruct(format!("`{token}`"))),
        }
    }
}
