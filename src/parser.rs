use std::collections::VecDeque;
use tracing::debug;

use crate::error::{ParseError, Result};
use crate::expr::Expr;
use crate::symbols::{meaning_of, Connective};

/// Queue of the non-whitespace characters of a formula, each paired with its
/// position in the original text.
struct SymbolQueue {
    symbols: VecDeque<(usize, char)>,
    end: usize,
}

impl SymbolQueue {
    fn new(text: &str) -> Self {
        let symbols = text
            .chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .collect();

        Self {
            symbols,
            end: text.chars().count(),
        }
    }

    fn pop(&mut self) -> Option<(usize, char)> {
        self.symbols.pop_front()
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.symbols.front().copied()
    }

    fn peek_symbol(&self) -> Option<char> {
        self.peek().map(|(_, symbol)| symbol)
    }

    /// A formula: an atom, a negation or a parenthesized group.
    fn formula(&mut self) -> Result<Expr> {
        let (position, symbol) = self.pop().ok_or(ParseError::UnexpectedEnd)?;

        match meaning_of(symbol) {
            Some(Connective::Atom) => Ok(Expr::atom(symbol)?),
            Some(Connective::Not) => Ok(Expr::not(self.formula()?)),
            _ if symbol == '(' => self.group(),
            _ => Err(ParseError::CannotStart { symbol, position }.into()),
        }
    }

    /// The remainder of a group after its `(`: two or more operands joined by
    /// one repeated connective symbol, then `)`.
    fn group(&mut self) -> Result<Expr> {
        let mut operands = vec![self.formula()?];

        let (operator, connective) = match self.peek() {
            None => {
                return Err(ParseError::MissingClosingParen { position: self.end }.into())
            }
            Some((position, symbol)) => match meaning_of(symbol) {
                Some(connective) if connective.is_infix() => (symbol, connective),
                _ => return Err(ParseError::NotAConnective { symbol, position }.into()),
            },
        };

        while self.peek_symbol() == Some(operator) {
            self.pop();
            operands.push(self.formula()?);
        }

        match self.pop() {
            Some((_, ')')) => Ok(Expr::new(connective, operands)?),
            Some((position, found)) if meaning_of(found).is_some_and(Connective::is_infix) => {
                Err(ParseError::MismatchedOperator {
                    expected: operator,
                    found,
                    position,
                }
                .into())
            }
            Some((position, _)) => Err(ParseError::MissingClosingParen { position }.into()),
            None => Err(ParseError::MissingClosingParen { position: self.end }.into()),
        }
    }
}

/// Parses a formula string into an expression tree.
///
/// Whitespace is ignored. One character is one token: uppercase letters are
/// atoms, `~`/`!` negate the following formula, and every other connective
/// must appear inside parentheses, repeated unchanged between all operands of
/// its group (`(A&B&C)`, never `(A&B|C)`).
pub fn parse(text: &str) -> Result<Expr> {
    let mut symbols = SymbolQueue::new(text);
    let tree = symbols.formula()?;

    if let Some((position, _)) = symbols.peek() {
        let rest = symbols.symbols.iter().map(|&(_, c)| c).collect();
        return Err(ParseError::TrailingTokens { rest, position }.into());
    }

    debug!(%tree, "parsed formula");

    Ok(tree)
}
