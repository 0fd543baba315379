//! Error types for parsing, tree construction and evaluation

use thiserror::Error;

use crate::symbols::{Arity, Connective};

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a formula string is not well-formed.
///
/// Positions count characters of the original input, whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input ran out where a formula was expected
    #[error("empty string is not a well-formed formula")]
    UnexpectedEnd,

    /// The symbol at `position` cannot begin a formula
    #[error("`{symbol}` cannot start a well-formed formula (position {position})")]
    CannotStart { symbol: char, position: usize },

    /// A group operand was followed by something other than a binary connective
    #[error("expected a binary connective, found `{symbol}` (position {position})")]
    NotAConnective { symbol: char, position: usize },

    /// A group ended without `)`
    #[error("missing closing parenthesis (position {position})")]
    MissingClosingParen { position: usize },

    /// Two different connectives were used in the same parenthesized group
    #[error(
        "mismatched operator in group: expected `{expected}`, found `{found}` (position {position})"
    )]
    MismatchedOperator {
        expected: char,
        found: char,
        position: usize,
    },

    /// A complete formula was followed by more input
    #[error("unconsumed trailing tokens `{rest}` (position {position})")]
    TrailingTokens { rest: String, position: usize },
}

/// Violations of the expression tree construction rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error("atom name `{0}` is not an uppercase letter")]
    InvalidAtomName(char),

    #[error("atoms are built from a name, not from operands")]
    UnnamedAtom,

    #[error("{connective} takes {arity}, got {found}")]
    Arity {
        connective: Connective,
        arity: Arity,
        found: usize,
    },
}

/// An assignment lacked a value for an atom of the evaluated tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("atom `{0}` has no value in the assignment")]
pub struct UnboundAtomError(pub char);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    UnboundAtom(#[from] UnboundAtomError),
}
