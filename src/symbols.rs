use lazy_static::lazy_static;
use rustc_hash::FxHashMap;
use std::fmt::{self, Display};

/// Connective (or atom) denoted by a single character of formula text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Connective {
    Atom,
    Not,
    And,
    Or,
    If,
    Xor,
    Iff,
}

/// Number of operands a connective accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Leaves: no operands
    Nullary,
    /// Exactly one operand
    Unary,
    /// Exactly two operands
    Binary,
    /// One or more operands
    Variadic,
}

impl Arity {
    /// Returns whether a node with `operands` children satisfies this arity.
    pub const fn admits(self, operands: usize) -> bool {
        match self {
            Self::Nullary => operands == 0,
            Self::Unary => operands == 1,
            Self::Binary => operands == 2,
            Self::Variadic => operands >= 1,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Nullary => "no operands",
            Self::Unary => "exactly one operand",
            Self::Binary => "exactly two operands",
            Self::Variadic => "at least one operand",
        })
    }
}

impl Connective {
    pub const fn arity(self) -> Arity {
        match self {
            Self::Atom => Arity::Nullary,
            Self::Not => Arity::Unary,
            Self::If => Arity::Binary,
            Self::And | Self::Or | Self::Xor | Self::Iff => Arity::Variadic,
        }
    }

    /// Whether this connective may join the operands of a parenthesized group.
    pub const fn is_infix(self) -> bool {
        matches!(self.arity(), Arity::Binary | Arity::Variadic)
    }

    /// The symbol used when rendering a tree back to formula text.
    pub const fn symbol(self) -> Option<char> {
        match self {
            Self::Atom => None,
            Self::Not => Some('~'),
            Self::And => Some('&'),
            Self::Or => Some('v'),
            Self::If => Some('>'),
            Self::Xor => Some('x'),
            Self::Iff => Some('='),
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Atom => "atom",
            Self::Not => "not",
            Self::And => "and",
            Self::Or => "or",
            Self::If => "if",
            Self::Xor => "xor",
            Self::Iff => "iff",
        })
    }
}

const SYMBOL_TABLE: &[(&str, Connective)] = &[
    ("ABCDEFGHIJKLMNOPQRSTUVWXYZ", Connective::Atom),
    ("&^", Connective::And),
    ("|v", Connective::Or),
    ("!~", Connective::Not),
    ("x", Connective::Xor),
    (">", Connective::If),
    ("=", Connective::Iff),
];

lazy_static! {
    static ref MEANINGS: FxHashMap<char, Connective> = SYMBOL_TABLE
        .iter()
        .flat_map(|&(symbols, connective)| symbols.chars().map(move |c| (c, connective)))
        .collect();
}

/// Looks up the connective a character denotes.
///
/// Characters without a logical meaning, including parentheses and whitespace,
/// map to `None`.
pub fn meaning_of(symbol: char) -> Option<Connective> {
    MEANINGS.get(&symbol).copied()
}
