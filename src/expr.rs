use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt::{self, Display};

use crate::error::{LogicError, UnboundAtomError};
use crate::symbols::Connective;
use crate::truth_table::Assignment;

/// Expression tree of a propositional formula.
///
/// Trees built through [`Expr::atom`] and [`Expr::new`] always satisfy the arity
/// rules of their connectives: `Not` has one operand, `If` has two, and the
/// variadic connectives `And`, `Or`, `Xor` and `Iff` have at least one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    Atom(char),
    Not(Box<Expr>),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    If(Box<Expr>, Box<Expr>),
    /// True iff the operands are neither all false nor all true
    Xor(Vec<Expr>),
    /// True iff the operands all share one truth value
    Iff(Vec<Expr>),
}

impl Expr {
    pub fn atom(name: char) -> Result<Self, LogicError> {
        if name.is_ascii_uppercase() {
            Ok(Self::Atom(name))
        } else {
            Err(LogicError::InvalidAtomName(name))
        }
    }

    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    pub fn implies(premise: Self, conclusion: Self) -> Self {
        Self::If(Box::new(premise), Box::new(conclusion))
    }

    /// Builds a node for `connective` over `operands`, validating its arity.
    pub fn new(connective: Connective, operands: Vec<Self>) -> Result<Self, LogicError> {
        let arity = connective.arity();
        let arity_error = |found: usize| LogicError::Arity {
            connective,
            arity,
            found,
        };

        if !arity.admits(operands.len()) {
            return Err(arity_error(operands.len()));
        }

        match connective {
            Connective::Atom => Err(LogicError::UnnamedAtom),
            Connective::Not => {
                let [operand] =
                    <[Self; 1]>::try_from(operands).map_err(|ops| arity_error(ops.len()))?;
                Ok(Self::not(operand))
            }
            Connective::If => {
                let [premise, conclusion] =
                    <[Self; 2]>::try_from(operands).map_err(|ops| arity_error(ops.len()))?;
                Ok(Self::implies(premise, conclusion))
            }
            Connective::And => Ok(Self::And(operands)),
            Connective::Or => Ok(Self::Or(operands)),
            Connective::Xor => Ok(Self::Xor(operands)),
            Connective::Iff => Ok(Self::Iff(operands)),
        }
    }

    pub const fn connective(&self) -> Connective {
        match self {
            Self::Atom(_) => Connective::Atom,
            Self::Not(_) => Connective::Not,
            Self::And(_) => Connective::And,
            Self::Or(_) => Connective::Or,
            Self::If(_, _) => Connective::If,
            Self::Xor(_) => Connective::Xor,
            Self::Iff(_) => Connective::Iff,
        }
    }

    /// Direct children of this node, in order.
    pub fn operands(&self) -> Vec<&Self> {
        match self {
            Self::Atom(_) => vec![],
            Self::Not(operand) => vec![operand.as_ref()],
            Self::If(premise, conclusion) => vec![premise.as_ref(), conclusion.as_ref()],
            Self::And(ops) | Self::Or(ops) | Self::Xor(ops) | Self::Iff(ops) => {
                ops.iter().collect()
            }
        }
    }

    /// The atoms occurring anywhere in the tree, sorted.
    pub fn atoms(&self) -> BTreeSet<char> {
        let mut atoms = BTreeSet::new();
        self.collect_atoms(&mut atoms);
        atoms
    }

    fn collect_atoms(&self, atoms: &mut BTreeSet<char>) {
        match self {
            Self::Atom(name) => {
                atoms.insert(*name);
            }
            other => {
                for operand in other.operands() {
                    operand.collect_atoms(atoms);
                }
            }
        }
    }

    /// Evaluates the tree under `model`.
    ///
    /// Every operand is evaluated, so an unbound atom is reported even where a
    /// short-circuiting evaluation would never reach it.
    pub fn eval(&self, model: &Assignment) -> Result<bool, UnboundAtomError> {
        match self {
            Self::Atom(name) => model.get(*name).ok_or(UnboundAtomError(*name)),
            Self::Not(operand) => Ok(!operand.eval(model)?),
            Self::If(premise, conclusion) => {
                let premise = premise.eval(model)?;
                let conclusion = conclusion.eval(model)?;
                Ok(!premise || conclusion)
            }
            Self::And(ops) => Ok(Self::eval_operands(ops, model)?.iter().all(|&v| v)),
            Self::Or(ops) => Ok(Self::eval_operands(ops, model)?.iter().any(|&v| v)),
            Self::Xor(ops) => {
                let values = Self::eval_operands(ops, model)?;
                Ok(values.iter().any(|&v| v) && !values.iter().all(|&v| v))
            }
            Self::Iff(ops) => {
                let values = Self::eval_operands(ops, model)?;
                Ok(!values.iter().any(|&v| v) || values.iter().all(|&v| v))
            }
        }
    }

    fn eval_operands(ops: &[Self], model: &Assignment) -> Result<Vec<bool>, UnboundAtomError> {
        ops.iter().map(|op| op.eval(model)).collect()
    }
}

/// Renders canonical formula text.
///
/// Trees produced by the parser render to text that parses back to an equal
/// tree. A variadic group holding a single operand has no such text, so it is
/// rendered with the same meaning: a lone `And` or `Or` operand stands alone, a
/// lone `Xor` operand is repeated into `(s x s)` (always false) and a lone `Iff`
/// operand into `(s = s)` (always true).
impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) => write!(f, "{name}"),
            Self::Not(operand) => write!(f, "~{operand}"),
            Self::If(premise, conclusion) => write!(f, "({premise} > {conclusion})"),
            Self::And(ops) | Self::Or(ops) | Self::Xor(ops) | Self::Iff(ops) => {
                let separator = self
                    .connective()
                    .symbol()
                    .map(|symbol| format!(" {symbol} "))
                    .unwrap_or_default();

                match (self, ops.as_slice()) {
                    (Self::And(_) | Self::Or(_), [single]) => write!(f, "{single}"),
                    (_, [single]) => write!(f, "({single}{separator}{single})"),
                    _ => write!(f, "({})", ops.iter().join(&separator)),
                }
            }
        }
    }
}
