use itertools::{EitherOrBoth, Itertools};
use lazy_static::lazy_static;
use regex::Regex;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::io::Write;
use tracing::{debug, trace};

use crate::error::{Result, UnboundAtomError};
use crate::expr::Expr;
use crate::parser::parse;
use crate::symbols::{meaning_of, Connective};

type RowResult = std::result::Result<Row, UnboundAtomError>;

lazy_static! {
    static ref ATOM: Regex = Regex::new(r"[A-Z]").expect("atom pattern is a valid regex");
}

/// Truth values for a set of atoms.
///
/// Atoms iterate (and render) in lexicographic order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Assignment(BTreeMap<char, bool>);

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, atom: char) -> Option<bool> {
        self.0.get(&atom).copied()
    }

    pub fn atoms(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, bool)> + '_ {
        self.0.iter().map(|(&atom, &value)| (atom, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(char, bool)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (char, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Renders every atom as ` A` when true and `~A` when false, separated by spaces.
impl Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .iter()
            .map(|(atom, value)| format!("{}{atom}", if value { ' ' } else { '~' }))
            .join(" ");

        f.pad(&rendered)
    }
}

/// One line of a truth table: an assignment and the formula's value under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub model: Assignment,
    pub value: bool,
}

impl Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.model,
            if self.value { "True" } else { "False" }
        )
    }
}

/// Satisfiability summary of a truth table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatInfo {
    /// At least one row is true
    pub satisfiable: bool,
    /// Every row is true
    pub tautology: bool,
}

impl Display for SatInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "satisfiable: {}", self.satisfiable)?;
        write!(f, "tautology: {}", self.tautology)
    }
}

/// Finds the atom names occurring in raw formula text.
///
/// The returned set is unordered; sort it before enumerating assignments.
pub fn find_atoms(text: &str) -> FxHashSet<char> {
    ATOM.find_iter(text)
        .filter_map(|m| m.as_str().chars().next())
        .collect()
}

/// Enumerates all `2^n` assignments over the `n` distinct atom names in `atoms`.
///
/// Characters that do not name an atom are ignored, so `n` is at most 26. With
/// the atoms sorted and the first atom as the most significant bit (`true` = 1),
/// rows run from all-true down to all-false.
pub fn gen_assignments(atoms: &[char]) -> impl Iterator<Item = Assignment> {
    let atoms: Vec<char> = atoms
        .iter()
        .copied()
        .filter(|&symbol| meaning_of(symbol) == Some(Connective::Atom))
        .sorted()
        .dedup()
        .collect();
    let width = atoms.len();

    (0..(1u64 << width)).rev().map(move |bits| {
        atoms
            .iter()
            .enumerate()
            .map(|(i, &atom)| (atom, (bits >> (width - 1 - i)) & 1 == 1))
            .collect()
    })
}

/// A formula paired with the atoms its rows range over.
///
/// Rows are never cached: every call to [`TruthTable::rows`] regenerates the same
/// sequence in the same order.
#[derive(Debug, Clone)]
pub struct TruthTable {
    tree: Expr,
    atoms: Vec<char>,
}

impl TruthTable {
    /// Builds a table over the atoms that occur in `tree`.
    pub fn from_expr(tree: Expr) -> Self {
        let atoms = tree.atoms().into_iter().collect();
        Self { tree, atoms }
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }

    /// The sorted atoms of the table, most significant first.
    pub fn atoms(&self) -> &[char] {
        &self.atoms
    }

    pub fn rows(&self) -> impl Iterator<Item = RowResult> + '_ {
        gen_assignments(&self.atoms).map(move |model| -> RowResult {
            let value = self.tree.eval(&model)?;
            trace!(%model, value, "truth table row");
            Ok(Row { model, value })
        })
    }

    pub fn sat_info(&self) -> Result<SatInfo> {
        let mut info = SatInfo {
            satisfiable: false,
            tautology: true,
        };

        for row in self.rows() {
            let value = row?.value;
            info.satisfiable |= value;
            info.tautology &= value;
        }

        Ok(info)
    }

    /// Writes one `<assignment> <value>` line per row.
    pub fn write<W: Write>(&self, writer: &mut W) -> anyhow::Result<()> {
        for row in self.rows() {
            writeln!(writer, "{}", row?)?;
        }

        Ok(())
    }

    /// Writes the table as CSV: a header of atoms plus `value`, then `1`/`0` cells.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        let header = self
            .atoms
            .iter()
            .map(char::to_string)
            .chain(std::iter::once("value".to_string()));
        csv_writer.write_record(header)?;

        for row in self.rows() {
            let row = row?;
            let cells = row
                .model
                .iter()
                .map(|(_, value)| value)
                .chain(std::iter::once(row.value))
                .map(|value| if value { "1" } else { "0" });
            csv_writer.write_record(cells)?;
        }

        csv_writer.flush()?;

        Ok(())
    }
}

/// Parses `text` and pairs it with the atoms found in the text.
pub fn truth_table(text: &str) -> Result<TruthTable> {
    let tree = parse(text)?;
    let atoms: Vec<char> = find_atoms(text).into_iter().sorted().collect();

    debug!(formula = %tree, atoms = atoms.len(), "built truth table");

    Ok(TruthTable { tree, atoms })
}

/// Compares the truth tables of two formulas row by row.
///
/// Only the values are compared, position by position. Formulas over different
/// atom sets are therefore compared without aligning atom identities: `A` and `B`
/// count as equivalent, while tables of different lengths never do.
pub fn equivalent(left: &str, right: &str) -> Result<bool> {
    let left = truth_table(left)?;
    let right = truth_table(right)?;

    if left.atoms() != right.atoms() {
        debug!(
            left = ?left.atoms(),
            right = ?right.atoms(),
            "comparing truth tables over different atoms positionally"
        );
    }

    for pair in left.rows().zip_longest(right.rows()) {
        match pair {
            EitherOrBoth::Both(l, r) => {
                if l?.value != r?.value {
                    return Ok(false);
                }
            }
            EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => return Ok(false),
        }
    }

    Ok(true)
}

/// Satisfiability summary of the formula in `text`.
pub fn sat_info(text: &str) -> Result<SatInfo> {
    truth_table(text)?.sat_info()
}
