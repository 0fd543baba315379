use itertools::Itertools;
use tracing::debug;

use crate::error::Result;
use crate::truth_table::{truth_table, Assignment, TruthTable};

/// Disjunctive normal form of `text`: one conjunctive clause per true row.
pub fn to_dnf(text: &str) -> Result<String> {
    truth_table(text)?.dnf()
}

/// Conjunctive normal form of `text`: one disjunctive clause per false row,
/// each excluding that row's assignment.
pub fn to_cnf(text: &str) -> Result<String> {
    truth_table(text)?.cnf()
}

impl TruthTable {
    pub fn dnf(&self) -> Result<String> {
        self.normal_form(true, "&", "v")
    }

    pub fn cnf(&self) -> Result<String> {
        self.normal_form(false, "v", "&")
    }

    /// Renders one clause per row whose value equals `selected`.
    ///
    /// A literal is positive when its atom's value equals `selected`, so DNF
    /// clauses match their row and CNF clauses exclude it.
    fn normal_form(&self, selected: bool, inner: &str, outer: &str) -> Result<String> {
        let mut clauses = Vec::new();

        for row in self.rows() {
            let row = row?;
            if row.value == selected {
                clauses.push(clause(&row.model, selected, inner));
            }
        }

        debug!(formula = %self.tree(), clauses = clauses.len(), selected, "normal form");

        Ok(match clauses.as_slice() {
            [single] => single.clone(),
            _ => format!("({})", clauses.iter().join(&format!(" {outer} "))),
        })
    }
}

fn clause(model: &Assignment, positive: bool, junction: &str) -> String {
    let literals: Vec<String> = model
        .iter()
        .map(|(atom, value)| {
            if value == positive {
                atom.to_string()
            } else {
                format!("~{atom}")
            }
        })
        .collect();

    match literals.as_slice() {
        [single] => single.clone(),
        _ => format!("({})", literals.iter().join(&format!(" {junction} "))),
    }
}
