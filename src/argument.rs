use tracing::debug;

use crate::error::Result;
use crate::expr::Expr;
use crate::parser::parse;
use crate::symbols::Connective;
use crate::truth_table::TruthTable;

/// Joins premises and a conclusion into the single tree `((P1 & P2 & ...) > C)`.
///
/// Without premises the conclusion stands alone.
pub fn argument_tree(premises: Vec<Expr>, conclusion: Expr) -> Result<Expr> {
    if premises.is_empty() {
        return Ok(conclusion);
    }

    let premises = Expr::new(Connective::And, premises)?;
    Ok(Expr::implies(premises, conclusion))
}

/// Whether `conclusion` follows from `premises` under every assignment.
pub fn valid_argument<S: AsRef<str>>(premises: &[S], conclusion: &str) -> Result<bool> {
    let premises = premises
        .iter()
        .map(|premise| parse(premise.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    let conclusion = parse(conclusion)?;

    let argument = argument_tree(premises, conclusion)?;
    debug!(%argument, "checking argument");

    Ok(TruthTable::from_expr(argument).sat_info()?.tautology)
}
