use anyhow::Context;
use carroll::argument::valid_argument;
use carroll::normal_form::{to_cnf, to_dnf};
use carroll::truth_table::{equivalent, find_atoms, truth_table};
use clap::{Parser, Subcommand};
use rustc_hash::FxHashSet;
use std::io;
use std::io::{BufWriter, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version)]
/// Analyses propositional formulas such as `(A&(BvC))`.
///
/// Atoms are uppercase letters; `~` or `!` negates; `&`/`^` (and), `|`/`v` (or),
/// `>` (if), `=` (iff) and `x` (xor) join the operands of a parenthesized group.
struct Args {
    #[clap(short, long, action = clap::ArgAction::Count)]
    /// Log more to stderr (-v info, -vv debug, -vvv trace); CARROLL_LOG overrides
    verbose: u8,

    #[clap(long, env = "CARROLL_MAX_ATOMS", default_value_t = 16, value_name = "N")]
    /// Refuse formulas with more than N distinct atoms
    max_atoms: usize,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the truth table of an expression
    Table {
        #[clap(value_name = "EXPR")]
        expression: String,

        #[clap(long)]
        /// Write the table as CSV with 1/0 cells
        csv: bool,
    },
    /// Check whether two expressions are logically equivalent
    Equiv {
        #[clap(value_name = "EXPR")]
        left: String,

        #[clap(value_name = "EXPR")]
        right: String,
    },
    /// Convert an expression to disjunctive normal form
    Dnf {
        #[clap(value_name = "EXPR")]
        expression: String,
    },
    /// Convert an expression to conjunctive normal form
    Cnf {
        #[clap(value_name = "EXPR")]
        expression: String,
    },
    /// Report whether an expression is satisfiable and whether it is a tautology
    Sat {
        #[clap(value_name = "EXPR")]
        expression: String,
    },
    /// Check whether the last expression follows from all the others
    Valid {
        #[clap(value_name = "EXPR", required = true, num_args = 1..)]
        expressions: Vec<String>,
    },
}

const fn truth(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_env("CARROLL_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Refuses expressions whose combined atom count exceeds `max_atoms`.
fn check_atom_budget<S: AsRef<str>>(max_atoms: usize, expressions: &[S]) -> anyhow::Result<()> {
    let atoms: FxHashSet<char> = expressions
        .iter()
        .flat_map(|expression| find_atoms(expression.as_ref()))
        .collect();

    if atoms.len() > max_atoms {
        anyhow::bail!(
            "{} distinct atoms exceed the limit of {max_atoms} (raise it with --max-atoms)",
            atoms.len()
        );
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let expanded = argfile::expand_args_from(
        wild::args_os(),
        argfile::parse_fromfile,
        argfile::PREFIX,
    )
    .context("cannot expand @file arguments")?;
    let args = Args::parse_from(expanded);

    init_logging(args.verbose);
    info!(command = ?args.command, max_atoms = args.max_atoms, "starting");

    let mut writer = BufWriter::new(io::stdout());

    match args.command {
        Command::Table { expression, csv } => {
            check_atom_budget(args.max_atoms, &[&expression])?;
            let table = truth_table(&expression)?;
            if csv {
                table.write_csv(&mut writer)?;
            } else {
                table.write(&mut writer)?;
            }
        }
        Command::Equiv { left, right } => {
            check_atom_budget(args.max_atoms, &[&left])?;
            check_atom_budget(args.max_atoms, &[&right])?;
            writeln!(writer, "{}", truth(equivalent(&left, &right)?))?;
        }
        Command::Dnf { expression } => {
            check_atom_budget(args.max_atoms, &[&expression])?;
            writeln!(writer, "{}", to_dnf(&expression)?)?;
        }
        Command::Cnf { expression } => {
            check_atom_budget(args.max_atoms, &[&expression])?;
            writeln!(writer, "{}", to_cnf(&expression)?)?;
        }
        Command::Sat { expression } => {
            check_atom_budget(args.max_atoms, &[&expression])?;
            writeln!(writer, "{}", truth_table(&expression)?.sat_info()?)?;
        }
        Command::Valid { expressions } => {
            check_atom_budget(args.max_atoms, expressions.as_slice())?;
            let (conclusion, premises) = expressions
                .split_last()
                .context("an argument needs at least a conclusion")?;
            writeln!(writer, "{}", truth(valid_argument(premises, conclusion)?))?;
        }
    }

    // flush the writer before dropping it
    writer.flush()?;

    Ok(())
}
