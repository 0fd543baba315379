pub use error::{Error, LogicError, ParseError, Result, UnboundAtomError};
pub use expr::Expr;
pub use symbols::{meaning_of, Arity, Connective};
pub use truth_table::{Assignment, Row, SatInfo, TruthTable};

pub mod argument;
pub mod error;
pub mod expr;
pub mod normal_form;
pub mod parser;
pub mod symbols;
pub mod truth_table;
