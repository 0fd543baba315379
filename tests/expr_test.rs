use pretty_assertions::assert_eq;

use carroll::parser::parse;
use carroll::truth_table::gen_assignments;
use carroll::{Arity, Assignment, Connective, Expr, LogicError, UnboundAtomError};

// fresh atoms and a model with A = true, B = false for every test
fn fixture() -> (Expr, Expr, Assignment) {
    let a = Expr::Atom('A');
    let b = Expr::Atom('B');
    let model = [('A', true), ('B', false)].into_iter().collect();
    (a, b, model)
}

fn and(ops: Vec<Expr>) -> Expr {
    Expr::And(ops)
}

fn or(ops: Vec<Expr>) -> Expr {
    Expr::Or(ops)
}

#[test]
fn test_single_node_eval() -> Result<(), UnboundAtomError> {
    let (a, b, model) = fixture();

    assert!(a.eval(&model)?);
    assert!(!b.eval(&model)?);

    assert!(or(vec![a.clone(), a.clone()]).eval(&model)?);
    assert!(or(vec![a.clone(), b.clone()]).eval(&model)?);
    assert!(or(vec![b.clone(), a.clone()]).eval(&model)?);
    assert!(!or(vec![b.clone(), b.clone()]).eval(&model)?);

    assert!(and(vec![a.clone(), a.clone()]).eval(&model)?);
    assert!(!and(vec![a.clone(), b.clone()]).eval(&model)?);
    assert!(!and(vec![b.clone(), a.clone()]).eval(&model)?);
    assert!(!and(vec![b.clone(), b.clone()]).eval(&model)?);

    assert!(!Expr::not(a.clone()).eval(&model)?);
    assert!(Expr::not(b.clone()).eval(&model)?);

    assert!(!Expr::implies(a.clone(), b.clone()).eval(&model)?);
    assert!(Expr::implies(b.clone(), a.clone()).eval(&model)?);
    assert!(Expr::implies(b.clone(), b.clone()).eval(&model)?);

    assert!(Expr::Xor(vec![a.clone(), b.clone()]).eval(&model)?);
    assert!(!Expr::Xor(vec![a.clone(), a.clone()]).eval(&model)?);
    assert!(!Expr::Xor(vec![b.clone(), b.clone()]).eval(&model)?);

    assert!(!Expr::Iff(vec![a.clone(), b.clone()]).eval(&model)?);
    assert!(Expr::Iff(vec![a.clone(), a]).eval(&model)?);
    assert!(Expr::Iff(vec![b.clone(), b]).eval(&model)?);

    Ok(())
}

#[test]
fn test_compound_node_eval() -> Result<(), UnboundAtomError> {
    let (a, b, model) = fixture();

    assert!(Expr::not(Expr::not(a.clone())).eval(&model)?);
    assert!(Expr::not(and(vec![a.clone(), b.clone()])).eval(&model)?);
    assert!(!Expr::not(or(vec![a.clone(), b.clone()])).eval(&model)?);
    assert!(or(vec![
        Expr::not(and(vec![a.clone(), b.clone()])),
        Expr::not(or(vec![a, b])),
    ])
    .eval(&model)?);

    Ok(())
}

// Xor and Iff over more than two operands are not pairwise chains: Xor means
// "not unanimous", Iff means "unanimous".
#[test]
fn test_variadic_xor_iff_are_not_chained() -> Result<(), UnboundAtomError> {
    let (a, b, model) = fixture();
    let three_true = vec![a.clone(), a.clone(), a.clone()];
    let mixed = vec![a.clone(), a.clone(), b.clone()];
    let three_false = vec![b.clone(), b.clone(), b];

    // chained xor of three trues would be true
    assert!(!Expr::Xor(three_true.clone()).eval(&model)?);
    // chained xor of T, T, F would be false
    assert!(Expr::Xor(mixed.clone()).eval(&model)?);
    assert!(!Expr::Xor(three_false.clone()).eval(&model)?);

    assert!(Expr::Iff(three_true).eval(&model)?);
    assert!(!Expr::Iff(mixed).eval(&model)?);
    // chained iff of three falses would be false
    assert!(Expr::Iff(three_false).eval(&model)?);

    // a single operand is unanimous
    assert!(!Expr::Xor(vec![a.clone()]).eval(&model)?);
    assert!(Expr::Iff(vec![a]).eval(&model)?);

    Ok(())
}

#[test]
fn test_unbound_atom() {
    let (a, _, _) = fixture();
    let model: Assignment = [('B', true)].into_iter().collect();

    assert_eq!(a.eval(&model), Err(UnboundAtomError('A')));

    // operands are not short-circuited past an unbound atom
    let tree = or(vec![Expr::Atom('B'), Expr::Atom('C')]);
    assert_eq!(tree.eval(&model), Err(UnboundAtomError('C')));
}

#[test]
fn test_checked_construction() -> Result<(), LogicError> {
    let (a, b, _) = fixture();

    assert_eq!(Expr::atom('Q')?, Expr::Atom('Q'));
    assert_eq!(Expr::atom('q'), Err(LogicError::InvalidAtomName('q')));
    assert_eq!(Expr::atom('&'), Err(LogicError::InvalidAtomName('&')));

    assert_eq!(Expr::new(Connective::Not, vec![a.clone()])?, Expr::not(a.clone()));
    assert_eq!(
        Expr::new(Connective::If, vec![a.clone(), b.clone()])?,
        Expr::implies(a.clone(), b.clone())
    );
    assert_eq!(
        Expr::new(Connective::Xor, vec![a.clone()])?,
        Expr::Xor(vec![a.clone()])
    );

    assert_eq!(
        Expr::new(Connective::Not, vec![a.clone(), b.clone()]),
        Err(LogicError::Arity {
            connective: Connective::Not,
            arity: Arity::Unary,
            found: 2
        })
    );
    assert_eq!(
        Expr::new(Connective::If, vec![a.clone()]),
        Err(LogicError::Arity {
            connective: Connective::If,
            arity: Arity::Binary,
            found: 1
        })
    );

    for connective in [Connective::And, Connective::Or, Connective::Xor, Connective::Iff] {
        assert_eq!(
            Expr::new(connective, vec![]),
            Err(LogicError::Arity {
                connective,
                arity: Arity::Variadic,
                found: 0
            })
        );
    }

    assert_eq!(Expr::new(Connective::Atom, vec![]), Err(LogicError::UnnamedAtom));
    assert_eq!(
        Expr::new(Connective::Atom, vec![a, b]),
        Err(LogicError::Arity {
            connective: Connective::Atom,
            arity: Arity::Nullary,
            found: 2
        })
    );

    Ok(())
}

#[test]
fn test_atoms_are_sorted() {
    let tree = or(vec![
        Expr::Atom('C'),
        and(vec![Expr::Atom('A'), Expr::not(Expr::Atom('C'))]),
        Expr::implies(Expr::Atom('B'), Expr::Atom('A')),
    ]);

    assert_eq!(tree.atoms().into_iter().collect::<Vec<_>>(), vec!['A', 'B', 'C']);
}

#[test]
fn test_display() {
    let (a, b, _) = fixture();

    assert_eq!(a.to_string(), "A");
    assert_eq!(Expr::not(a.clone()).to_string(), "~A");
    assert_eq!(and(vec![a.clone(), b.clone()]).to_string(), "(A & B)");
    assert_eq!(Expr::implies(a.clone(), b.clone()).to_string(), "(A > B)");
    assert_eq!(
        Expr::Iff(vec![a.clone(), Expr::Xor(vec![a.clone(), b.clone()])]).to_string(),
        "(A = (A x B))"
    );

    // a lone operand renders without a group
    assert_eq!(and(vec![or(vec![a.clone(), b])]).to_string(), "(A v B)");

    // a lone xor or iff operand is repeated so the text keeps its value
    assert_eq!(Expr::Xor(vec![a.clone()]).to_string(), "(A x A)");
    assert_eq!(Expr::Iff(vec![Expr::not(a)]).to_string(), "(~A = ~A)");
}

#[test]
fn test_lone_operand_display_keeps_value() -> carroll::Result<()> {
    let (a, b, _) = fixture();
    let trees = [
        Expr::new(Connective::Xor, vec![a.clone()])?,
        Expr::new(Connective::Iff, vec![a.clone()])?,
        Expr::new(Connective::And, vec![b.clone()])?,
        Expr::new(Connective::Or, vec![Expr::Xor(vec![a, b])])?,
    ];

    for tree in trees {
        let reparsed = parse(&tree.to_string())?;
        let atoms: Vec<char> = tree.atoms().into_iter().collect();

        for model in gen_assignments(&atoms) {
            assert_eq!(reparsed.eval(&model)?, tree.eval(&model)?, "{tree} under {model}");
        }
    }

    Ok(())
}
