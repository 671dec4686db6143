//! Integration tests for the subprocess solver interface.
//!
//! These tests call the real Z3 binary and check end-to-end behavior.

use std::path::PathBuf;

use symem_smtlib::command::Command as SmtCmd;
use symem_smtlib::script::Script;
use symem_smtlib::sort::Sort;
use symem_smtlib::term::Term;

use symem_solver::{CliSolver, SolverBackend, SolverConfig, SolverError, SolverKind, SolverResult};

fn make_solver() -> CliSolver {
    CliSolver::with_default_config().expect("Z3 should be available on this system")
}

fn declare(script: &mut Script, names: &[&str]) {
    for name in names {
        script.push(SmtCmd::DeclareConst(name.to_string(), Sort::Int));
    }
}

#[test]
fn raw_simple_sat() {
    let solver = make_solver();
    let result = solver
        .check_sat_raw(
            "\
(declare-const x Int)
(assert (> x 0))
(assert (< x 10))
(check-sat)
(get-model)
",
        )
        .unwrap();

    let model = result.model().expect("Expected model in SAT result");
    let x = model.get_int("x").expect("Model should contain x");
    assert!(x > 0 && x < 10, "x = {x}, expected 0 < x < 10");
}

#[test]
fn raw_simple_unsat() {
    let solver = make_solver();
    let result = solver
        .check_sat_raw("(declare-const x Int)\n(assert (> x 5))\n(assert (< x 3))\n(check-sat)\n")
        .unwrap();
    assert!(result.is_unsat(), "Expected UNSAT, got: {result:?}");
}

#[test]
fn script_with_negative_value() {
    let mut script = Script::new();
    declare(&mut script, &["n"]);
    script.push(SmtCmd::Assert(Term::var("n").equals(Term::int(-12))));

    let result = make_solver().check_sat(&script).unwrap();
    assert_eq!(result.model().and_then(|m| m.get_int("n")), Some(-12));
}

#[test]
fn script_with_quoted_symbol() {
    let mut script = Script::new();
    declare(&mut script, &["p->f0"]);
    script.push(SmtCmd::Assert(Term::var("p->f0").equals(Term::int(10))));

    let result = make_solver().check_sat(&script).unwrap();
    assert_eq!(result.model().and_then(|m| m.get_int("p->f0")), Some(10));
}

#[test]
fn ite_write_log_last_write_wins() {
    // load(p) after store(p, 0); store(p, 3)
    let p = Term::var("p");
    let load = Term::ite(
        p.clone().equals(p.clone()),
        Term::int(3),
        Term::ite(p.clone().equals(p.clone()), Term::int(0), Term::var("d")),
    );

    let mut script = Script::new();
    declare(&mut script, &["p", "d"]);
    script.push(SmtCmd::Assert(load.not_equals(Term::int(3))));

    let result = make_solver().check_sat(&script).unwrap();
    assert!(result.is_unsat(), "{result:?}");
}

#[test]
fn unsat_then_get_model_is_not_an_error() {
    let mut script = Script::new();
    declare(&mut script, &["x"]);
    script.push(SmtCmd::Assert(Term::var("x").equals(Term::int(1))));
    script.push(SmtCmd::Assert(Term::var("x").equals(Term::int(2))));

    let result = make_solver().check_sat(&script).unwrap();
    assert_eq!(result, SolverResult::Unsat);
}

#[test]
fn undeclared_symbol_is_process_error() {
    let mut script = Script::new();
    script.push(SmtCmd::Assert(Term::var("ghost").gt(Term::int(0))));

    let err = make_solver().check_sat(&script).unwrap_err();
    assert!(matches!(err, SolverError::ProcessError(_)), "{err:?}");
}

#[test]
fn backend_trait_object_works() {
    let backend: Box<dyn SolverBackend> = Box::new(make_solver());
    let mut script = Script::new();
    declare(&mut script, &["a", "b"]);
    script.push(SmtCmd::Assert(Term::var("a").equals(Term::var("b") + Term::int(1))));

    let result = backend.check_sat(&script).unwrap();
    let model = result.model().expect("model");
    assert_eq!(model.get_int("a"), model.get_int("b").map(|b| b + 1));
}

#[test]
fn missing_binary_reports_not_found() {
    let solver = CliSolver::new(SolverConfig::new(
        SolverKind::Z3,
        PathBuf::from("/nonexistent/z3"),
    ));
    let err = solver.check_sat(&Script::new()).unwrap_err();
    assert_eq!(
        err,
        SolverError::NotFound(SolverKind::Z3, PathBuf::from("/nonexistent/z3"))
    );
}
