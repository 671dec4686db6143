//! Integration tests for the native Z3 backend.
//!
//! The native backend must agree with the subprocess backend on every
//! script the memory model produces.

#![cfg(feature = "z3-native")]

use symem_smtlib::command::Command as SmtCmd;
use symem_smtlib::script::Script;
use symem_smtlib::sort::Sort;
use symem_smtlib::term::Term;
use symem_solver::z3_native::Z3NativeSolver;
use symem_solver::{CliSolver, SolverBackend, SolverResult};

/// Run a script on both backends and compare the answers.
fn assert_backends_agree(script: &Script, expected: fn(&SolverResult) -> bool) {
    let subprocess = CliSolver::with_default_config().expect("Z3 not found");
    let subprocess_result = subprocess.check_sat(script).expect("subprocess failed");
    assert!(
        expected(&subprocess_result),
        "Subprocess backend produced unexpected result: {subprocess_result:?}"
    );

    let native = Z3NativeSolver::new();
    let native_result = native.check_sat(script).expect("native failed");
    assert!(
        expected(&native_result),
        "Native backend produced unexpected result: {native_result:?}"
    );
}

fn heap_script(negated_property: Term) -> Script {
    // two objects a != b; *a = 5; *b = 10; p = (*a < *b) ? a : b
    let a = Term::var("a");
    let b = Term::var("b");
    let load = |addr: Term| {
        Term::ite(
            addr.clone().equals(b.clone()),
            Term::int(10),
            Term::ite(addr.equals(a.clone()), Term::int(5), Term::var("d")),
        )
    };
    let cond = load(a.clone()).lt(load(b.clone()));

    let mut script = Script::new();
    for name in ["a", "b", "p", "d"] {
        script.push(SmtCmd::DeclareConst(name.to_string(), Sort::Int));
    }
    script.push(SmtCmd::Assert(a.clone().not_equals(b.clone())));
    script.push(SmtCmd::Assert(cond.clone().implies(Term::var("p").equals(a))));
    script.push(SmtCmd::Assert((!cond).implies(Term::var("p").equals(b))));
    script.push(SmtCmd::Assert(negated_property));
    script
}

#[test]
fn alias_branch_agrees() {
    let p = Term::var("p");
    let load_p = Term::ite(
        p.clone().equals(Term::var("b")),
        Term::int(10),
        Term::ite(p.equals(Term::var("a")), Term::int(5), Term::var("d")),
    );
    let script = heap_script(load_p.not_equals(Term::int(5)));
    assert_backends_agree(&script, SolverResult::is_unsat);
}

#[test]
fn satisfiable_script_agrees() {
    let script = heap_script(Term::var("a").gt(Term::var("b")));
    assert_backends_agree(&script, SolverResult::is_sat);
}
