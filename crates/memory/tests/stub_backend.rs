//! Session behavior on undecided and failing solvers.

use symem_memory::{CheckStatus, MemoryError, Session, Verdict};
use symem_smtlib::script::Script;
use symem_smtlib::term::Term;
use symem_solver::{Model, SolverBackend, SolverError, SolverResult};

/// Answers every query with the same outcome.
struct Stub(Result<SolverResult, SolverError>);

impl SolverBackend for Stub {
    fn check_sat(&self, _script: &Script) -> Result<SolverResult, SolverError> {
        self.0.clone()
    }

    fn name(&self) -> String {
        "stub".to_string()
    }
}

fn session(answer: Result<SolverResult, SolverError>) -> Session {
    Session::new(Box::new(Stub(answer)))
}

#[test]
fn unknown_stays_unknown() {
    let mut s = session(Ok(SolverResult::Unknown("timeout".into())));
    let x = s.variable("x");
    s.assert((x.clone() * x).equals(Term::int(2)));

    let status = s.check().unwrap();
    assert_eq!(status, CheckStatus::Unknown("timeout".into()));
    assert_eq!(status.to_string(), "unknown");
    assert!(matches!(
        s.model_report(),
        Err(MemoryError::NoModel { status: Some(CheckStatus::Unknown(_)) })
    ));
    assert_eq!(
        s.prove(Term::bool(true)).unwrap(),
        Verdict::Unknown("timeout".into())
    );
}

#[test]
fn solver_failure_propagates_and_clears_status() {
    let mut s = session(Err(SolverError::NotFound(
        symem_solver::SolverKind::Z3,
        "/nonexistent/z3".into(),
    )));
    s.assert(Term::bool(true));

    let err = s.check().unwrap_err();
    assert!(matches!(err, MemoryError::Solver(SolverError::NotFound(..))));
    assert_eq!(s.last_status(), None);
    assert_eq!(s.assertion_count(), 1);
    assert_eq!(s.backend_name(), "stub");
}

#[test]
fn backend_survives_reset() {
    let mut s = session(Ok(SolverResult::Unsat));
    s.assert(Term::bool(false));
    s.reset();
    assert_eq!(s.backend_name(), "stub");
    assert_eq!(s.check().unwrap(), CheckStatus::Unsat);
}

#[test]
fn colliding_spellings_get_separate_declarations() {
    let model = Model::with_assignments(vec![("a_b".into(), "7".into())]);
    let mut s = session(Ok(SolverResult::Sat(Some(model))));
    let bar = s.variable("a|b");
    let underscore = s.variable("a_b");
    assert_ne!(bar, underscore);

    let script = s.to_script().to_string();
    assert!(script.contains("(declare-const a_b Int)"));
    assert!(script.contains("(declare-const a_b!1 Int)"));
    assert_eq!(script.matches("(declare-const a_b Int)").count(), 1);

    assert_eq!(s.check().unwrap(), CheckStatus::Sat);
    let report = s.model_report().unwrap();
    assert_eq!(report.to_string(), "a|b = 7\na_b = 0\n");
}

#[test]
fn reserved_names_are_not_declared_bare() {
    let mut s = session(Ok(SolverResult::Unsat));
    for name in ["true", "ite", "not", "-", "let", "_"] {
        s.variable(name);
    }
    let script = s.to_script().to_string();
    for name in ["true", "ite", "not", "-", "let", "_"] {
        assert!(!script.contains(&format!("(declare-const {name} Int)")), "{script}");
        assert!(script.contains(&format!("(declare-const {name}!1 Int)")), "{script}");
    }
}
