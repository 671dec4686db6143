//! Every built-in scenario against a real Z3 binary.

use symem_driver::output::ScenarioStatus;
use symem_driver::runner::run_scenarios;
use symem_driver::scenarios::{self, Scenario};
use symem_memory::{CheckStatus, Session, SessionConfig};
use symem_solver::{SolverConfig, SolverKind};

fn session() -> Session {
    let solver = SolverConfig::auto_detect_for(SolverKind::Z3)
        .expect("Z3 should be available on this system");
    Session::from_config(SessionConfig::default().with_solver(solver))
        .expect("session should build")
}

#[test]
fn all_scenarios_meet_expectations() {
    let mut session = session();
    let selected: Vec<&Scenario> = scenarios::all().iter().collect();
    let results = run_scenarios(&mut session, &selected, false);

    for result in &results {
        assert_eq!(
            result.status,
            ScenarioStatus::Pass,
            "{} ended {:?}, expected {}",
            result.name,
            result.outcome,
            result.expected
        );
    }
}

#[test]
fn struct_fields_can_overlap_in_flat_memory() {
    let mut s = session();
    let run = scenarios::find("test9").unwrap().run(&mut s, false).unwrap();
    assert_eq!(run.status, CheckStatus::Sat);

    let report = s.model_report().unwrap();
    let p = report.get("p").unwrap();
    let x = report.get("x").unwrap();
    assert_eq!(x, p + 1);
}

#[test]
fn simple_pointer_reports_program_values() {
    let mut s = session();
    let run = scenarios::find("test0").unwrap().run(&mut s, false).unwrap();

    assert_eq!(run.setup, CheckStatus::Sat);
    let report = run.report.unwrap();
    assert_eq!(report.get("q"), Some(5));
    assert_eq!(report.get("x"), Some(5));
    assert_eq!(
        report.iter().map(|(n, _)| n).collect::<Vec<_>>(),
        vec!["p", "q", "r", "x"]
    );
}

#[test]
fn contradictory_calls_have_no_setup_model() {
    let mut s = session();
    let run = scenarios::find("test10").unwrap().run(&mut s, false).unwrap();
    assert_eq!(run.setup, CheckStatus::Unsat);
    assert!(run.report.is_none());
    assert_eq!(run.status, CheckStatus::Unsat);
}

#[test]
fn logic_is_accepted_by_z3() {
    let solver = SolverConfig::auto_detect_for(SolverKind::Z3).unwrap();
    let mut s = Session::from_config(
        SessionConfig::default()
            .with_solver(solver)
            .with_logic("QF_LIA"),
    )
    .unwrap();
    let run = scenarios::find("test6").unwrap().run(&mut s, true).unwrap();
    assert_eq!(run.status, CheckStatus::Unsat);
    assert!(run.script.unwrap().starts_with("(set-logic QF_LIA)"));
}
