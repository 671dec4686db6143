//! Command-line behavior of the `symem` binary.

use std::process::Command;

fn symem() -> Command {
    Command::new(env!("CARGO_BIN_EXE_symem"))
}

#[test]
fn list_prints_every_scenario() {
    let output = symem().arg("--list").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 11);
    assert!(stdout.contains("test9"));
    assert!(stdout.contains("expect sat"));
}

#[test]
fn unknown_scenario_fails() {
    let output = symem().args(["--scenario", "test42"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown scenario `test42`"));
}

#[test]
fn missing_solver_binary_fails_every_scenario() {
    let output = symem()
        .args(["--solver-path", "/nonexistent/z3", "--scenario", "test1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERROR"));
}

#[test]
fn json_report_with_z3() {
    let output = symem()
        .args(["--solver", "z3", "--format", "json", "--scenario", "test3", "--scenario", "test9"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["pass"], 2);
    assert_eq!(json["scenarios"][0]["outcome"], "unsat");
    assert_eq!(json["scenarios"][1]["outcome"], "sat");
}

#[test]
fn dump_smt_prints_scripts() {
    let output = symem()
        .args(["--solver", "z3", "--dump-smt", "--scenario", "test2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("; test2"));
    assert!(stdout.contains("(declare-const p Int)"));
}
