//! Runs scenarios on one session and classifies their outcomes.

use symem_memory::{CheckStatus, Session};

use crate::output::{ScenarioResult, ScenarioStatus};
use crate::scenarios::Scenario;

/// Run `scenarios` in order on `session`, resetting it before each one.
///
/// A solver failure is recorded on that scenario and the run continues.
pub fn run_scenarios(
    session: &mut Session,
    scenarios: &[&Scenario],
    dump_script: bool,
) -> Vec<ScenarioResult> {
    scenarios
        .iter()
        .map(|scenario| run_one(session, scenario, dump_script))
        .collect()
}

fn run_one(session: &mut Session, scenario: &Scenario, dump_script: bool) -> ScenarioResult {
    let mut result = ScenarioResult {
        name: scenario.name.to_string(),
        title: scenario.title.to_string(),
        status: ScenarioStatus::Error,
        expected: scenario.expected.as_str().to_string(),
        outcome: None,
        report: None,
        message: None,
        script: None,
        duration_ms: 0,
    };

    match scenario.run(session, dump_script) {
        Ok(run) => {
            result.status = match &run.status {
                status if scenario.expected.matches(status) => ScenarioStatus::Pass,
                CheckStatus::Unknown(reason) => {
                    result.message = Some(reason.clone());
                    ScenarioStatus::Unknown
                }
                _ => ScenarioStatus::Deviates,
            };
            result.outcome = Some(run.status);
            result.report = run.report;
            result.script = run.script;
            result.duration_ms = run.duration_ms;
        }
        Err(e) => {
            tracing::warn!("{} failed: {e}", scenario.name);
            result.message = Some(e.to_string());
        }
    }

    result
}
