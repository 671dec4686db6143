/// Structured JSON output for scenario results.
///
/// Produces a machine-readable report via `--format json`.
use serde::{Deserialize, Serialize};

use crate::output::{ScenarioResult, ScenarioStatus};

/// Complete run report in JSON format.
#[derive(Serialize, Deserialize)]
pub struct JsonRunReport {
    pub solver: String,
    pub scenarios: Vec<JsonScenarioResult>,
    pub summary: JsonSummary,
}

/// Per-scenario result in JSON format.
#[derive(Serialize, Deserialize)]
pub struct JsonScenarioResult {
    pub name: String,
    pub title: String,
    /// "pass", "deviates", "unknown", "error"
    pub status: String,
    pub expected: String,
    /// "sat", "unsat", "unknown"; absent on solver failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Variable values under the program constraints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<Vec<JsonAssignment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub smt: Option<String>,
    pub duration_ms: u64,
}

/// Variable assignment in a model report.
#[derive(Serialize, Deserialize)]
pub struct JsonAssignment {
    pub variable: String,
    /// Decimal string; values are unbounded integers.
    pub value: String,
}

/// Summary of all scenario results.
#[derive(Serialize, Deserialize)]
pub struct JsonSummary {
    pub total: usize,
    pub pass: usize,
    pub deviates: usize,
    pub unknown: usize,
    pub error: usize,
}

impl From<&ScenarioResult> for JsonScenarioResult {
    fn from(result: &ScenarioResult) -> Self {
        Self {
            name: result.name.clone(),
            title: result.title.clone(),
            status: status_str(&result.status).to_string(),
            expected: result.expected.clone(),
            outcome: result.outcome.as_ref().map(ToString::to_string),
            message: result.message.clone(),
            model: result.report.as_ref().map(|report| {
                report
                    .iter()
                    .map(|(name, value)| JsonAssignment {
                        variable: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect()
            }),
            smt: result.script.clone(),
            duration_ms: result.duration_ms,
        }
    }
}

fn status_str(status: &ScenarioStatus) -> &'static str {
    match status {
        ScenarioStatus::Pass => "pass",
        ScenarioStatus::Deviates => "deviates",
        ScenarioStatus::Unknown => "unknown",
        ScenarioStatus::Error => "error",
    }
}

/// Build the JSON report for a finished run.
pub fn build_report(solver: &str, results: &[ScenarioResult]) -> JsonRunReport {
    let count = |status: ScenarioStatus| results.iter().filter(|r| r.status == status).count();
    JsonRunReport {
        solver: solver.to_string(),
        scenarios: results.iter().map(JsonScenarioResult::from).collect(),
        summary: JsonSummary {
            total: results.len(),
            pass: count(ScenarioStatus::Pass),
            deviates: count(ScenarioStatus::Deviates),
            unknown: count(ScenarioStatus::Unknown),
            error: count(ScenarioStatus::Error),
        },
    }
}

/// Print a JSON run report to stdout.
///
/// JSON goes to stdout only; progress and warnings stay on stderr.
pub fn print_json_report(report: &JsonRunReport) -> Result<(), serde_json::Error> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
