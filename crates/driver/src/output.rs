/// Colored scenario output formatter.
///
/// Produces per-scenario results with color-coded status:
///   [PASS]     test3 multi-level pointers (green)
///   [DEVIATES] test9 struct fields - got unsat, expected sat (red)
///   [UNKNOWN]  test4 array and pointers - timeout (yellow)
///   [ERROR]    test0 simple pointer - solver failure (red)
use colored::Colorize;

use symem_memory::{CheckStatus, ModelReport};

/// How a scenario's final status compares with its expectation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioStatus {
    /// Final status matched the expectation.
    Pass,
    /// The solver decided, but not as expected.
    Deviates,
    /// The solver could not decide.
    Unknown,
    /// The solver failed.
    Error,
}

/// Result of running one scenario.
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: String,
    pub title: String,
    pub status: ScenarioStatus,
    /// "sat" or "unsat"
    pub expected: String,
    /// Final check status, absent on solver failure.
    pub outcome: Option<CheckStatus>,
    /// Variable values under the program constraints.
    pub report: Option<ModelReport>,
    /// Detail message for DEVIATES/UNKNOWN/ERROR
    pub message: Option<String>,
    /// Final SMT-LIB script, for `--dump-smt`
    pub script: Option<String>,
    pub duration_ms: u64,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.status == ScenarioStatus::Pass
    }
}

/// Print scenario results with colored output.
///
/// Output format:
/// ```text
///   [PASS]     test0 simple pointer: unsat (3ms)
///              p = 1
///              q = 5
///   [DEVIATES] test9 struct fields: unsat (expected sat)
///
/// Summary: 10 PASS, 1 DEVIATES (total: 41ms)
/// ```
///
/// Model reports are shown with `show_models`; timing only with `verbose`.
pub fn print_results(results: &[ScenarioResult], show_models: bool, verbose: bool) {
    if results.is_empty() {
        eprintln!("{}", "No scenarios selected.".dimmed());
        return;
    }

    eprintln!();
    for result in results {
        let label = format!("{} {}", result.name, result.title);
        let outcome = result
            .outcome
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());

        match result.status {
            ScenarioStatus::Pass => {
                let mut line = format!("  {}      {}: {}", "[PASS]".green().bold(), label, outcome);
                if verbose {
                    line.push_str(&format!(" ({}ms)", result.duration_ms));
                }
                eprintln!("{}", line);
            }
            ScenarioStatus::Deviates => {
                eprintln!(
                    "  {}  {}: {} (expected {})",
                    "[DEVIATES]".red().bold(),
                    label,
                    outcome,
                    result.expected,
                );
            }
            ScenarioStatus::Unknown => {
                let detail = result.message.as_deref().unwrap_or("solver gave up");
                eprintln!("  {}   {} ({})", "[UNKNOWN]".yellow().bold(), label, detail);
            }
            ScenarioStatus::Error => {
                let detail = result.message.as_deref().unwrap_or("solver failed");
                eprintln!("  {}     {} ({})", "[ERROR]".red().bold(), label, detail);
            }
        }

        if show_models && let Some(report) = &result.report {
            for line in report.to_string().lines() {
                eprintln!("             {}", line.dimmed());
            }
        }

        if let Some(script) = &result.script {
            println!("; {}", result.name);
            println!("{script}");
        }
    }

    let count = |status: ScenarioStatus| results.iter().filter(|r| r.status == status).count();
    let pass_count = count(ScenarioStatus::Pass);
    let deviate_count = count(ScenarioStatus::Deviates);
    let unknown_count = count(ScenarioStatus::Unknown);
    let error_count = count(ScenarioStatus::Error);

    let total_ms: u64 = results.iter().map(|r| r.duration_ms).sum();

    eprintln!();
    eprint!("Summary: ");
    let mut parts = Vec::new();
    if pass_count > 0 {
        parts.push(format!("{} {}", pass_count, "PASS".green()));
    }
    if deviate_count > 0 {
        parts.push(format!("{} {}", deviate_count, "DEVIATES".red()));
    }
    if unknown_count > 0 {
        parts.push(format!("{} {}", unknown_count, "UNKNOWN".yellow()));
    }
    if error_count > 0 {
        parts.push(format!("{} {}", error_count, "ERROR".red()));
    }

    let summary = parts.join(", ");
    if total_ms > 0 {
        eprintln!("{} (total: {}ms)", summary, total_ms);
    } else {
        eprintln!("{}", summary);
    }
    eprintln!();
}

/// Print a header for the run.
pub fn print_header(backend: &str) {
    eprintln!("{}", format!("Running scenarios with {backend}").bold());
}
