use std::io::Write;
use std::process::{Command, Stdio};

use symem_smtlib::command::Command as SmtCmd;
use symem_smtlib::script::Script;

use crate::config::{SolverConfig, SolverKind};
use crate::error::SolverError;
use crate::parser::parse_solver_output;
use crate::result::SolverResult;

/// Subprocess solver interface.
///
/// Spawns the configured solver (Z3, CVC5 or Yices), pipes SMT-LIB2 text to
/// its stdin and parses the answer. Each call is independent: the whole
/// script is sent every time and the process exits afterwards.
#[derive(Debug, Clone)]
pub struct CliSolver {
    config: SolverConfig,
}

impl CliSolver {
    /// Create a new `CliSolver` with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Create a Z3 `CliSolver` with auto-detected location and default settings.
    pub fn with_default_config() -> Result<Self, SolverError> {
        Self::with_default_config_for(SolverKind::Z3)
    }

    /// Create a `CliSolver` for `kind` with auto-detected location.
    pub fn with_default_config_for(kind: SolverKind) -> Result<Self, SolverError> {
        let config = SolverConfig::auto_detect_for(kind)?;
        Ok(Self { config })
    }

    /// Get a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Check satisfiability of a Script.
    ///
    /// Formats the script to SMT-LIB2 text, turns model production on, and
    /// appends `(check-sat)` and `(get-model)` unless already present.
    pub fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        let smtlib = render_script(script);
        self.check_sat_raw(&smtlib)
    }

    /// Check satisfiability from a raw SMT-LIB2 string.
    pub fn check_sat_raw(&self, smtlib: &str) -> Result<SolverResult, SolverError> {
        self.config.validate()?;

        let args = self.config.build_args();
        let kind = self.config.kind;
        tracing::trace!("Running {kind} with {args:?}:\n{smtlib}");

        let mut child = Command::new(&self.config.solver_path)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SolverError::ProcessError(format!("Failed to start {kind}: {e}")))?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                SolverError::ProcessError(format!("Failed to open {kind} stdin"))
            })?;
            stdin.write_all(smtlib.as_bytes()).map_err(|e| {
                SolverError::ProcessError(format!("Failed to write to {kind} stdin: {e}"))
            })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| SolverError::ProcessError(format!("Failed to wait for {kind}: {e}")))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if stderr.contains("timeout") || stdout.trim() == "timeout" {
            return Ok(SolverResult::Unknown("timeout".to_string()));
        }

        parse_solver_output(&stdout, &stderr)
    }
}

/// Render `script` as solver input.
fn render_script(script: &Script) -> String {
    let mut smtlib = String::new();

    let produce_models = SmtCmd::SetOption("produce-models".to_string(), "true".to_string());
    if !script.contains(&produce_models) {
        smtlib.push_str(&produce_models.to_string());
        smtlib.push('\n');
    }

    for cmd in script.commands() {
        smtlib.push_str(&cmd.to_string());
        smtlib.push('\n');
    }

    if !script.contains(&SmtCmd::CheckSat) {
        smtlib.push_str("(check-sat)\n");
    }
    if !script.contains(&SmtCmd::GetModel) {
        smtlib.push_str("(get-model)\n");
    }
    smtlib
}
