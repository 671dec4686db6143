//! Constraint accumulator: the asserted facts of a session and the solver
//! that decides them.

use std::fmt;
use std::time::Instant;

use symem_smtlib::command::Command;
use symem_smtlib::script::Script;
use symem_smtlib::term::Term;
use symem_solver::{Model, SolverBackend, SolverResult};

use crate::error::MemoryError;
use crate::symbols::SymbolTable;

/// Outcome of a satisfiability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    Sat,
    Unsat,
    /// The solver could not decide; carries its reason (e.g. `"timeout"`).
    Unknown(String),
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Sat => write!(f, "sat"),
            CheckStatus::Unsat => write!(f, "unsat"),
            CheckStatus::Unknown(_) => write!(f, "unknown"),
        }
    }
}

#[derive(Debug)]
struct LastCheck {
    status: CheckStatus,
    model: Option<Model>,
}

/// Conjunction of asserted boolean terms plus the last check's outcome.
pub struct ConstraintAccumulator {
    backend: Box<dyn SolverBackend>,
    assertions: Vec<Term>,
    last: Option<LastCheck>,
}

impl fmt::Debug for ConstraintAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintAccumulator")
            .field("backend", &self.backend.name())
            .field("assertions", &self.assertions.len())
            .field("last", &self.last)
            .finish()
    }
}

impl ConstraintAccumulator {
    pub fn new(backend: Box<dyn SolverBackend>) -> Self {
        Self {
            backend,
            assertions: Vec::new(),
            last: None,
        }
    }

    /// Add `condition` to the conjunction.
    pub fn assert(&mut self, condition: Term) {
        tracing::trace!("assert #{}: {condition}", self.assertions.len());
        self.assertions.push(condition);
    }

    pub fn assertions(&self) -> &[Term] {
        &self.assertions
    }

    /// Name of the backing solver.
    pub fn backend_name(&self) -> String {
        self.backend.name()
    }

    /// Script with the logic, every declaration and every assertion, plus
    /// `extra` assertions that are not retained.
    pub fn script(&self, symbols: &SymbolTable, logic: Option<&str>, extra: &[Term]) -> Script {
        let mut script = Script::new();
        if let Some(logic) = logic {
            script.push(Command::SetLogic(logic.to_string()));
        }
        script.extend(symbols.declarations());
        script.extend(
            self.assertions
                .iter()
                .chain(extra)
                .cloned()
                .map(Command::Assert),
        );
        script
    }

    /// Decide the current conjunction and remember the outcome.
    ///
    /// A backend failure clears the remembered outcome before propagating.
    pub fn check(
        &mut self,
        symbols: &SymbolTable,
        logic: Option<&str>,
    ) -> Result<CheckStatus, MemoryError> {
        self.last = None;
        let script = self.script(symbols, logic, &[]);
        let result = self.run(&script)?;
        let (status, model) = split(result);
        self.last = Some(LastCheck {
            status: status.clone(),
            model,
        });
        Ok(status)
    }

    /// Decide the current conjunction plus `extra` without touching the
    /// remembered outcome.
    pub fn check_with(
        &self,
        symbols: &SymbolTable,
        logic: Option<&str>,
        extra: &[Term],
    ) -> Result<(CheckStatus, Option<Model>), MemoryError> {
        let script = self.script(symbols, logic, extra);
        Ok(split(self.run(&script)?))
    }

    fn run(&self, script: &Script) -> Result<SolverResult, MemoryError> {
        let start = Instant::now();
        let result = self.backend.check_sat(script);
        tracing::debug!(
            "{} checked {} commands in {:?}: {}",
            self.backend.name(),
            script.len(),
            start.elapsed(),
            match &result {
                Ok(SolverResult::Sat(_)) => "sat".to_string(),
                Ok(SolverResult::Unsat) => "unsat".to_string(),
                Ok(SolverResult::Unknown(reason)) => format!("unknown ({reason})"),
                Err(e) => format!("error ({e})"),
            }
        );
        Ok(result?)
    }

    /// Status of the last successful check, if any.
    pub fn last_status(&self) -> Option<&CheckStatus> {
        self.last.as_ref().map(|last| &last.status)
    }

    /// Model of the last check, available only when it returned `sat`.
    pub fn last_model(&self) -> Result<&Model, MemoryError> {
        match &self.last {
            Some(LastCheck {
                status: CheckStatus::Sat,
                model: Some(model),
            }) => Ok(model),
            Some(LastCheck { status, .. }) => Err(MemoryError::NoModel {
                status: Some(status.clone()),
            }),
            None => Err(MemoryError::NoModel { status: None }),
        }
    }

    /// Drop every assertion and the remembered outcome; keep the backend.
    pub fn clear(&mut self) {
        self.assertions.clear();
        self.last = None;
    }
}

/// A `sat` answer without a model still gets an empty model: every variable
/// is then reported through model completion.
fn split(result: SolverResult) -> (CheckStatus, Option<Model>) {
    match result {
        SolverResult::Sat(model) => (CheckStatus::Sat, Some(model.unwrap_or_default())),
        SolverResult::Unsat => (CheckStatus::Unsat, None),
        SolverResult::Unknown(reason) => (CheckStatus::Unknown(reason), None),
    }
}
