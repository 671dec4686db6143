//! Errors raised by the memory model.

use symem_solver::SolverError;
use thiserror::Error;

use crate::accumulator::CheckStatus;

/// Memory-model error.
#[derive(Debug, Error, PartialEq)]
pub enum MemoryError {
    /// A model was requested but the last check did not return `sat`.
    #[error("no model available (last check: {})", describe(.status))]
    NoModel { status: Option<CheckStatus> },

    /// The solver reported a value that is not an integer numeral.
    #[error("model value for `{name}` is not an integer: {value}")]
    ModelValue { name: String, value: String },

    /// The solver backend failed. The session should be reset.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

fn describe(status: &Option<CheckStatus>) -> String {
    match status {
        Some(status) => status.to_string(),
        None => "none".to_string(),
    }
}
