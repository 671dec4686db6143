use std::path::PathBuf;

use thiserror::Error;

use crate::config::SolverKind;

/// Errors from solver interaction.
///
/// An `unknown` answer is not an error; it is reported as
/// [`SolverResult::Unknown`](crate::result::SolverResult::Unknown).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SolverError {
    /// Solver binary not found at the specified path.
    #[error("{0} binary not found at: {}", .1.display())]
    NotFound(SolverKind, PathBuf),
    /// Process failed to start or crashed.
    #[error("Solver process error: {0}")]
    ProcessError(String),
    /// Failed to parse solver output.
    #[error("Failed to parse solver output: {0}")]
    ParseError(String),
    /// The backend cannot express a term or command it was given.
    #[error("Unsupported by backend: {0}")]
    Unsupported(String),
    /// Invalid solver configuration (bad environment value, unknown kind).
    #[error("Invalid solver configuration: {0}")]
    Config(String),
}
