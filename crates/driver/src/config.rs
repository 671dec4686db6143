//! Solver selection from command-line flags layered over the environment.

use std::path::PathBuf;

use symem_solver::config::ENV_SOLVER;
use symem_solver::{SolverConfig, SolverError, SolverKind};

/// Solver flags as given on the command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolverOptions {
    pub kind: Option<SolverKind>,
    pub path: Option<PathBuf>,
    pub timeout_ms: Option<u64>,
}

impl SolverOptions {
    /// Resolve against the process environment.
    pub fn resolve(&self) -> Result<SolverConfig, SolverError> {
        self.resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve with flags taking precedence over `lookup`.
    ///
    /// Without a `--solver` flag the kind comes from `SYMEM_SOLVER`, then Z3.
    /// Without a `--solver-path` flag the binary is auto-detected.
    pub fn resolve_with(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<SolverConfig, SolverError> {
        let config = match (self.kind, &self.path) {
            (None, None) => SolverConfig::from_lookup(&lookup)?,
            (kind, path) => {
                let kind = match kind {
                    Some(kind) => kind,
                    None => match lookup(ENV_SOLVER) {
                        Some(value) => value
                            .parse::<SolverKind>()
                            .map_err(|e| SolverError::Config(format!("{ENV_SOLVER}: {e}")))?,
                        None => SolverKind::Z3,
                    },
                };
                match path {
                    Some(path) => SolverConfig::new(kind, path.clone()),
                    None => SolverConfig::auto_detect_for(kind)?,
                }
            }
        };

        Ok(match self.timeout_ms {
            Some(timeout_ms) => config.with_timeout(timeout_ms),
            None => config,
        })
    }
}
