//! Abstraction over different SMT solver backends.
//!
//! The memory model only needs one thing from a solver: decide a script
//! and, when satisfiable, hand back a model. `SolverBackend` is that seam;
//! [`CliSolver`] and (with the `z3-native` feature) `Z3NativeSolver`
//! implement it, and tests can substitute their own.

use symem_smtlib::script::Script;

use crate::config::{SolverConfig, SolverKind};
use crate::error::SolverError;
use crate::result::SolverResult;
use crate::solver::CliSolver;

/// Trait abstracting over different SMT solver backends.
pub trait SolverBackend {
    /// Check satisfiability of the given SMT script.
    ///
    /// Returns:
    /// - `Ok(SolverResult::Sat(model))` if satisfiable
    /// - `Ok(SolverResult::Unsat)` if unsatisfiable
    /// - `Ok(SolverResult::Unknown(reason))` if the solver couldn't decide
    /// - `Err(SolverError)` if the solver invocation failed
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError>;

    /// Short name used in log output.
    fn name(&self) -> String {
        "solver".to_string()
    }
}

impl SolverBackend for CliSolver {
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        CliSolver::check_sat(self, script)
    }

    fn name(&self) -> String {
        format!("{} (subprocess)", self.config().kind)
    }
}

impl<T: SolverBackend + ?Sized> SolverBackend for Box<T> {
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        (**self).check_sat(script)
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Create a solver backend for the given configuration.
///
/// With the `z3-native` feature enabled, a Z3 configuration gets the
/// in-process backend (the binary path is then unused). Everything else runs
/// as a subprocess.
pub fn create_backend(config: SolverConfig) -> Box<dyn SolverBackend> {
    #[cfg(feature = "z3-native")]
    if config.kind == SolverKind::Z3 {
        use crate::z3_native::Z3NativeSolver;
        tracing::debug!("Using Z3 native API backend");
        return Box::new(Z3NativeSolver::new().with_timeout(config.timeout_ms));
    }

    tracing::debug!(
        "Using {} subprocess backend at {}",
        config.kind,
        config.solver_path.display()
    );
    Box::new(CliSolver::new(config))
}

/// Create a backend for `kind` with an auto-detected binary.
pub fn create_backend_for(kind: SolverKind) -> Result<Box<dyn SolverBackend>, SolverError> {
    #[cfg(feature = "z3-native")]
    if kind == SolverKind::Z3 {
        use crate::z3_native::Z3NativeSolver;
        tracing::debug!("Using Z3 native API backend");
        return Ok(Box::new(Z3NativeSolver::new()));
    }

    Ok(create_backend(SolverConfig::auto_detect_for(kind)?))
}

/// Create the default backend: Z3, configured from the environment
/// (`SYMEM_SOLVER`, `SYMEM_SOLVER_PATH`, `SYMEM_TIMEOUT_MS`).
pub fn create_default_backend() -> Result<Box<dyn SolverBackend>, SolverError> {
    Ok(create_backend(SolverConfig::from_env()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    struct Fixed(SolverResult);

    impl SolverBackend for Fixed {
        fn check_sat(&self, _script: &Script) -> Result<SolverResult, SolverError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn boxed_backend_delegates() {
        let boxed: Box<dyn SolverBackend> = Box::new(Fixed(SolverResult::Unsat));
        assert_eq!(boxed.check_sat(&Script::new()), Ok(SolverResult::Unsat));
        assert_eq!(boxed.name(), "solver");
    }

    #[test]
    fn cli_backend_names_its_kind() {
        let backend = create_backend(SolverConfig::new(
            SolverKind::Cvc5,
            PathBuf::from("/usr/bin/cvc5"),
        ));
        assert_eq!(backend.name(), "CVC5 (subprocess)");
    }

    #[test]
    fn create_backend_yices_reports_missing_binary() {
        // Succeeds on machines that have yices installed
        if let Err(err) = create_backend_for(SolverKind::Yices) {
            assert!(err.to_string().contains("Yices"), "{err}");
        }
    }
}
