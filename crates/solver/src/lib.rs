//! # symem-solver
//!
//! SMT solver interface for the symem memory model.
//!
//! Solvers run either as a subprocess speaking SMT-LIB2 on stdin
//! ([`CliSolver`], for Z3, CVC5 and Yices) or in process through the z3
//! crate (`z3_native`, behind the `z3-native` feature). Both sit behind
//! [`SolverBackend`].
//!
//! ## Usage
//!
//! ```no_run
//! use symem_solver::{CliSolver, SolverResult};
//!
//! let solver = CliSolver::with_default_config().unwrap();
//! let result = solver.check_sat_raw("
//!     (declare-const x Int)
//!     (assert (> x 0))
//!     (assert (< x 10))
//!     (check-sat)
//!     (get-model)
//! ").unwrap();
//!
//! match result {
//!     SolverResult::Sat(model) => println!("SAT: {model:?}"),
//!     SolverResult::Unsat => println!("UNSAT"),
//!     SolverResult::Unknown(reason) => println!("Unknown: {reason}"),
//! }
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
mod parser;
pub mod result;
pub mod solver;
#[cfg(feature = "z3-native")]
pub mod z3_native;

pub use backend::{SolverBackend, create_backend, create_backend_for, create_default_backend};
pub use config::{SolverConfig, SolverKind};
pub use error::SolverError;
pub use model::Model;
pub use result::SolverResult;
pub use solver::CliSolver;
