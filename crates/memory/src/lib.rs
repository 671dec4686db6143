//! # symem-memory
//!
//! Symbolic memory model over an SMT solver.
//!
//! A [`Session`] gives every program variable and every heap object a
//! symbolic identity, records pointer stores in an append-only log, and
//! answers loads with `ite` chains over that log so the solver can reason
//! about aliasing. Conditions asserted on the session are decided by a
//! [`symem_solver::SolverBackend`].
//!
//! The components are usable on their own:
//!
//! - [`SymbolTable`]: collision-free SMT symbols and their declarations
//! - [`ExprRegistry`]: variable names to terms
//! - [`AddressAllocator`]: disjoint base addresses per allocation site
//! - [`SymbolicStore`]: the write log and load resolution
//! - [`ConstraintAccumulator`]: asserted conditions and checks

pub mod accumulator;
pub mod allocator;
pub mod error;
pub mod registry;
pub mod report;
pub mod session;
pub mod store;
pub mod symbols;

pub use accumulator::{CheckStatus, ConstraintAccumulator};
pub use allocator::{AddressAllocator, Allocation, MemoryObject};
pub use error::MemoryError;
pub use registry::{ExprRegistry, Variable};
pub use report::{ModelReport, Verdict};
pub use session::{Session, SessionConfig};
pub use store::{SymbolicStore, WriteRecord};
pub use symbols::SymbolTable;
