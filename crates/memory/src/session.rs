//! The session: one verification context owning every piece of memory-model
//! state.

use symem_smtlib::script::Script;
use symem_smtlib::term::Term;
use symem_solver::{SolverBackend, SolverConfig, create_backend};

use crate::accumulator::{CheckStatus, ConstraintAccumulator};
use crate::allocator::AddressAllocator;
use crate::error::MemoryError;
use crate::registry::{ExprRegistry, Variable};
use crate::report::{ModelReport, Verdict};
use crate::store::SymbolicStore;
use crate::symbols::SymbolTable;

/// How to build a [`Session`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    /// Solver to use; `None` reads the environment and auto-detects.
    pub solver: Option<SolverConfig>,
    /// Logic for `(set-logic ...)`; `None` leaves it to the solver.
    pub logic: Option<String>,
}

impl SessionConfig {
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = Some(solver);
        self
    }

    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic = Some(logic.into());
        self
    }
}

/// Symbolic memory model over an SMT solver.
///
/// ```no_run
/// use symem_memory::{CheckStatus, Session, SessionConfig};
///
/// let mut s = Session::from_config(SessionConfig::default()).unwrap();
/// let p = s.object_address("malloc");
/// s.store(p.clone(), s.literal(5));
/// let v = s.load(&p);
/// s.assert(v.not_equals(s.literal(5)));
/// assert_eq!(s.check().unwrap(), CheckStatus::Unsat);
/// ```
#[derive(Debug)]
pub struct Session {
    symbols: SymbolTable,
    registry: ExprRegistry,
    allocator: AddressAllocator,
    store: SymbolicStore,
    constraints: ConstraintAccumulator,
    logic: Option<String>,
}

impl Session {
    /// Empty session over `backend`.
    pub fn new(backend: Box<dyn SolverBackend>) -> Self {
        tracing::debug!("new session using {}", backend.name());
        Self {
            symbols: SymbolTable::new(),
            registry: ExprRegistry::new(),
            allocator: AddressAllocator::new(),
            store: SymbolicStore::new(),
            constraints: ConstraintAccumulator::new(backend),
            logic: None,
        }
    }

    /// Build a session, resolving the solver from `config` or the environment.
    pub fn from_config(config: SessionConfig) -> Result<Self, MemoryError> {
        let solver = match config.solver {
            Some(solver) => solver,
            None => SolverConfig::from_env()?,
        };
        let mut session = Self::new(create_backend(solver));
        session.logic = config.logic;
        Ok(session)
    }

    /// Emit `(set-logic logic)` in every script from now on.
    pub fn with_logic(mut self, logic: impl Into<String>) -> Self {
        self.logic = Some(logic.into());
        self
    }

    /// Term for program variable `name`; the same term on every call.
    pub fn variable(&mut self, name: &str) -> Term {
        self.registry.variable(name, &mut self.symbols)
    }

    /// Integer constant.
    pub fn literal(&self, value: i128) -> Term {
        ExprRegistry::literal(value)
    }

    /// Base address of the object allocated at site `tag`.
    ///
    /// The first request for a tag asserts its address differs from every
    /// object allocated before it.
    pub fn object_address(&mut self, tag: &str) -> Term {
        let allocation = self.allocator.object_address(tag, &mut self.symbols);
        for constraint in allocation.disjointness {
            self.constraints.assert(constraint);
        }
        allocation.address
    }

    /// Record `*addr = value`.
    pub fn store(&mut self, addr: Term, value: Term) {
        self.store.store(addr, value);
    }

    /// Term for `*addr` given every store so far.
    pub fn load(&mut self, addr: &Term) -> Term {
        self.store.load(addr, &mut self.symbols)
    }

    /// Add a boolean condition to the constraint set.
    pub fn assert(&mut self, condition: Term) {
        self.constraints.assert(condition);
    }

    /// Decide the constraint set. Assertions are kept.
    pub fn check(&mut self) -> Result<CheckStatus, MemoryError> {
        self.constraints.check(&self.symbols, self.logic.as_deref())
    }

    /// Values of the registered variables under the last `sat` model.
    pub fn model_report(&self) -> Result<ModelReport, MemoryError> {
        let model = self.constraints.last_model()?;
        ModelReport::from_model(&self.registry, model)
    }

    /// Check whether `property` holds under every model of the constraint set.
    ///
    /// Runs one scratch check of the constraints plus `not property`; neither
    /// the assertions nor the last check status change.
    pub fn prove(&self, property: Term) -> Result<Verdict, MemoryError> {
        let negated = !property;
        let (status, model) =
            self.constraints
                .check_with(&self.symbols, self.logic.as_deref(), &[negated])?;
        Ok(match (status, model) {
            (CheckStatus::Unsat, _) => Verdict::Valid,
            (CheckStatus::Sat, model) => Verdict::Invalid(ModelReport::from_model(
                &self.registry,
                &model.unwrap_or_default(),
            )?),
            (CheckStatus::Unknown(reason), _) => Verdict::Unknown(reason),
        })
    }

    /// SMT-LIB script for the current state: logic, declarations, assertions.
    pub fn to_script(&self) -> Script {
        self.constraints
            .script(&self.symbols, self.logic.as_deref(), &[])
    }

    /// Return to the freshly constructed state. The backend and logic stay.
    pub fn reset(&mut self) {
        tracing::debug!(
            "reset: dropping {} variables, {} objects, {} writes, {} assertions",
            self.registry.len(),
            self.allocator.len(),
            self.store.len(),
            self.constraints.assertions().len()
        );
        self.symbols = SymbolTable::new();
        self.registry = ExprRegistry::new();
        self.allocator = AddressAllocator::new();
        self.store = SymbolicStore::new();
        self.constraints.clear();
    }

    /// Status of the last successful check.
    pub fn last_status(&self) -> Option<&CheckStatus> {
        self.constraints.last_status()
    }

    pub fn write_count(&self) -> usize {
        self.store.len()
    }

    pub fn assertion_count(&self) -> usize {
        self.constraints.assertions().len()
    }

    /// Registered variables in registration order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.registry.iter()
    }

    /// Name of the solver backend.
    pub fn backend_name(&self) -> String {
        self.constraints.backend_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symem_solver::{Model, SolverError, SolverResult};

    struct Fixed(SolverResult);

    impl SolverBackend for Fixed {
        fn check_sat(&self, _script: &Script) -> Result<SolverResult, SolverError> {
            Ok(self.0.clone())
        }
    }

    fn session(answer: SolverResult) -> Session {
        Session::new(Box::new(Fixed(answer)))
    }

    #[test]
    fn allocation_asserts_pairwise_disjointness() {
        let mut s = session(SolverResult::Unsat);
        s.object_address("a");
        s.object_address("b");
        s.object_address("c");
        s.object_address("a");
        assert_eq!(s.assertion_count(), 3);
    }

    #[test]
    fn store_and_load_use_the_log() {
        let mut s = session(SolverResult::Unsat);
        let p = s.variable("p");
        s.store(p.clone(), s.literal(0));
        assert_eq!(s.load(&p), Term::int(0));
        s.store(p.clone(), s.literal(3));
        assert_eq!(s.load(&p), Term::int(3));
        assert_eq!(s.write_count(), 2);
        assert_eq!(s.assertion_count(), 0);
    }

    #[test]
    fn model_report_before_check_is_usage_error() {
        let s = session(SolverResult::Sat(None));
        assert_eq!(
            s.model_report(),
            Err(MemoryError::NoModel { status: None })
        );
    }

    #[test]
    fn model_report_after_unsat_is_usage_error() {
        let mut s = session(SolverResult::Unsat);
        s.variable("x");
        s.check().unwrap();
        assert_eq!(
            s.model_report(),
            Err(MemoryError::NoModel {
                status: Some(CheckStatus::Unsat)
            })
        );
    }

    #[test]
    fn model_report_after_sat_lists_variables() {
        let model = Model::with_assignments(vec![("y".into(), "3".into())]);
        let mut s = session(SolverResult::Sat(Some(model)));
        s.variable("x");
        s.variable("y");
        s.check().unwrap();

        let report = s.model_report().unwrap();
        assert_eq!(report.to_string(), "x = 0\ny = 3\n");
    }

    #[test]
    fn prove_maps_outcomes() {
        let s = session(SolverResult::Unsat);
        assert_eq!(s.prove(Term::bool(true)).unwrap(), Verdict::Valid);

        let s = session(SolverResult::Unknown("incomplete".into()));
        assert_eq!(
            s.prove(Term::bool(true)).unwrap(),
            Verdict::Unknown("incomplete".into())
        );

        let mut s = session(SolverResult::Sat(None));
        s.variable("x");
        let verdict = s.prove(Term::bool(true)).unwrap();
        assert!(matches!(verdict, Verdict::Invalid(ref r) if r.get("x") == Some(0)));
        assert_eq!(s.assertion_count(), 0);
        assert_eq!(s.last_status(), None);
    }

    #[test]
    fn script_carries_logic_and_state() {
        let mut s = session(SolverResult::Unsat).with_logic("QF_LIA");
        let x = s.variable("x");
        s.assert(x.gt(Term::int(1)));
        assert_eq!(
            s.to_script().to_string(),
            "(set-logic QF_LIA)\n(declare-const x Int)\n(assert (> x 1))"
        );
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut s = session(SolverResult::Sat(None)).with_logic("QF_LIA");
        let p = s.object_address("malloc");
        s.object_address("malloc2");
        s.store(p.clone(), s.literal(1));
        s.variable("x");
        s.check().unwrap();

        s.reset();

        assert_eq!(s.write_count(), 0);
        assert_eq!(s.assertion_count(), 0);
        assert_eq!(s.variables().count(), 0);
        assert_eq!(s.last_status(), None);
        assert_eq!(s.to_script().to_string(), "(set-logic QF_LIA)");
        // Fresh symbols restart after a reset.
        assert_eq!(s.object_address("other"), Term::var("addr.other!0"));
        assert_eq!(s.load(&p), Term::var("mem!0"));
    }
}
