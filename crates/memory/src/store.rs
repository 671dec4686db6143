//! Symbolic store: an ordered write log resolved into `ite` chains on load.
//!
//! Memory is flat and untyped. Every store appends a record; nothing is ever
//! overwritten, because two syntactically different address terms may still
//! denote the same location. A load asks "which write, if any, hit this
//! address last?" and encodes the answer as a nested conditional that the
//! solver resolves.

use symem_smtlib::term::Term;

use crate::symbols::SymbolTable;

/// Symbol prefix for unknown initial memory contents.
const DEFAULT_PREFIX: &str = "mem";

/// One `store(address, value)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRecord {
    pub address: Term,
    pub value: Term,
}

/// Append-only write log.
#[derive(Debug, Default, Clone)]
pub struct SymbolicStore {
    log: Vec<WriteRecord>,
}

impl SymbolicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a write. Asserts nothing.
    pub fn store(&mut self, address: Term, value: Term) {
        tracing::trace!("store #{}: [{address}] := {value}", self.log.len());
        self.log.push(WriteRecord { address, value });
    }

    /// Value term at `address` given every write so far.
    ///
    /// Builds `ite(address = a_n, v_n, ... ite(address = a_1, v_1, d))`, newest
    /// record outermost. The newest record whose address is the very same term
    /// as `address` ends the chain: its value replaces everything older,
    /// including the default `d`. Otherwise `d` is a fresh unconstrained
    /// symbol declared in `symbols`.
    pub fn load(&self, address: &Term, symbols: &mut SymbolTable) -> Term {
        let exact = self.log.iter().rposition(|r| r.address == *address);

        let (base, newer) = match exact {
            Some(idx) => (self.log[idx].value.clone(), &self.log[idx + 1..]),
            None => (Term::Const(symbols.fresh(DEFAULT_PREFIX)), &self.log[..]),
        };

        let term = newer.iter().fold(base, |inner, record| {
            Term::ite(
                address.clone().equals(record.address.clone()),
                record.value.clone(),
                inner,
            )
        });

        tracing::trace!(
            "load [{address}]: {} candidate writes, exact match: {}",
            newer.len(),
            exact.is_some()
        );
        term
    }

    /// Writes in call order.
    pub fn records(&self) -> &[WriteRecord] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }
}
