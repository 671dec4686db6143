//! SMT symbol allocation.
//!
//! Every constant the memory model hands to the solver is declared exactly
//! once, under a name no other constant in the session uses. The name is the
//! spelling the solver sees: `|` and `\` become `_`, and SMT-LIB reserved
//! words and Core/Ints function names count as taken. Caller-chosen variable
//! names keep their spelling when it is free; internally minted symbols
//! (`mem!3`, `addr.malloc!0`) step aside when a caller got there first.

use std::collections::{HashMap, HashSet};

use symem_smtlib::command::Command;
use symem_smtlib::formatter::sanitize_symbol;
use symem_smtlib::sort::Sort;

/// Names a declared constant must not shadow: SMT-LIB reserved words, command
/// names, and the function symbols of Core, Ints and the extras z3 and cvc5
/// accept in `QF_LIA`/`ALL` scripts.
const RESERVED: &[&str] = &[
    // reserved words
    "!", "_", "as", "BINARY", "DECIMAL", "exists", "forall", "HEXADECIMAL", "let", "match",
    "NUMERAL", "par", "STRING",
    // commands
    "assert", "check-sat", "check-sat-assuming", "declare-const", "declare-datatype",
    "declare-datatypes", "declare-fun", "declare-sort", "define-fun", "define-fun-rec",
    "define-funs-rec", "define-sort", "echo", "exit", "get-assertions", "get-assignment",
    "get-info", "get-model", "get-option", "get-proof", "get-unsat-assumptions",
    "get-unsat-core", "get-value", "pop", "push", "reset", "reset-assertions", "set-info",
    "set-logic", "set-option",
    // Core
    "true", "false", "not", "=>", "and", "or", "xor", "=", "distinct", "ite",
    // Ints
    "-", "+", "*", "div", "mod", "abs", "<=", "<", ">=", ">",
    // Reals/Arrays names solvers resolve in any logic
    "/", "to_real", "to_int", "is_int", "select", "store", "rem", "^",
    // sort names
    "Bool", "Int", "Real", "Array",
];

fn is_reserved(symbol: &str) -> bool {
    RESERVED.contains(&symbol)
}

/// The spelling `name` is declared under before any collision suffix.
/// Symbols starting with `@` or `.` belong to the solver, so those get a
/// leading `_`.
fn wire_spelling(name: &str) -> String {
    let spelled = sanitize_symbol(name);
    if spelled.starts_with('@') || spelled.starts_with('.') {
        format!("_{spelled}")
    } else {
        spelled
    }
}

/// Declared SMT constants of one session, in declaration order.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    declared: Vec<String>,
    used: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a symbol spelled like `preferred`, or `preferred!k` for the
    /// smallest `k` that is still free. The returned string is exactly what
    /// the solver will report the constant as.
    pub fn claim(&mut self, preferred: &str) -> String {
        let base = wire_spelling(preferred);
        if !self.taken(&base) {
            return self.declare(base);
        }
        let mut k = 1usize;
        loop {
            let candidate = format!("{base}!{k}");
            if !self.taken(&candidate) {
                return self.declare(candidate);
            }
            k += 1;
        }
    }

    /// Declare a fresh symbol `prefix!n` with a per-prefix counter.
    pub fn fresh(&mut self, prefix: &str) -> String {
        let base = wire_spelling(prefix);
        let counter = self.counters.entry(base.clone()).or_insert(0);
        loop {
            let candidate = format!("{base}!{counter}");
            *counter += 1;
            if !self.used.contains(&candidate) {
                return self.declare(candidate);
            }
        }
    }

    fn taken(&self, symbol: &str) -> bool {
        symbol.is_empty() || is_reserved(symbol) || self.used.contains(symbol)
    }

    fn declare(&mut self, symbol: String) -> String {
        self.used.insert(symbol.clone());
        self.declared.push(symbol.clone());
        symbol
    }

    /// Whether `symbol` has been declared.
    pub fn contains(&self, symbol: &str) -> bool {
        self.used.contains(symbol)
    }

    /// `declare-const` commands for every symbol, all `Int`.
    pub fn declarations(&self) -> impl Iterator<Item = Command> + '_ {
        self.declared
            .iter()
            .map(|name| Command::DeclareConst(name.clone(), Sort::Int))
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_keeps_free_names() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.claim("x"), "x");
        assert_eq!(symbols.claim("y"), "y");
        assert_eq!(symbols.len(), 2);
    }

    #[test]
    fn claim_steps_around_taken_names() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.fresh("mem"), "mem!0");
        assert_eq!(symbols.claim("mem!0"), "mem!0!1");
        assert!(symbols.contains("mem!0!1"));
    }

    #[test]
    fn fresh_skips_claimed_names() {
        let mut symbols = SymbolTable::new();
        symbols.claim("mem!0");
        symbols.claim("mem!1");
        assert_eq!(symbols.fresh("mem"), "mem!2");
        assert_eq!(symbols.fresh("mem"), "mem!3");
        assert_eq!(symbols.fresh("addr"), "addr!0");
    }

    #[test]
    fn reserved_words_get_a_suffix() {
        let mut symbols = SymbolTable::new();
        for word in ["true", "ite", "not", "-", "let", "_", "distinct", "Int"] {
            assert_eq!(symbols.claim(word), format!("{word}!1"));
        }
        assert!(!symbols.contains("true"));
    }

    #[test]
    fn quote_breaking_characters_collapse_before_uniqueness() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.claim("a|b"), "a_b");
        assert_eq!(symbols.claim("a_b"), "a_b!1");
        assert_eq!(symbols.claim("a\\b"), "a_b!2");
        assert_eq!(symbols.len(), 3);
    }

    #[test]
    fn solver_owned_prefixes_are_escaped() {
        let mut symbols = SymbolTable::new();
        assert_eq!(symbols.claim("@x"), "_@x");
        assert_eq!(symbols.claim(".y"), "_.y");
        assert_eq!(symbols.claim(""), "!1");
    }

    #[test]
    fn declarations_follow_order() {
        let mut symbols = SymbolTable::new();
        symbols.claim("p");
        symbols.fresh("mem");
        let decls: Vec<String> = symbols.declarations().map(|c| c.to_string()).collect();
        assert_eq!(
            decls,
            vec!["(declare-const p Int)", "(declare-const mem!0 Int)"]
        );
    }
}
