//! Expression registry: program variables to SMT terms.

use std::collections::HashMap;

use symem_smtlib::term::Term;

use crate::symbols::SymbolTable;

/// A registered program variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Name the caller used.
    pub name: String,
    /// SMT symbol backing the variable (usually the same spelling).
    pub symbol: String,
}

impl Variable {
    /// The variable's value term.
    pub fn term(&self) -> Term {
        Term::Const(self.symbol.clone())
    }
}

/// Memoized mapping from variable names to their value terms.
///
/// Registration order is kept so reports list variables the way the
/// program declared them.
#[derive(Debug, Default, Clone)]
pub struct ExprRegistry {
    variables: Vec<Variable>,
    by_name: HashMap<String, usize>,
}

impl ExprRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Term for `name`, minting an unconstrained integer symbol on first use.
    pub fn variable(&mut self, name: &str, symbols: &mut SymbolTable) -> Term {
        if let Some(&idx) = self.by_name.get(name) {
            return self.variables[idx].term();
        }

        let symbol = symbols.claim(name);
        tracing::trace!("registered variable {name} as {symbol}");
        let variable = Variable {
            name: name.to_string(),
            symbol,
        };
        let term = variable.term();
        self.by_name.insert(name.to_string(), self.variables.len());
        self.variables.push(variable);
        term
    }

    /// Integer constant term. Literals are never registered.
    pub fn literal(value: i128) -> Term {
        Term::IntLit(value)
    }

    /// Look up a registered variable without creating it.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).map(|&idx| &self.variables[idx])
    }

    /// Registered variables in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
