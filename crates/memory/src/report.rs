//! Concrete values extracted from a satisfying model.

use std::fmt;

use symem_solver::Model;
use symem_solver::model::parse_int_value;

use crate::error::MemoryError;
use crate::registry::ExprRegistry;

/// Registered variables and their values under one model, in registration
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModelReport {
    entries: Vec<(String, i128)>,
}

impl ModelReport {
    /// Read every registered variable out of `model`.
    ///
    /// Variables the solver left out are unconstrained and read as `0`.
    pub fn from_model(registry: &ExprRegistry, model: &Model) -> Result<Self, MemoryError> {
        let entries = registry
            .iter()
            .map(|var| match model.get(&var.symbol) {
                None => Ok((var.name.clone(), 0)),
                Some(raw) => parse_int_value(raw)
                    .map(|value| (var.name.clone(), value))
                    .ok_or_else(|| MemoryError::ModelValue {
                        name: var.name.clone(),
                        value: raw.to_string(),
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    /// Value of variable `name`, if it is registered.
    pub fn get(&self, name: &str) -> Option<i128> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i128)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.entries {
            writeln!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Outcome of proving a property against the current constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No assignment satisfying the constraints violates the property.
    Valid,
    /// A counterexample.
    Invalid(ModelReport),
    /// The solver could not decide.
    Unknown(String),
}

impl Verdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid)
    }
}
