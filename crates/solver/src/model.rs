/// A model from the solver.
///
/// Contains constant assignments extracted from `(get-model)` output or from
/// the native API, keyed by SMT symbol.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    /// Variable assignments: `(symbol, value_string)` pairs.
    pub assignments: Vec<(String, String)>,
}

impl Model {
    /// Create a new empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a model from assignment pairs.
    pub fn with_assignments(assignments: Vec<(String, String)>) -> Self {
        Self { assignments }
    }

    /// Look up a symbol's value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Look up a symbol's value and read it as an integer.
    ///
    /// Returns `None` when the symbol is absent or its value is not an
    /// integer literal.
    pub fn get_int(&self, name: &str) -> Option<i128> {
        self.get(name).and_then(parse_int_value)
    }

    /// Return the number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Return whether the model is empty.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Parse an SMT-LIB integer value: `5`, `(- 5)` or `-5`.
pub fn parse_int_value(value: &str) -> Option<i128> {
    let value = value.trim();
    if let Some(inner) = value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        let magnitude = inner.trim().strip_prefix('-')?.trim();
        return format!("-{magnitude}").parse::<i128>().ok();
    }
    value.parse::<i128>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_model() {
        let model = Model::new();
        assert!(model.is_empty());
        assert_eq!(model.len(), 0);
        assert_eq!(model.get("x"), None);
    }

    #[test]
    fn model_with_assignments() {
        let model = Model::with_assignments(vec![
            ("x".to_string(), "42".to_string()),
            ("y".to_string(), "(- 7)".to_string()),
            ("b".to_string(), "true".to_string()),
        ]);
        assert_eq!(model.len(), 3);
        assert_eq!(model.get("x"), Some("42"));
        assert_eq!(model.get_int("x"), Some(42));
        assert_eq!(model.get_int("y"), Some(-7));
        assert_eq!(model.get_int("b"), None);
        assert_eq!(model.get_int("z"), None);
    }

    #[test]
    fn int_value_forms() {
        assert_eq!(parse_int_value("0"), Some(0));
        assert_eq!(parse_int_value(" 12 "), Some(12));
        assert_eq!(parse_int_value("-3"), Some(-3));
        assert_eq!(parse_int_value("(- 3)"), Some(-3));
        assert_eq!(parse_int_value("(+ 3)"), None);
        assert_eq!(parse_int_value("#x05"), None);
    }

    #[test]
    fn int_value_full_i128_range() {
        let min = format!("(- {})", i128::MIN.unsigned_abs());
        assert_eq!(parse_int_value(&min), Some(i128::MIN));
        assert_eq!(parse_int_value(&i128::MAX.to_string()), Some(i128::MAX));
    }
}
