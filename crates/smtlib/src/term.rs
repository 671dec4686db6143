/// SMT-LIB term (expression) representation.
///
/// The memory model works over mathematical integers and booleans only:
/// addresses, stored values and program variables are all `Int`, conditions
/// are `Bool`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    // === Literals ===
    /// Boolean literal
    BoolLit(bool),
    /// Integer literal (unbounded)
    IntLit(i128),

    // === Variables ===
    /// Named constant/variable reference
    Const(String),

    // === Boolean operations ===
    /// Logical NOT
    Not(Box<Term>),
    /// Logical AND (n-ary)
    And(Vec<Term>),
    /// Logical OR (n-ary)
    Or(Vec<Term>),
    /// Logical implication: `(=> a b)`
    Implies(Box<Term>, Box<Term>),
    /// Logical if-and-only-if: `(= a b)` for Bool
    Iff(Box<Term>, Box<Term>),

    // === Core ===
    /// Equality: `(= a b)`
    Eq(Box<Term>, Box<Term>),
    /// Distinct: `(distinct a b ...)`
    Distinct(Vec<Term>),
    /// If-then-else: `(ite cond then else)`
    Ite(Box<Term>, Box<Term>, Box<Term>),

    // === Integer arithmetic ===
    /// `(+ a b)`
    IntAdd(Box<Term>, Box<Term>),
    /// `(- a b)`
    IntSub(Box<Term>, Box<Term>),
    /// `(* a b)`
    IntMul(Box<Term>, Box<Term>),
    /// `(div a b)`, integer division
    IntDiv(Box<Term>, Box<Term>),
    /// `(mod a b)`
    IntMod(Box<Term>, Box<Term>),
    /// `(- a)`, integer negation
    IntNeg(Box<Term>),
    /// `(< a b)`
    IntLt(Box<Term>, Box<Term>),
    /// `(<= a b)`
    IntLe(Box<Term>, Box<Term>),
    /// `(> a b)`
    IntGt(Box<Term>, Box<Term>),
    /// `(>= a b)`
    IntGe(Box<Term>, Box<Term>),
}

impl Term {
    /// Returns `true` for terms that are boolean-sorted by construction.
    ///
    /// `Ite` is boolean when its `then` branch is; `Const` is never known to
    /// be boolean here since sorts live in the declarations.
    pub fn is_bool(&self) -> bool {
        match self {
            Term::BoolLit(_)
            | Term::Not(_)
            | Term::And(_)
            | Term::Or(_)
            | Term::Implies(_, _)
            | Term::Iff(_, _)
            | Term::Eq(_, _)
            | Term::Distinct(_)
            | Term::IntLt(_, _)
            | Term::IntLe(_, _)
            | Term::IntGt(_, _)
            | Term::IntGe(_, _) => true,
            Term::Ite(_, then_branch, _) => then_branch.is_bool(),
            _ => false,
        }
    }

    /// Number of nodes in the term tree.
    pub fn size(&self) -> usize {
        1 + match self {
            Term::BoolLit(_) | Term::IntLit(_) | Term::Const(_) => 0,
            Term::Not(a) | Term::IntNeg(a) => a.size(),
            Term::And(ts) | Term::Or(ts) | Term::Distinct(ts) => ts.iter().map(Term::size).sum(),
            Term::Implies(a, b)
            | Term::Iff(a, b)
            | Term::Eq(a, b)
            | Term::IntAdd(a, b)
            | Term::IntSub(a, b)
            | Term::IntMul(a, b)
            | Term::IntDiv(a, b)
            | Term::IntMod(a, b)
            | Term::IntLt(a, b)
            | Term::IntLe(a, b)
            | Term::IntGt(a, b)
            | Term::IntGe(a, b) => a.size() + b.size(),
            Term::Ite(c, t, e) => c.size() + t.size() + e.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_are_bool() {
        let x = Term::Const("x".to_string());
        assert!(Term::IntLt(Box::new(x.clone()), Box::new(Term::IntLit(1))).is_bool());
        assert!(Term::BoolLit(false).is_bool());
        assert!(!x.is_bool());
        assert!(!Term::IntAdd(Box::new(x.clone()), Box::new(Term::IntLit(1))).is_bool());
    }

    #[test]
    fn ite_sort_follows_then_branch() {
        let c = Term::BoolLit(true);
        let int_ite = Term::Ite(
            Box::new(c.clone()),
            Box::new(Term::IntLit(1)),
            Box::new(Term::IntLit(2)),
        );
        let bool_ite = Term::Ite(
            Box::new(c.clone()),
            Box::new(Term::BoolLit(true)),
            Box::new(Term::BoolLit(false)),
        );
        assert!(!int_ite.is_bool());
        assert!(bool_ite.is_bool());
    }

    #[test]
    fn size_counts_nodes() {
        let x = Term::Const("x".to_string());
        assert_eq!(x.size(), 1);
        let sum = Term::IntAdd(Box::new(x.clone()), Box::new(Term::IntLit(1)));
        assert_eq!(sum.size(), 3);
        let ite = Term::Ite(
            Box::new(Term::Eq(Box::new(x.clone()), Box::new(Term::IntLit(0)))),
            Box::new(sum),
            Box::new(x),
        );
        assert_eq!(ite.size(), 1 + 3 + 3 + 1);
    }
}
