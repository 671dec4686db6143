//! Term construction helpers.
//!
//! Building terms with `Box::new` at every node gets noisy in encoders, so
//! these helpers give a compact vocabulary: `Term::var("p").add(Term::int(1))`,
//! `a.lt(b)`, `Term::ite(c, t, e)`. The arithmetic operators (`+`, `-`, `*`,
//! unary `-`) and logical `!` are implemented as well.

use std::ops::{Add, Mul, Neg, Not, Sub};

use crate::term::Term;

impl Term {
    /// Integer literal.
    pub fn int(value: impl Into<i128>) -> Term {
        Term::IntLit(value.into())
    }

    /// Boolean literal.
    pub fn bool(value: bool) -> Term {
        Term::BoolLit(value)
    }

    /// Reference to a declared constant.
    pub fn var(name: impl Into<String>) -> Term {
        Term::Const(name.into())
    }

    /// `(= self rhs)`
    pub fn equals(self, rhs: Term) -> Term {
        Term::Eq(Box::new(self), Box::new(rhs))
    }

    /// `(not (= self rhs))`
    pub fn not_equals(self, rhs: Term) -> Term {
        Term::Not(Box::new(self.equals(rhs)))
    }

    /// `(< self rhs)`
    pub fn lt(self, rhs: Term) -> Term {
        Term::IntLt(Box::new(self), Box::new(rhs))
    }

    /// `(<= self rhs)`
    pub fn le(self, rhs: Term) -> Term {
        Term::IntLe(Box::new(self), Box::new(rhs))
    }

    /// `(> self rhs)`
    pub fn gt(self, rhs: Term) -> Term {
        Term::IntGt(Box::new(self), Box::new(rhs))
    }

    /// `(>= self rhs)`
    pub fn ge(self, rhs: Term) -> Term {
        Term::IntGe(Box::new(self), Box::new(rhs))
    }

    /// `(=> self rhs)`
    pub fn implies(self, rhs: Term) -> Term {
        Term::Implies(Box::new(self), Box::new(rhs))
    }

    /// `(ite cond then_branch else_branch)`
    pub fn ite(cond: Term, then_branch: Term, else_branch: Term) -> Term {
        Term::Ite(Box::new(cond), Box::new(then_branch), Box::new(else_branch))
    }

    /// Conjunction. A single conjunct is returned as is.
    pub fn and(mut terms: Vec<Term>) -> Term {
        if terms.len() == 1 {
            return terms.remove(0);
        }
        Term::And(terms)
    }

    /// Disjunction. A single disjunct is returned as is.
    pub fn or(mut terms: Vec<Term>) -> Term {
        if terms.len() == 1 {
            return terms.remove(0);
        }
        Term::Or(terms)
    }

    /// `(distinct t1 t2 ...)`
    pub fn distinct(terms: Vec<Term>) -> Term {
        Term::Distinct(terms)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::IntLit(value.into())
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::IntLit(value.into())
    }
}

impl From<i128> for Term {
    fn from(value: i128) -> Self {
        Term::IntLit(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::BoolLit(value)
    }
}

impl Add for Term {
    type Output = Term;

    fn add(self, rhs: Term) -> Term {
        Term::IntAdd(Box::new(self), Box::new(rhs))
    }
}

impl Sub for Term {
    type Output = Term;

    fn sub(self, rhs: Term) -> Term {
        Term::IntSub(Box::new(self), Box::new(rhs))
    }
}

impl Mul for Term {
    type Output = Term;

    fn mul(self, rhs: Term) -> Term {
        Term::IntMul(Box::new(self), Box::new(rhs))
    }
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::IntNeg(Box::new(self))
    }
}

impl Not for Term {
    type Output = Term;

    fn not(self) -> Term {
        Term::Not(Box::new(self))
    }
}
