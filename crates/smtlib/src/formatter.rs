//! SMT-LIB2 text formatting for AST types.
//!
//! Implements `Display` for [`Sort`], [`Term`], [`Command`], and [`Script`],
//! producing SMT-LIB2 text that solvers such as Z3 accept on stdin.

use std::fmt;

use crate::command::Command;
use crate::script::Script;
use crate::sort::Sort;
use crate::term::Term;

// ---------------------------------------------------------------------------
// Symbols
// ---------------------------------------------------------------------------

/// Characters allowed in an SMT-LIB simple symbol besides ASCII alphanumerics.
const SYMBOL_PUNCT: &str = "~!@$%^&*_-+=<>.?/";

/// Whether `name` can be written as an SMT-LIB simple symbol without quoting.
pub fn is_simple_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => false,
        Some(first) if first.is_ascii_digit() => false,
        Some(first) => std::iter::once(first)
            .chain(chars)
            .all(|c| c.is_ascii_alphanumeric() || SYMBOL_PUNCT.contains(c)),
    }
}

/// `name` with the two characters a quoted symbol cannot hold, `|` and `\\`,
/// replaced by `_`. This is the spelling a solver sees and reports back.
pub fn sanitize_symbol(name: &str) -> String {
    name.chars()
        .map(|c| if c == '|' || c == '\\' { '_' } else { c })
        .collect()
}

/// Write `name` as a symbol, quoting it as `|name|` when it is not simple.
fn fmt_symbol(name: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if is_simple_symbol(name) {
        write!(f, "{name}")
    } else {
        write!(f, "|{}|", sanitize_symbol(name))
    }
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Int => write!(f, "Int"),
        }
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// Write a binary SMT-LIB operator: `(op lhs rhs)`.
fn fmt_binop(op: &str, lhs: &Term, rhs: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({op} {lhs} {rhs})")
}

/// Write a unary SMT-LIB operator: `(op arg)`.
fn fmt_unop(op: &str, arg: &Term, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({op} {arg})")
}

/// Write an n-ary operator, or `empty` when there are no operands.
fn fmt_nary(op: &str, terms: &[Term], empty: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if terms.is_empty() {
        return write!(f, "{empty}");
    }
    write!(f, "({op}")?;
    for t in terms {
        write!(f, " {t}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // --- Literals ---
            Term::BoolLit(true) => write!(f, "true"),
            Term::BoolLit(false) => write!(f, "false"),
            Term::IntLit(n) => {
                if *n < 0 {
                    // SMT-LIB represents negative integers as `(- N)`
                    write!(f, "(- {})", n.unsigned_abs())
                } else {
                    write!(f, "{n}")
                }
            }

            // --- Variables ---
            Term::Const(name) => fmt_symbol(name, f),

            // --- Boolean operations ---
            Term::Not(inner) => fmt_unop("not", inner, f),
            Term::And(terms) => fmt_nary("and", terms, "true", f),
            Term::Or(terms) => fmt_nary("or", terms, "false", f),
            Term::Implies(lhs, rhs) => fmt_binop("=>", lhs, rhs, f),
            Term::Iff(lhs, rhs) => fmt_binop("=", lhs, rhs, f),

            // --- Core ---
            Term::Eq(lhs, rhs) => fmt_binop("=", lhs, rhs, f),
            // distinct needs at least two arguments; fewer are trivially true
            Term::Distinct(terms) if terms.len() < 2 => write!(f, "true"),
            Term::Distinct(terms) => fmt_nary("distinct", terms, "true", f),
            Term::Ite(cond, then_branch, else_branch) => {
                write!(f, "(ite {cond} {then_branch} {else_branch})")
            }

            // --- Integer arithmetic ---
            Term::IntAdd(a, b) => fmt_binop("+", a, b, f),
            Term::IntSub(a, b) => fmt_binop("-", a, b, f),
            Term::IntMul(a, b) => fmt_binop("*", a, b, f),
            Term::IntDiv(a, b) => fmt_binop("div", a, b, f),
            Term::IntMod(a, b) => fmt_binop("mod", a, b, f),
            Term::IntNeg(a) => fmt_unop("-", a, f),
            Term::IntLt(a, b) => fmt_binop("<", a, b, f),
            Term::IntLe(a, b) => fmt_binop("<=", a, b, f),
            Term::IntGt(a, b) => fmt_binop(">", a, b, f),
            Term::IntGe(a, b) => fmt_binop(">=", a, b, f),
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::SetLogic(logic) => write!(f, "(set-logic {logic})"),
            Command::SetOption(key, value) => write!(f, "(set-option :{key} {value})"),
            Command::DeclareConst(name, sort) => {
                write!(f, "(declare-const ")?;
                fmt_symbol(name, f)?;
                write!(f, " {sort})")
            }
            Command::Assert(term) => write!(f, "(assert {term})"),
            Command::CheckSat => write!(f, "(check-sat)"),
            Command::GetModel => write!(f, "(get-model)"),
            Command::Push(n) => write!(f, "(push {n})"),
            Command::Pop(n) => write!(f, "(pop {n})"),
            Command::Comment(text) => write!(f, ";; {text}"),
            Command::Exit => write!(f, "(exit)"),
        }
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================
