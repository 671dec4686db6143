//! In-process Z3 backend using the z3 crate.
//!
//! `Z3NativeSolver` translates the SMT-LIB AST directly into z3 API calls,
//! avoiding a process spawn per check. It links against the system Z3
//! library (`libz3-dev` / `brew install z3`); the `bundled` feature of the z3
//! crate is not used.

use std::collections::HashMap;

use symem_smtlib::command::Command as SmtCmd;
use symem_smtlib::script::Script;
use symem_smtlib::sort::Sort;
use symem_smtlib::term::Term;
use z3::ast::{Bool, Int};
use z3::{Params, SatResult, Solver};

use crate::error::SolverError;
use crate::model::Model;
use crate::result::SolverResult;

/// Native Z3 solver backend.
///
/// z3 0.19 uses a global context, so no `Context` is held here. A fresh
/// `Solver` is created per check.
#[derive(Debug, Default)]
pub struct Z3NativeSolver {
    timeout_ms: u64,
}

impl Z3NativeSolver {
    /// Create a native solver with no timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-check timeout in milliseconds (0 = none).
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn solve_script(&self, script: &Script) -> Result<SolverResult, SolverError> {
        let start = std::time::Instant::now();
        let solver = Solver::new();

        if self.timeout_ms > 0 {
            let mut params = Params::new();
            params.set_u32("timeout", u32::try_from(self.timeout_ms).unwrap_or(u32::MAX));
            solver.set_params(&params);
        }

        let mut symbols: HashMap<String, Z3Value> = HashMap::new();
        let mut scopes = 0u32;

        for cmd in script.commands() {
            match cmd {
                SmtCmd::SetLogic(_) | SmtCmd::Comment(_) => {}
                SmtCmd::SetOption(option, _) if option == "produce-models" => {}
                SmtCmd::SetOption(option, value) => {
                    tracing::warn!("Z3 native: ignoring option :{option} {value}");
                }
                SmtCmd::DeclareConst(name, sort) => {
                    symbols.insert(name.clone(), create_const(name, *sort));
                }
                SmtCmd::Assert(term) => match translate_term(&symbols, term)? {
                    Z3Value::Bool(b) => solver.assert(&b),
                    Z3Value::Int(_) => {
                        return Err(SolverError::ParseError(format!(
                            "Assert requires Bool term, got Int: {term}"
                        )));
                    }
                },
                SmtCmd::Push(n) => {
                    for _ in 0..*n {
                        solver.push();
                    }
                    scopes += n;
                }
                SmtCmd::Pop(n) => {
                    if *n > scopes {
                        tracing::warn!("Z3 native: pop {n} with {scopes} open scopes");
                    }
                    let n = (*n).min(scopes);
                    solver.pop(n);
                    scopes -= n;
                }
                SmtCmd::CheckSat | SmtCmd::GetModel | SmtCmd::Exit => {}
            }
        }

        let result = match solver.check() {
            SatResult::Sat => {
                tracing::debug!("Z3 native: SAT in {:?}", start.elapsed());
                let model = solver.get_model().map(|m| extract_model(&m, &symbols));
                SolverResult::Sat(model)
            }
            SatResult::Unsat => {
                tracing::debug!("Z3 native: UNSAT in {:?}", start.elapsed());
                SolverResult::Unsat
            }
            SatResult::Unknown => {
                let reason = solver
                    .get_reason_unknown()
                    .unwrap_or_else(|| "unknown".to_string());
                tracing::debug!("Z3 native: UNKNOWN ({reason}) in {:?}", start.elapsed());
                SolverResult::Unknown(reason)
            }
        };

        Ok(result)
    }
}

impl crate::backend::SolverBackend for Z3NativeSolver {
    fn check_sat(&self, script: &Script) -> Result<SolverResult, SolverError> {
        self.solve_script(script)
    }

    fn name(&self) -> String {
        "Z3 (native)".to_string()
    }
}

/// Z3 value wrapper for the two sorts the memory model uses.
#[derive(Clone, Debug)]
enum Z3Value {
    Bool(Bool),
    Int(Int),
}

fn create_const(name: &str, sort: Sort) -> Z3Value {
    match sort {
        Sort::Bool => Z3Value::Bool(Bool::new_const(name)),
        Sort::Int => Z3Value::Int(Int::new_const(name)),
    }
}

fn expect_bool(value: Z3Value, op: &str) -> Result<Bool, SolverError> {
    match value {
        Z3Value::Bool(b) => Ok(b),
        Z3Value::Int(_) => Err(SolverError::ParseError(format!("{op} requires Bool"))),
    }
}

fn expect_int(value: Z3Value, op: &str) -> Result<Int, SolverError> {
    match value {
        Z3Value::Int(i) => Ok(i),
        Z3Value::Bool(_) => Err(SolverError::ParseError(format!("{op} requires Int"))),
    }
}

fn translate_bools(
    symbols: &HashMap<String, Z3Value>,
    terms: &[Term],
    op: &str,
) -> Result<Vec<Bool>, SolverError> {
    terms
        .iter()
        .map(|t| expect_bool(translate_term(symbols, t)?, op))
        .collect()
}

/// Equality over matching sorts.
fn translate_eq(
    symbols: &HashMap<String, Z3Value>,
    a: &Term,
    b: &Term,
) -> Result<Bool, SolverError> {
    match (translate_term(symbols, a)?, translate_term(symbols, b)?) {
        (Z3Value::Bool(x), Z3Value::Bool(y)) => Ok(x.eq(&y)),
        (Z3Value::Int(x), Z3Value::Int(y)) => Ok(x.eq(&y)),
        _ => Err(SolverError::ParseError(
            "Eq requires matching sorts".to_string(),
        )),
    }
}

fn translate_int_binary<F>(
    symbols: &HashMap<String, Z3Value>,
    a: &Term,
    b: &Term,
    op: F,
) -> Result<Z3Value, SolverError>
where
    F: FnOnce(Int, Int) -> Z3Value,
{
    let a_int = expect_int(translate_term(symbols, a)?, "integer operation")?;
    let b_int = expect_int(translate_term(symbols, b)?, "integer operation")?;
    Ok(op(a_int, b_int))
}

/// Numeral for any `i128`, built from 62-bit limbs when it exceeds `i64`.
fn int_numeral(n: i128) -> Int {
    if let Ok(small) = i64::try_from(n) {
        return Int::from_i64(small);
    }
    const LIMB: i128 = 1 << 62;
    // |n| < 2^127 = 2^3 * LIMB^2, so every limb fits in i64.
    let high = n.div_euclid(LIMB * LIMB);
    let rest = n.rem_euclid(LIMB * LIMB);
    let (mid, low) = (rest / LIMB, rest % LIMB);

    let limb = Int::from_i64(LIMB as i64);
    let high = Int::from_i64(high as i64);
    let mid = Int::from_i64(mid as i64);
    let low = Int::from_i64(low as i64);
    let upper = Int::mul(&[&high, &limb, &limb]);
    let middle = Int::mul(&[&mid, &limb]);
    Int::add(&[&upper, &middle, &low])
}

fn translate_term(symbols: &HashMap<String, Z3Value>, term: &Term) -> Result<Z3Value, SolverError> {
    match term {
        Term::BoolLit(b) => Ok(Z3Value::Bool(Bool::from_bool(*b))),
        Term::IntLit(n) => Ok(Z3Value::Int(int_numeral(*n))),
        Term::Const(name) => symbols
            .get(name)
            .cloned()
            .ok_or_else(|| SolverError::ParseError(format!("Undefined symbol: {name}"))),

        Term::Not(a) => Ok(Z3Value::Bool(
            expect_bool(translate_term(symbols, a)?, "Not")?.not(),
        )),
        Term::And(terms) => {
            let bools = translate_bools(symbols, terms, "And")?;
            let refs: Vec<&Bool> = bools.iter().collect();
            Ok(Z3Value::Bool(Bool::and(&refs)))
        }
        Term::Or(terms) => {
            let bools = translate_bools(symbols, terms, "Or")?;
            let refs: Vec<&Bool> = bools.iter().collect();
            Ok(Z3Value::Bool(Bool::or(&refs)))
        }
        Term::Implies(a, b) => {
            let a_b = expect_bool(translate_term(symbols, a)?, "Implies")?;
            let b_b = expect_bool(translate_term(symbols, b)?, "Implies")?;
            Ok(Z3Value::Bool(a_b.implies(&b_b)))
        }
        Term::Iff(a, b) | Term::Eq(a, b) => Ok(Z3Value::Bool(translate_eq(symbols, a, b)?)),
        Term::Distinct(terms) => {
            // Pairwise disequalities; fewer than two operands is trivially true
            let mut pairs = Vec::new();
            for (i, lhs) in terms.iter().enumerate() {
                for rhs in &terms[i + 1..] {
                    pairs.push(translate_eq(symbols, lhs, rhs)?.not());
                }
            }
            let refs: Vec<&Bool> = pairs.iter().collect();
            Ok(Z3Value::Bool(Bool::and(&refs)))
        }
        Term::Ite(cond, then_val, else_val) => {
            let c = expect_bool(translate_term(symbols, cond)?, "Ite condition")?;
            match (
                translate_term(symbols, then_val)?,
                translate_term(symbols, else_val)?,
            ) {
                (Z3Value::Int(t), Z3Value::Int(e)) => Ok(Z3Value::Int(c.ite(&t, &e))),
                (Z3Value::Bool(t), Z3Value::Bool(e)) => Ok(Z3Value::Bool(c.ite(&t, &e))),
                _ => Err(SolverError::ParseError(
                    "ITE requires matching branches".to_string(),
                )),
            }
        }

        Term::IntAdd(a, b) => translate_int_binary(symbols, a, b, |x, y| {
            Z3Value::Int(Int::add(&[&x, &y]))
        }),
        Term::IntSub(a, b) => translate_int_binary(symbols, a, b, |x, y| {
            Z3Value::Int(Int::sub(&[&x, &y]))
        }),
        Term::IntMul(a, b) => translate_int_binary(symbols, a, b, |x, y| {
            Z3Value::Int(Int::mul(&[&x, &y]))
        }),
        Term::IntDiv(a, b) => translate_int_binary(symbols, a, b, |x, y| Z3Value::Int(x.div(&y))),
        Term::IntMod(a, b) => {
            translate_int_binary(symbols, a, b, |x, y| Z3Value::Int(x.modulo(&y)))
        }
        Term::IntNeg(a) => Ok(Z3Value::Int(
            expect_int(translate_term(symbols, a)?, "Neg")?.unary_minus(),
        )),
        Term::IntLt(a, b) => translate_int_binary(symbols, a, b, |x, y| Z3Value::Bool(x.lt(&y))),
        Term::IntLe(a, b) => translate_int_binary(symbols, a, b, |x, y| Z3Value::Bool(x.le(&y))),
        Term::IntGt(a, b) => translate_int_binary(symbols, a, b, |x, y| Z3Value::Bool(x.gt(&y))),
        Term::IntGe(a, b) => translate_int_binary(symbols, a, b, |x, y| Z3Value::Bool(x.ge(&y))),
    }
}

/// Extract every declared constant's value, with model completion on.
fn extract_model(model: &z3::Model, symbols: &HashMap<String, Z3Value>) -> Model {
    let mut assignments = Vec::new();

    for (name, value) in symbols {
        let eval_result = match value {
            Z3Value::Bool(b) => model.eval(b, true).map(|v: Bool| v.to_string()),
            Z3Value::Int(i) => model.eval(i, true).map(|v: Int| v.to_string()),
        };

        if let Some(val_str) = eval_result {
            assignments.push((name.clone(), val_str));
        }
    }

    assignments.sort();
    Model::with_assignments(assignments)
}
