use crate::sort::Sort;
use crate::term::Term;

/// SMT-LIB command representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `(set-logic LOGIC)`
    SetLogic(String),
    /// `(set-option :key value)`
    SetOption(String, String),
    /// `(declare-const name sort)`
    DeclareConst(String, Sort),
    /// `(assert term)`
    Assert(Term),
    /// `(check-sat)`
    CheckSat,
    /// `(get-model)`
    GetModel,
    /// `(push n)`
    Push(u32),
    /// `(pop n)`
    Pop(u32),
    /// `;; comment`
    Comment(String),
    /// `(exit)`
    Exit,
}
