//! Argument operator table: precedence and the function each operator maps to.
//!
//! Binary levels run from 1 (loosest) to 8 (tightest); all are left associative.

use super::cst::SyntaxKind::{self, *};

/// Binding power for prefix operators. Binds tighter than any binary level.
pub const PREFIX_LEVEL: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfixOp {
    pub level: u8,
    pub function: &'static str,
}

pub fn infix(kind: SyntaxKind) -> Option<InfixOp> {
    let (level, function) = match kind {
        OrOr | KwOr => (1, "or"),
        AndAnd | KwAnd => (2, "and"),
        MatchOp | KwMatch => (3, "match"),
        NotMatchOp | KwNmatch => (3, "notMatch"),
        EqualsEquals | KwEq => (4, "equals"),
        NotEquals | SqlNotEquals | KwNe => (4, "notEquals"),
        Lt | KwLt => (5, "lessThan"),
        LtEq | KwLte => (5, "lessThanEquals"),
        Gt | KwGt => (5, "greaterThan"),
        GtEq | KwGte => (5, "greaterThanEquals"),
        Elvis => (6, "default"),
        Plus | KwAdd => (7, "add"),
        Minus | KwSub => (7, "subtract"),
        Star | KwMul => (8, "multiply"),
        Slash | KwDiv => (8, "divide"),
        Percent | KwMod => (8, "modulus"),
        _ => return None,
    };
    Some(InfixOp { level, function })
}

pub fn prefix(kind: SyntaxKind) -> Option<&'static str> {
    match kind {
        Bang | KwNot => Some("not"),
        Minus => Some("subtract"),
        Plus => Some("add"),
        _ => None,
    }
}

/// Function name for an assignment operator. `.=` shares `assign` with `=`.
pub fn assignment(kind: SyntaxKind) -> Option<&'static str> {
    match kind {
        Equals | SelfAssign => Some("assign"),
        AddAssign => Some("add"),
        SubtractAssign => Some("subtract"),
        MultiplyAssign => Some("multiply"),
        DivideAssign => Some("divide"),
        ModulusAssign => Some("modulus"),
        _ => None,
    }
}
