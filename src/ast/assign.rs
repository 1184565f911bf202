use super::access::AssignTarget;
use super::expr::Expr;
use super::BinaryOperator;

#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    pub target: AssignTarget,
    pub value: Expr,
    pub line: usize,
}

/// Desugars to `target = target op value` with the target evaluated once.
#[derive(Debug, Clone, PartialEq)]
pub struct AugAssign {
    pub target: AssignTarget,
    pub op: BinaryOperator,
    pub value: Expr,
    pub line: usize,
}
