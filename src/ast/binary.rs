use super::expr::Expr;
use super::operator::{BoolOperator, CompareOperator, UnaryOperator};
use super::BinaryOperator;

#[derive(Debug, Clone, PartialEq)]
pub struct BinOp {
    pub op: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub line: usize,
}

/// A chain of pairwise comparisons: `a < b < c` is `first=a`, then
/// `[(Lt, b), (Lt, c)]`, evaluated left to right with `b` evaluated once.
#[derive(Debug, Clone, PartialEq)]
pub struct Compare {
    pub first: Box<Expr>,
    pub rest: Vec<(CompareOperator, Expr)>,
    pub line: usize,
}

/// A chain of the same boolean operator: `a or b or c` is
/// `op=Or, operands=[a, b, c]`; short-circuits, yielding the last evaluated
/// operand verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct BoolOp {
    pub op: BoolOperator,
    pub operands: Vec<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOp {
    pub op: UnaryOperator,
    pub operand: Box<Expr>,
    pub line: usize,
}
