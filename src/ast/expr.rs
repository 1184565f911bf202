use super::access::{Attribute, Subscript};
use super::binary::{BinOp, BoolOp, Compare, UnaryOp};
use super::call::Call;
use super::collection::{DictLit, ListLit};
use super::function::Lambda;
use super::ident::Ident;
use super::literal::{BoolLit, Number, NoneLit, StrLit};

/// A single expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Number),
    Str(StrLit),
    Bool(BoolLit),
    None(NoneLit),
    Ident(Ident),
    BinOp(BinOp),
    Compare(Compare),
    BoolOp(BoolOp),
    UnaryOp(UnaryOp),
    Call(Call),
    Subscript(Subscript),
    Attribute(Attribute),
    List(ListLit),
    Dict(DictLit),
    Lambda(Lambda),
}

impl Expr {
    pub fn line(&self) -> usize {
        match self {
            Expr::Number(n) => n.line,
            Expr::Str(s) => s.line,
            Expr::Bool(b) => b.line,
            Expr::None(n) => n.line,
            Expr::Ident(i) => i.line,
            Expr::BinOp(b) => b.line,
            Expr::Compare(c) => c.line,
            Expr::BoolOp(b) => b.line,
            Expr::UnaryOp(u) => u.line,
            Expr::Call(c) => c.line,
            Expr::Subscript(s) => s.line,
            Expr::Attribute(a) => a.line,
            Expr::List(l) => l.line,
            Expr::Dict(d) => d.line,
            Expr::Lambda(l) => l.line,
        }
    }
}
