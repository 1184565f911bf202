use super::assign::{Assign, AugAssign};
use super::class::ClassDef;
use super::control::{ForStmt, IfStmt, WhileStmt};
use super::expr::Expr;
use super::function::FuncDef;
use super::simple::{Break, Continue, Import, Pass, Print, Return};

/// A single top-level or block statement node. A block (`NEWLINE INDENT
/// statement+ DEDENT` in the grammar) is realized simply as `Vec<Stmt>`
/// wherever the grammar calls for one, rather than as its own wrapper node
/// — the sequence already carries everything a `Block` node would.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Print(Print),
    Return(Return),
    Break(Break),
    Continue(Continue),
    Pass(Pass),
    Import(Import),
    Assign(Assign),
    AugAssign(AugAssign),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    FuncDef(FuncDef),
    ClassDef(ClassDef),
}

impl Stmt {
    pub fn line(&self) -> usize {
        match self {
            Stmt::Expr(e) => e.line(),
            Stmt::Print(p) => p.line,
            Stmt::Return(r) => r.line,
            Stmt::Break(b) => b.line,
            Stmt::Continue(c) => c.line,
            Stmt::Pass(p) => p.line,
            Stmt::Import(i) => i.line,
            Stmt::Assign(a) => a.line,
            Stmt::AugAssign(a) => a.line,
            Stmt::If(i) => i.line,
            Stmt::While(w) => w.line,
            Stmt::For(f) => f.line,
            Stmt::FuncDef(f) => f.line,
            Stmt::ClassDef(c) => c.line,
        }
    }
}

/// A full program: an ordered sequence of top-level statements.
pub type Program = Vec<Stmt>;
