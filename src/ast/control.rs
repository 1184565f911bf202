use super::expr::Expr;
use super::stmt::Stmt;

/// `if`/`elif`/`else`. Each `(test, body)` pair in `branches` is tried in
/// order; `else_body` runs if none matched.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub branches: Vec<(Expr, Vec<Stmt>)>,
    pub else_body: Option<Vec<Stmt>>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub test: Expr,
    pub body: Vec<Stmt>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub iter_name: String,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
    pub line: usize,
}
