use super::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct ListLit {
    pub elements: Vec<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictLit {
    pub entries: Vec<(Expr, Expr)>,
    pub line: usize,
}
