use super::expr::Expr;

#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    pub value: Option<Expr>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub args: Vec<Expr>,
    pub line: usize,
}

/// Accepted lexically and parsed, never resolved at runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub module: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Break {
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Continue {
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub line: usize,
}
