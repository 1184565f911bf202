/// A numeric literal. The raw text is kept rather than pre-parsed;
/// `is_float` was already decided by the lexer from whether a `.` or
/// exponent marker was present.
#[derive(Debug, Clone, PartialEq)]
pub struct Number {
    pub value: String,
    pub is_float: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: String,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoneLit {
    pub line: usize,
}
