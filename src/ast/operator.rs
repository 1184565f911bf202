use crate::lexer::TokenKind;

/// Arithmetic binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        use BinaryOperator::*;
        Some(match kind {
            TokenKind::Plus => Add,
            TokenKind::Minus => Sub,
            TokenKind::Star => Mul,
            TokenKind::Slash => Div,
            TokenKind::DoubleSlash => FloorDiv,
            TokenKind::Percent => Mod,
            TokenKind::DoubleStar => Pow,
            _ => return None,
        })
    }

    pub fn text(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::FloorDiv => "//",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
        }
    }
}

/// Comparison operators; chained left-to-right by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOperator {
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
}

impl CompareOperator {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        use CompareOperator::*;
        Some(match kind {
            TokenKind::EqEq => Eq,
            TokenKind::NotEq => NotEq,
            TokenKind::Lt => Lt,
            TokenKind::Gt => Gt,
            TokenKind::LtEq => LtEq,
            TokenKind::GtEq => GtEq,
            _ => return None,
        })
    }
}

/// `and` / `or`, both short-circuiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOperator {
    And,
    Or,
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Pos,
    Not,
}

/// The augmentable subset of `BinaryOperator` usable in `+= -= *= /=`.
impl BinaryOperator {
    pub fn from_aug_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::PlusEq => BinaryOperator::Add,
            TokenKind::MinusEq => BinaryOperator::Sub,
            TokenKind::StarEq => BinaryOperator::Mul,
            TokenKind::SlashEq => BinaryOperator::Div,
            _ => return None,
        })
    }
}
