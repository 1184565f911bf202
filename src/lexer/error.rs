use std::error::Error;
use std::fmt::Display;

/// Error produced while turning source text into tokens.
///
/// Carries the 1-based source line so the caller can format it the same
/// way parse and runtime errors are formatted (see `crate::InterpreterError`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub message: String,
    pub line: usize,
}

impl LexError {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for LexError {}

pub type LexResult<T> = Result<T, LexError>;
