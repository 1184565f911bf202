//! A tree-walking interpreter for a small indentation-sensitive scripting
//! language. The pipeline is: [`lexer`] turns source text into tokens,
//! [`parser`] turns tokens into an AST ([`ast`]), and [`interpreter`] walks
//! that AST against an [`environment`] chain of [`value::Value`]s.

use std::fmt::{self, Display};
use std::io::Write;

pub mod ast;
pub mod environment;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

use interpreter::Interpreter;
use lexer::{LexError, Lexer};
use parser::ParseError;

pub use interpreter::RuntimeError;

/// Unifies the three fatal error kinds so `main` can match on one type and
/// print the `<phase> error at line <N>: <message>` format regardless of
/// which phase failed.
#[derive(Debug, Clone)]
pub enum InterpreterError {
    Lex(LexError),
    Parse(ParseError),
    Runtime(RuntimeError),
}

impl InterpreterError {
    pub fn line(&self) -> usize {
        match self {
            InterpreterError::Lex(e) => e.line,
            InterpreterError::Parse(e) => e.line,
            InterpreterError::Runtime(e) => e.line,
        }
    }

    fn phase(&self) -> &'static str {
        match self {
            InterpreterError::Lex(_) => "lexical",
            InterpreterError::Parse(_) => "parse",
            InterpreterError::Runtime(_) => "runtime",
        }
    }
}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            InterpreterError::Lex(e) => &e.message,
            InterpreterError::Parse(e) => &e.message,
            InterpreterError::Runtime(e) => &e.message,
        };
        write!(f, "{} error at line {}: {}", self.phase(), self.line(), message)
    }
}

impl std::error::Error for InterpreterError {}

impl From<LexError> for InterpreterError {
    fn from(e: LexError) -> Self {
        InterpreterError::Lex(e)
    }
}

impl From<ParseError> for InterpreterError {
    fn from(e: ParseError) -> Self {
        InterpreterError::Parse(e)
    }
}

impl From<RuntimeError> for InterpreterError {
    fn from(e: RuntimeError) -> Self {
        InterpreterError::Runtime(e)
    }
}

/// Runs source text end to end: lex, parse, evaluate, writing `print`
/// output to `output`. The convenience entry point the CLI binary and the
/// in-process test harness both build on.
pub fn run_source(source: &str, output: Box<dyn Write>) -> Result<(), InterpreterError> {
    let tokens = Lexer::new(source).lex()?;
    let program = parser::parse(tokens)?;
    let interpreter = Interpreter::new(output);
    interpreter.run(&program)?;
    Ok(())
}
