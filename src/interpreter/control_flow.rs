use crate::value::Value;

use super::error::RuntimeError;

/// A control-flow exit threaded explicitly through every evaluation
/// function, rather than modeled as exceptions or a separate signal
/// channel.
///
/// `Return`/`Break`/`Continue` are not errors; they unwind until caught by
/// their responsible construct (a loop for break/continue, a call
/// activation for return) and are promoted to a `RuntimeError` only if they
/// escape the outermost responsible construct.
#[derive(Debug, Clone)]
pub enum Unwind {
    Error(RuntimeError),
    Return(Value, usize),
    Break(usize),
    Continue(usize),
}

impl From<RuntimeError> for Unwind {
    fn from(error: RuntimeError) -> Self {
        Unwind::Error(error)
    }
}

pub type EvalResult<T> = Result<T, Unwind>;
