use std::rc::Rc;

use crate::ast::{Expr, Stmt};
use crate::environment::Environment;

use super::Value;

/// The body of a callable: a parameter name list, body, and captured
/// defining environment.
///
/// `def` bodies are a statement sequence executed for side effects, caught
/// by a `Return` unwind; a `lambda` body is a single expression whose value
/// is the call's result with no explicit `return`.
#[derive(Debug, Clone)]
pub enum FunctionBody {
    Block(Rc<Vec<Stmt>>),
    Expr(Rc<Expr>),
}

/// A closure: parameters, body, and captured defining environment.
/// `receiver` implements bound methods — set only when this function value
/// was produced by attribute lookup on an instance.
#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub params: Vec<String>,
    pub body: FunctionBody,
    pub closure: Environment,
    pub receiver: Option<Value>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<String>,
        body: FunctionBody,
        closure: Environment,
    ) -> Self {
        Self {
            name: name.into(),
            params,
            body,
            closure,
            receiver: None,
        }
    }

    /// Bind this function to an instance receiver, producing a new function
    /// value that prepends `self` at call time.
    pub fn bind(&self, receiver: Value) -> Self {
        Self {
            name: self.name.clone(),
            params: self.params.clone(),
            body: self.body.clone(),
            closure: self.closure.clone(),
            receiver: Some(receiver),
        }
    }
}
