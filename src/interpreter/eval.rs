//! The tree-walking evaluator: a struct holding interpreter-wide state that
//! walks the AST with a recursive `run_*`/`eval_*` method per node family,
//! driving an [`crate::environment::Environment`] of [`crate::value::Value`]s.
//! `print` output goes through a sink this struct owns rather than a bare
//! `println!`, so tests can capture it in-process.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::io::Write;
use std::rc::Rc;

use crate::ast::*;
use crate::environment::Environment;
use crate::value::{self, truthy, values_equal, Class, Function, FunctionBody, Instance, Value};

use super::builtins;
use super::control_flow::{EvalResult, Unwind};
use super::error::RuntimeError;

/// A target already reduced to its evaluated parts, so `AugAssign` can
/// read-then-write it without re-evaluating the object or index
/// expressions.
enum Place {
    Ident(String),
    Attribute(Value, String),
    Subscript(Value, Value),
}

/// Owns the global environment and the `print` output sink for one run of
/// a program.
pub struct Interpreter {
    global: Environment,
    output: RefCell<Box<dyn Write>>,
}

impl Interpreter {
    pub fn new(output: Box<dyn Write>) -> Self {
        Self {
            global: Environment::global(),
            output: RefCell::new(output),
        }
    }

    /// Evaluate every top-level statement against the global environment.
    /// A control-flow exit escaping every statement is promoted to a
    /// runtime error, since there is no enclosing loop or call at the top
    /// level to catch it.
    pub fn run(&self, program: &Program) -> Result<(), RuntimeError> {
        let global = self.global.clone();
        for stmt in program {
            if let Err(unwind) = self.eval_stmt(stmt, &global) {
                return Err(unwind_escaped_top_level(unwind));
            }
        }
        Ok(())
    }

    // ---- statements ----

    fn exec_block(&self, stmts: &[Stmt], env: &Environment) -> EvalResult<()> {
        for stmt in stmts {
            self.eval_stmt(stmt, env)?;
        }
        Ok(())
    }

    fn eval_stmt(&self, stmt: &Stmt, env: &Environment) -> EvalResult<()> {
        match stmt {
            Stmt::Expr(e) => {
                self.eval_expr(e, env)?;
                Ok(())
            }
            Stmt::Print(p) => self.eval_print(p, env),
            Stmt::Return(r) => {
                let value = match &r.value {
                    Some(e) => self.eval_expr(e, env)?,
                    None => Value::None,
                };
                Err(Unwind::Return(value, r.line))
            }
            Stmt::Break(b) => Err(Unwind::Break(b.line)),
            Stmt::Continue(c) => Err(Unwind::Continue(c.line)),
            Stmt::Pass(_) => Ok(()),
            // Accepted lexically and parsed, never resolved.
            Stmt::Import(_) => Ok(()),
            Stmt::Assign(a) => self.eval_assign(a, env),
            Stmt::AugAssign(a) => self.eval_aug_assign(a, env),
            Stmt::If(i) => self.eval_if(i, env),
            Stmt::While(w) => self.eval_while(w, env),
            Stmt::For(f) => self.eval_for(f, env),
            Stmt::FuncDef(f) => {
                let function = Function::new(
                    f.name.clone(),
                    f.params.clone(),
                    FunctionBody::Block(Rc::new(f.body.clone())),
                    env.clone(),
                );
                env.set_local(f.name.clone(), Value::Function(Rc::new(function)));
                Ok(())
            }
            Stmt::ClassDef(c) => self.eval_class_def(c, env),
        }
    }

    fn eval_print(&self, print: &Print, env: &Environment) -> EvalResult<()> {
        let mut rendered = Vec::with_capacity(print.args.len());
        for arg in &print.args {
            rendered.push(self.eval_expr(arg, env)?.repr());
        }
        let mut out = self.output.borrow_mut();
        let _ = writeln!(out, "{}", rendered.join(" "));
        Ok(())
    }

    fn eval_assign(&self, assign: &Assign, env: &Environment) -> EvalResult<()> {
        let value = self.eval_expr(&assign.value, env)?;
        self.set_target(&assign.target, value, env)
    }

    /// Desugars to `target = target op value`, with `target` evaluated
    /// exactly once — so an attribute's or subscript's *object* (and, for a
    /// subscript, its index) is only evaluated once even though it is both
    /// read and written.
    fn eval_aug_assign(&self, assign: &AugAssign, env: &Environment) -> EvalResult<()> {
        let place = self.resolve_place(&assign.target, env)?;
        let current = self.read_place(&place, env, assign.line)?;
        let rhs = self.eval_expr(&assign.value, env)?;
        let result = apply_binop(assign.op, &current, &rhs, assign.line)?;
        self.write_place(&place, result, env, assign.line)
    }

    fn eval_if(&self, stmt: &IfStmt, env: &Environment) -> EvalResult<()> {
        for (test, body) in &stmt.branches {
            if truthy(&self.eval_expr(test, env)?) {
                return self.exec_block(body, env);
            }
        }
        if let Some(else_body) = &stmt.else_body {
            return self.exec_block(else_body, env);
        }
        Ok(())
    }

    fn eval_while(&self, stmt: &WhileStmt, env: &Environment) -> EvalResult<()> {
        while truthy(&self.eval_expr(&stmt.test, env)?) {
            match self.exec_block(&stmt.body, env) {
                Ok(()) => {}
                Err(Unwind::Break(_)) => break,
                Err(Unwind::Continue(_)) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    fn eval_for(&self, stmt: &ForStmt, env: &Environment) -> EvalResult<()> {
        let iterable = self.eval_expr(&stmt.iterable, env)?;
        let items = self.iter_values(iterable, stmt.line)?;
        for item in items {
            env.set_local(stmt.iter_name.clone(), item);
            match self.exec_block(&stmt.body, env) {
                Ok(()) => {}
                Err(Unwind::Break(_)) => break,
                Err(Unwind::Continue(_)) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// `for` iterates strings (one-character strings), lists (elements in
    /// order), and dicts (keys in insertion order).
    fn iter_values(&self, value: Value, line: usize) -> EvalResult<Vec<Value>> {
        match value {
            Value::Str(s) => Ok(s.chars().map(|c| Value::Str(c.to_string())).collect()),
            Value::List(items) => Ok(items.borrow().clone()),
            Value::Dict(entries) => Ok(entries.borrow().iter().map(|(k, _)| k.clone()).collect()),
            other => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object is not iterable", other.kind_name()),
                line,
            ))),
        }
    }

    /// Establishes a fresh child environment, evaluates the class body in
    /// it, then builds a class value whose attribute mapping is that
    /// frame's local bindings.
    fn eval_class_def(&self, def: &ClassDef, env: &Environment) -> EvalResult<()> {
        let base = match &def.base {
            Some(name) => match env.lookup(name) {
                Some(Value::Class(base)) => Some(base),
                Some(other) => {
                    return Err(Unwind::Error(RuntimeError::new(
                        format!("'{}' is not a class", other.kind_name()),
                        def.line,
                    )))
                }
                None => {
                    return Err(Unwind::Error(RuntimeError::new(
                        format!("name '{name}' is not defined"),
                        def.line,
                    )))
                }
            },
            None => None,
        };

        let body_env = Environment::child(env);
        self.exec_block(&def.body, &body_env)?;
        let class = Class::new(def.name.clone(), base, body_env.local_bindings());
        env.set_local(def.name.clone(), Value::Class(Rc::new(class)));
        Ok(())
    }

    // ---- assignment targets ----

    /// Evaluates a target's object (and, for a subscript, its index) once,
    /// producing a place that can be both read and written without
    /// re-evaluating those expressions.
    fn resolve_place(&self, target: &AssignTarget, env: &Environment) -> EvalResult<Place> {
        match target {
            AssignTarget::Ident { name, .. } => Ok(Place::Ident(name.clone())),
            AssignTarget::Attribute { object, name, .. } => {
                let receiver = self.eval_expr(object, env)?;
                Ok(Place::Attribute(receiver, name.clone()))
            }
            AssignTarget::Subscript { object, index, .. } => {
                let receiver = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                Ok(Place::Subscript(receiver, index))
            }
        }
    }

    fn read_place(&self, place: &Place, env: &Environment, line: usize) -> EvalResult<Value> {
        match place {
            Place::Ident(name) => env.lookup(name).ok_or_else(|| {
                Unwind::Error(RuntimeError::new(format!("name '{name}' is not defined"), line))
            }),
            Place::Attribute(receiver, name) => self.get_attribute(receiver, name, line),
            Place::Subscript(receiver, index) => self.get_subscript(receiver, index, line),
        }
    }

    fn write_place(&self, place: &Place, value: Value, env: &Environment, line: usize) -> EvalResult<()> {
        match place {
            Place::Ident(name) => {
                env.set_local(name.clone(), value);
                Ok(())
            }
            Place::Attribute(receiver, name) => match receiver {
                Value::Instance(instance) => {
                    instance.borrow_mut().attributes.insert(name.clone(), value);
                    Ok(())
                }
                other => Err(Unwind::Error(RuntimeError::new(
                    format!("cannot set attribute on {}", other.kind_name()),
                    line,
                ))),
            },
            Place::Subscript(receiver, index) => self.set_subscript(receiver, index.clone(), value, line),
        }
    }

    fn set_target(&self, target: &AssignTarget, value: Value, env: &Environment) -> EvalResult<()> {
        match target {
            AssignTarget::Ident { name, .. } => {
                env.set_local(name.clone(), value);
                Ok(())
            }
            AssignTarget::Attribute { object, name, line } => {
                let receiver = self.eval_expr(object, env)?;
                match &receiver {
                    Value::Instance(instance) => {
                        instance.borrow_mut().attributes.insert(name.clone(), value);
                        Ok(())
                    }
                    other => Err(Unwind::Error(RuntimeError::new(
                        format!("cannot set attribute on {}", other.kind_name()),
                        *line,
                    ))),
                }
            }
            AssignTarget::Subscript { object, index, line } => {
                let receiver = self.eval_expr(object, env)?;
                let index = self.eval_expr(index, env)?;
                self.set_subscript(&receiver, index, value, *line)
            }
        }
    }

    fn get_subscript(&self, receiver: &Value, index: &Value, line: usize) -> EvalResult<Value> {
        match receiver {
            Value::List(items) => {
                let items = items.borrow();
                let i = list_index(index, items.len(), line)?;
                Ok(items[i].clone())
            }
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let i = list_index(index, chars.len(), line)?;
                Ok(Value::Str(chars[i].to_string()))
            }
            Value::Dict(entries) => entries
                .borrow()
                .iter()
                .find(|(k, _)| values_equal(k, index))
                .map(|(_, v)| v.clone())
                .ok_or_else(|| Unwind::Error(RuntimeError::new("key not found", line))),
            other => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object is not subscriptable", other.kind_name()),
                line,
            ))),
        }
    }

    fn set_subscript(
        &self,
        receiver: &Value,
        index: Value,
        value: Value,
        line: usize,
    ) -> EvalResult<()> {
        match receiver {
            Value::List(items) => {
                let mut items = items.borrow_mut();
                let i = list_index(&index, items.len(), line)?;
                items[i] = value;
                Ok(())
            }
            Value::Dict(entries) => {
                let mut entries = entries.borrow_mut();
                match entries.iter_mut().find(|(k, _)| values_equal(k, &index)) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((index, value)),
                }
                Ok(())
            }
            other => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object does not support item assignment", other.kind_name()),
                line,
            ))),
        }
    }

    // ---- attribute access & method resolution ----

    /// Method resolution: instance attributes first, then the class (and
    /// its single base chain); a resolved function is bound to the
    /// instance.
    fn get_attribute(&self, receiver: &Value, name: &str, line: usize) -> EvalResult<Value> {
        match receiver {
            Value::Instance(instance) => {
                if let Some(value) = instance.borrow().attributes.get(name).cloned() {
                    return Ok(value);
                }
                match instance.borrow().class.resolve(name) {
                    Some(Value::Function(f)) => {
                        Ok(Value::Function(Rc::new(f.bind(receiver.clone()))))
                    }
                    Some(other) => Ok(other),
                    None => Err(Unwind::Error(RuntimeError::new(
                        format!("'{}' object has no attribute '{name}'", instance.borrow().class.name),
                        line,
                    ))),
                }
            }
            Value::Class(class) => class.resolve(name).ok_or_else(|| {
                Unwind::Error(RuntimeError::new(
                    format!("class '{}' has no attribute '{name}'", class.name),
                    line,
                ))
            }),
            other => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object has no attribute '{name}'", other.kind_name()),
                line,
            ))),
        }
    }

    /// Dispatches a method call: instance attribute/method resolution
    /// first, falling back to the built-in container/string methods for
    /// the kinds that carry no attribute map of their own.
    fn call_method(
        &self,
        receiver: Value,
        name: &str,
        args: Vec<Value>,
        line: usize,
    ) -> EvalResult<Value> {
        match &receiver {
            Value::Instance(instance) => {
                let found = instance.borrow().attributes.get(name).cloned();
                let found = found.or_else(|| instance.borrow().class.resolve(name));
                match found {
                    Some(Value::Function(f)) => self.call_function(&f.bind(receiver), args, line),
                    Some(other) => self.call_value(other, args, line),
                    None => self.call_builtin_or_error(&receiver, name, args, line),
                }
            }
            Value::Class(class) => match class.resolve(name) {
                Some(Value::Function(f)) => self.call_function(&f, args, line),
                Some(other) => self.call_value(other, args, line),
                None => self.call_builtin_or_error(&receiver, name, args, line),
            },
            _ => self.call_builtin_or_error(&receiver, name, args, line),
        }
    }

    fn call_builtin_or_error(
        &self,
        receiver: &Value,
        name: &str,
        args: Vec<Value>,
        line: usize,
    ) -> EvalResult<Value> {
        match builtins::call(receiver, name, args, line) {
            Some(result) => result.map_err(Unwind::Error),
            None => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object has no attribute '{name}'", receiver.kind_name()),
                line,
            ))),
        }
    }

    // ---- calls ----

    fn call_value(&self, callee: Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        match callee {
            Value::Function(f) => self.call_function(&f, args, line),
            Value::Class(c) => self.instantiate(c, args, line),
            other => Err(Unwind::Error(RuntimeError::new(
                format!("'{}' object is not callable", other.kind_name()),
                line,
            ))),
        }
    }

    /// Bound methods prepend their receiver ahead of the call's own
    /// arguments.
    fn call_function(&self, f: &Function, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        let mut all_args = args;
        if let Some(receiver) = &f.receiver {
            all_args.insert(0, receiver.clone());
        }
        if all_args.len() != f.params.len() {
            return Err(Unwind::Error(RuntimeError::new(
                format!(
                    "{}() takes {} argument(s) but {} were given",
                    f.name,
                    f.params.len(),
                    all_args.len()
                ),
                line,
            )));
        }

        let call_env = Environment::child(&f.closure);
        for (param, value) in f.params.iter().zip(all_args) {
            call_env.set_local(param.clone(), value);
        }

        match &f.body {
            FunctionBody::Block(body) => match self.exec_block(body, &call_env) {
                Ok(()) => Ok(Value::None),
                Err(Unwind::Return(value, _)) => Ok(value),
                Err(Unwind::Break(at)) => {
                    Err(Unwind::Error(RuntimeError::new("'break' outside loop", at)))
                }
                Err(Unwind::Continue(at)) => {
                    Err(Unwind::Error(RuntimeError::new("'continue' outside loop", at)))
                }
                Err(e @ Unwind::Error(_)) => Err(e),
            },
            // A lambda body is a single expression with no explicit `return`.
            FunctionBody::Expr(body) => self.eval_expr(body, &call_env),
        }
    }

    /// Constructs an instance; if the class (or an ancestor) defines
    /// `__init__`, calls it with the instance as the implicit receiver.
    fn instantiate(&self, class: Rc<Class>, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        let instance = Rc::new(RefCell::new(Instance::new(class.clone())));
        if let Some(Value::Function(init)) = class.resolve("__init__") {
            let bound = init.bind(Value::Instance(instance.clone()));
            self.call_function(&bound, args, line)?;
        }
        Ok(Value::Instance(instance))
    }

    // ---- expressions ----

    fn eval_expr(&self, expr: &Expr, env: &Environment) -> EvalResult<Value> {
        match expr {
            Expr::Number(n) => eval_number(n),
            Expr::Str(s) => Ok(Value::Str(s.value.clone())),
            Expr::Bool(b) => Ok(Value::Bool(b.value)),
            Expr::None(_) => Ok(Value::None),
            Expr::Ident(i) => env.lookup(&i.name).ok_or_else(|| {
                Unwind::Error(RuntimeError::new(format!("name '{}' is not defined", i.name), i.line))
            }),
            Expr::BinOp(b) => {
                let left = self.eval_expr(&b.left, env)?;
                let right = self.eval_expr(&b.right, env)?;
                apply_binop(b.op, &left, &right, b.line)
            }
            Expr::Compare(c) => self.eval_compare(c, env),
            Expr::BoolOp(b) => self.eval_bool_op(b, env),
            Expr::UnaryOp(u) => self.eval_unary_op(u, env),
            Expr::Call(c) => self.eval_call(c, env),
            Expr::Subscript(s) => {
                let object = self.eval_expr(&s.object, env)?;
                let index = self.eval_expr(&s.index, env)?;
                self.get_subscript(&object, &index, s.line)
            }
            Expr::Attribute(a) => {
                let object = self.eval_expr(&a.object, env)?;
                self.get_attribute(&object, &a.name, a.line)
            }
            Expr::List(l) => {
                let mut items = Vec::with_capacity(l.elements.len());
                for element in &l.elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::list(items))
            }
            Expr::Dict(d) => {
                let mut entries: Vec<(Value, Value)> = Vec::with_capacity(d.entries.len());
                for (key_expr, value_expr) in &d.entries {
                    let key = self.eval_expr(key_expr, env)?;
                    let value = self.eval_expr(value_expr, env)?;
                    match entries.iter_mut().find(|(k, _)| values_equal(k, &key)) {
                        Some(entry) => entry.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(Value::dict(entries))
            }
            Expr::Lambda(l) => Ok(Value::Function(Rc::new(Function::new(
                "<lambda>",
                l.params.clone(),
                FunctionBody::Expr(Rc::new((*l.body).clone())),
                env.clone(),
            )))),
        }
    }

    /// `a < b < c` chains into pairwise comparisons, each middle operand
    /// evaluated exactly once, short-circuiting on the first false pair.
    fn eval_compare(&self, compare: &Compare, env: &Environment) -> EvalResult<Value> {
        let mut previous = self.eval_expr(&compare.first, env)?;
        for (op, rhs_expr) in &compare.rest {
            let rhs = self.eval_expr(rhs_expr, env)?;
            if !compare_pair(*op, &previous, &rhs, compare.line)? {
                return Ok(Value::Bool(false));
            }
            previous = rhs;
        }
        Ok(Value::Bool(true))
    }

    /// Short-circuits; returns the last evaluated operand verbatim, not a
    /// normalized boolean.
    fn eval_bool_op(&self, op: &BoolOp, env: &Environment) -> EvalResult<Value> {
        let mut last = Value::None;
        for (i, operand) in op.operands.iter().enumerate() {
            last = self.eval_expr(operand, env)?;
            let is_last = i == op.operands.len() - 1;
            if !is_last {
                let short_circuits = match op.op {
                    BoolOperator::Or => truthy(&last),
                    BoolOperator::And => !truthy(&last),
                };
                if short_circuits {
                    return Ok(last);
                }
            }
        }
        Ok(last)
    }

    fn eval_unary_op(&self, unary: &UnaryOp, env: &Environment) -> EvalResult<Value> {
        let operand = self.eval_expr(&unary.operand, env)?;
        match unary.op {
            UnaryOperator::Not => Ok(Value::Bool(!truthy(&operand))),
            UnaryOperator::Neg => match operand {
                Value::Integer(i) => Ok(Value::Integer(-i)),
                Value::Float(f) => Ok(Value::Float(-f)),
                other => Err(Unwind::Error(RuntimeError::new(
                    format!("cannot negate {}", other.kind_name()),
                    unary.line,
                ))),
            },
            UnaryOperator::Pos => match operand {
                Value::Integer(_) | Value::Float(_) => Ok(operand),
                other => Err(Unwind::Error(RuntimeError::new(
                    format!("cannot apply unary '+' to {}", other.kind_name()),
                    unary.line,
                ))),
            },
        }
    }

    /// A call whose callee is an attribute access (`obj.method(...)`) is
    /// dispatched as a method call so that built-in container/string
    /// methods — which have no first-class value representation — can be
    /// reached without inventing one.
    fn eval_call(&self, call: &Call, env: &Environment) -> EvalResult<Value> {
        if let Expr::Attribute(attr) = call.callee.as_ref() {
            let receiver = self.eval_expr(&attr.object, env)?;
            let args = self.eval_args(&call.args, env)?;
            return self.call_method(receiver, &attr.name, args, call.line);
        }
        let callee = self.eval_expr(&call.callee, env)?;
        let args = self.eval_args(&call.args, env)?;
        self.call_value(callee, args, call.line)
    }

    fn eval_args(&self, args: &[Expr], env: &Environment) -> EvalResult<Vec<Value>> {
        args.iter().map(|a| self.eval_expr(a, env)).collect()
    }
}

fn eval_number(n: &Number) -> EvalResult<Value> {
    if n.is_float {
        n.value
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| Unwind::Error(RuntimeError::new(format!("invalid float literal '{}'", n.value), n.line)))
    } else {
        n.value
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| Unwind::Error(RuntimeError::new(format!("invalid integer literal '{}'", n.value), n.line)))
    }
}

fn apply_binop(op: BinaryOperator, left: &Value, right: &Value, line: usize) -> EvalResult<Value> {
    let result = match op {
        BinaryOperator::Add => value::add(left, right),
        BinaryOperator::Sub => value::sub(left, right),
        BinaryOperator::Mul => value::mul(left, right),
        BinaryOperator::Div => value::div(left, right),
        BinaryOperator::FloorDiv => value::floor_div(left, right),
        BinaryOperator::Mod => value::modulo(left, right),
        BinaryOperator::Pow => value::pow(left, right),
    };
    result.map_err(|message| Unwind::Error(RuntimeError::new(message, line)))
}

fn compare_pair(op: CompareOperator, left: &Value, right: &Value, line: usize) -> EvalResult<bool> {
    match op {
        CompareOperator::Eq => Ok(values_equal(left, right)),
        CompareOperator::NotEq => Ok(!values_equal(left, right)),
        _ => {
            let ordering = value::compare(left, right)
                .map_err(|message| Unwind::Error(RuntimeError::new(message, line)))?;
            Ok(match op {
                CompareOperator::Lt => ordering == Ordering::Less,
                CompareOperator::Gt => ordering == Ordering::Greater,
                CompareOperator::LtEq => ordering != Ordering::Greater,
                CompareOperator::GtEq => ordering != Ordering::Less,
                CompareOperator::Eq | CompareOperator::NotEq => unreachable!(),
            })
        }
    }
}

/// Negative indices count from the end; out of range is an error.
fn list_index(index: &Value, len: usize, line: usize) -> EvalResult<usize> {
    let i = match index {
        Value::Integer(i) => *i,
        other => {
            return Err(Unwind::Error(RuntimeError::new(
                format!("list indices must be integers, not {}", other.kind_name()),
                line,
            )))
        }
    };
    let resolved = if i < 0 { i + len as i64 } else { i };
    if resolved < 0 || resolved as usize >= len {
        return Err(Unwind::Error(RuntimeError::new("index out of range", line)));
    }
    Ok(resolved as usize)
}

fn unwind_escaped_top_level(unwind: Unwind) -> RuntimeError {
    match unwind {
        Unwind::Error(e) => e,
        Unwind::Return(_, line) => RuntimeError::new("'return' outside function", line),
        Unwind::Break(line) => RuntimeError::new("'break' outside loop", line),
        Unwind::Continue(line) => RuntimeError::new("'continue' outside loop", line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(src: &str) -> Result<String, RuntimeError> {
        test_utils::run_and_capture(src).map_err(|e| match e {
            crate::InterpreterError::Runtime(e) => e,
            other => panic!("expected a runtime result, got {other}"),
        })
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run("print(1 + 2 * 3)").unwrap(), "7\n");
    }

    #[test]
    fn while_loop_counts_down() {
        let src = "x = 10\nwhile x > 0:\n    x = x - 3\nprint(x)\n";
        assert_eq!(run(src).unwrap(), "-2\n");
    }

    #[test]
    fn recursive_function_call() {
        let src = "def fact(n):\n    if n <= 1:\n        return 1\n    return n * fact(n-1)\nprint(fact(5))\n";
        assert_eq!(run(src).unwrap(), "120\n");
    }

    #[test]
    fn list_append_and_iteration() {
        let src = "a = [1,2,3]\na.append(4)\nfor v in a:\n    print(v)\n";
        assert_eq!(run(src).unwrap(), "1\n2\n3\n4\n");
    }

    #[test]
    fn class_method_mutates_instance_state() {
        let src = concat!(
            "class Counter:\n",
            "    def __init__(self):\n",
            "        self.n = 0\n",
            "    def tick(self):\n",
            "        self.n = self.n + 1\n",
            "c = Counter()\n",
            "c.tick()\n",
            "c.tick()\n",
            "print(c.n)\n",
        );
        assert_eq!(run(src).unwrap(), "2\n");
    }

    #[test]
    fn closures_capture_the_defining_environment() {
        let src = concat!(
            "def make_adder(k):\n",
            "    def add(x):\n",
            "        return x + k\n",
            "    return add\n",
            "f = make_adder(10)\n",
            "print(f(5))\n",
        );
        assert_eq!(run(src).unwrap(), "15\n");
    }

    #[test]
    fn closure_sees_updates_made_after_its_definition() {
        let src = concat!(
            "k = 1\n",
            "def inner():\n",
            "    return k\n",
            "k = 2\n",
            "print(inner())\n",
        );
        assert_eq!(run(src).unwrap(), "2\n");
    }

    #[test]
    fn boolean_short_circuit_skips_the_second_call() {
        let src = concat!(
            "calls = []\n",
            "def f():\n",
            "    calls.append('f')\n",
            "    return True\n",
            "def g():\n",
            "    calls.append('g')\n",
            "    return True\n",
            "f() or g()\n",
            "print(calls)\n",
        );
        assert_eq!(run(src).unwrap(), "[f]\n");
    }

    #[test]
    fn break_outside_a_loop_is_a_runtime_error() {
        let err = run("break\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn negative_list_index_counts_from_the_end() {
        assert_eq!(run("a = [1,2,3]\nprint(a[-1])\n").unwrap(), "3\n");
    }

    #[test]
    fn single_base_class_method_is_inherited() {
        let src = concat!(
            "class Animal:\n",
            "    def speak(self):\n",
            "        return 'generic'\n",
            "class Dog(Animal):\n",
            "    def bark(self):\n",
            "        return self.speak()\n",
            "d = Dog()\n",
            "print(d.bark())\n",
        );
        assert_eq!(run(src).unwrap(), "generic\n");
    }
}
