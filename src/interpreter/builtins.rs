use crate::value::{values_equal, Value};

use super::error::{RuntimeError, RuntimeResult};

/// Built-in methods on the three primitive container/string kinds.
/// Dispatched by `(value kind, method name)` only after
/// ordinary attribute lookup misses, so a user class's own method of the
/// same name always wins (these kinds have no attribute map of their own
/// to shadow).
///
/// Returns `None` when `method` is not one of the recognized built-ins for
/// `receiver`'s kind, so the caller can fall through to its usual
/// "no such attribute" error.
pub fn call(
    receiver: &Value,
    method: &str,
    args: Vec<Value>,
    line: usize,
) -> Option<RuntimeResult<Value>> {
    match receiver {
        Value::List(items) => list_method(items, method, args, line),
        Value::Dict(entries) => dict_method(entries, method, args, line),
        Value::Str(s) => str_method(s, method, args, line),
        _ => None,
    }
}

fn list_method(
    items: &std::rc::Rc<std::cell::RefCell<Vec<Value>>>,
    method: &str,
    mut args: Vec<Value>,
    line: usize,
) -> Option<RuntimeResult<Value>> {
    Some(match method {
        "append" => {
            if args.len() != 1 {
                Err(RuntimeError::new("append() takes exactly one argument", line))
            } else {
                items.borrow_mut().push(args.remove(0));
                Ok(Value::None)
            }
        }
        "pop" => {
            if !args.is_empty() {
                Err(RuntimeError::new("pop() takes no arguments", line))
            } else {
                match items.borrow_mut().pop() {
                    Some(value) => Ok(value),
                    None => Err(RuntimeError::new("pop from an empty list", line)),
                }
            }
        }
        "len" => {
            if !args.is_empty() {
                Err(RuntimeError::new("len() takes no arguments", line))
            } else {
                Ok(Value::Integer(items.borrow().len() as i64))
            }
        }
        _ => return None,
    })
}

fn dict_method(
    entries: &std::rc::Rc<std::cell::RefCell<Vec<(Value, Value)>>>,
    method: &str,
    mut args: Vec<Value>,
    line: usize,
) -> Option<RuntimeResult<Value>> {
    Some(match method {
        "keys" => {
            if !args.is_empty() {
                Err(RuntimeError::new("keys() takes no arguments", line))
            } else {
                Ok(Value::list(
                    entries.borrow().iter().map(|(k, _)| k.clone()).collect(),
                ))
            }
        }
        "values" => {
            if !args.is_empty() {
                Err(RuntimeError::new("values() takes no arguments", line))
            } else {
                Ok(Value::list(
                    entries.borrow().iter().map(|(_, v)| v.clone()).collect(),
                ))
            }
        }
        "get" => {
            if args.is_empty() || args.len() > 2 {
                Err(RuntimeError::new("get() takes one or two arguments", line))
            } else {
                let key = args.remove(0);
                let default = args.pop().unwrap_or(Value::None);
                let found = entries
                    .borrow()
                    .iter()
                    .find(|(k, _)| values_equal(k, &key))
                    .map(|(_, v)| v.clone());
                Ok(found.unwrap_or(default))
            }
        }
        _ => return None,
    })
}

fn str_method(
    s: &str,
    method: &str,
    args: Vec<Value>,
    line: usize,
) -> Option<RuntimeResult<Value>> {
    Some(match method {
        "upper" => {
            if !args.is_empty() {
                Err(RuntimeError::new("upper() takes no arguments", line))
            } else {
                Ok(Value::Str(s.to_uppercase()))
            }
        }
        "lower" => {
            if !args.is_empty() {
                Err(RuntimeError::new("lower() takes no arguments", line))
            } else {
                Ok(Value::Str(s.to_lowercase()))
            }
        }
        "len" => {
            if !args.is_empty() {
                Err(RuntimeError::new("len() takes no arguments", line))
            } else {
                Ok(Value::Integer(s.chars().count() as i64))
            }
        }
        _ => return None,
    })
}
