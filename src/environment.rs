//! Lexically-scoped environment chains.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A mapping from identifier to runtime value, plus a reference to a
/// parent environment. Cloning an `Environment` clones the handle, not the
/// frame — this is how closures share their defining scope, and how
/// `Rc`-shared ownership keeps the parent chain alive for as long as any
/// descendant or closure references it.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// The root frame for a program run; has no parent.
    pub fn global() -> Self {
        Self(Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: None,
        })))
    }

    /// A fresh child frame, used for function call activations and
    /// `class`/block scopes.
    pub fn child(parent: &Environment) -> Self {
        Self(Rc::new(RefCell::new(Frame {
            bindings: HashMap::new(),
            parent: Some(parent.clone()),
        })))
    }

    /// Search the current frame, then recurse into parents.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        if let Some(value) = frame.bindings.get(name) {
            return Some(value.clone());
        }
        frame.parent.as_ref().and_then(|parent| parent.lookup(name))
    }

    /// Write into the current frame unconditionally. There is no
    /// global/nonlocal keyword, so a plain local write and a rebind of an
    /// existing name are the same operation.
    pub fn set_local(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().bindings.insert(name.into(), value);
    }

    /// Current-frame-only membership test.
    pub fn has(&self, name: &str) -> bool {
        self.0.borrow().bindings.contains_key(name)
    }

    /// All bindings local to this frame, in no particular order. Used by
    /// `class` definitions to turn a freshly evaluated class body into the
    /// class value's attribute mapping.
    pub fn local_bindings(&self) -> HashMap<String, Value> {
        self.0.borrow().bindings.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_reads_through_to_the_parent() {
        let global = Environment::global();
        global.set_local("x", Value::Integer(1));
        let child = Environment::child(&global);
        assert!(matches!(child.lookup("x"), Some(Value::Integer(1))));
    }

    #[test]
    fn set_local_never_writes_through_to_the_parent() {
        let global = Environment::global();
        let child = Environment::child(&global);
        child.set_local("x", Value::Integer(1));
        assert!(!global.has("x"));
        assert!(child.has("x"));
    }

    #[test]
    fn closures_see_later_writes_to_a_captured_binding() {
        let global = Environment::global();
        global.set_local("k", Value::Integer(1));
        let captured = global.clone();
        global.set_local("k", Value::Integer(2));
        assert!(matches!(captured.lookup("k"), Some(Value::Integer(2))));
    }
}
