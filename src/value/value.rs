use std::cell::RefCell;
use std::rc::Rc;

use super::class::{Class, Instance};
use super::function::Function;

/// The ten closed runtime value kinds. Lists, dicts, and instances are
/// `Rc<RefCell<..>>` so that aliasing one binding and mutating through
/// another is visible everywhere, matching the language's reference
/// semantics without a tracing garbage collector.
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    None,
    List(Rc<RefCell<Vec<Value>>>),
    Dict(Rc<RefCell<Vec<(Value, Value)>>>),
    Function(Rc<Function>),
    Class(Rc<Class>),
    Instance(Rc<RefCell<Instance>>),
}

impl Value {
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn dict(entries: Vec<(Value, Value)>) -> Self {
        Value::Dict(Rc::new(RefCell::new(entries)))
    }

    /// Name used in runtime error messages and `<kind ...>` reprs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
            Value::None => "none",
            Value::List(_) => "list",
            Value::Dict(_) => "dict",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
        }
    }

    /// Textual representation produced by `print`, applied recursively to
    /// list/dict elements. Strings never carry surrounding quotes, at any
    /// nesting depth, since `print` is the only output surface this repr
    /// is ever used for.
    pub fn repr(&self) -> String {
        match self {
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => format_float(*f),
            Value::Str(s) => s.clone(),
            Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Value::None => "None".to_string(),
            Value::List(items) => {
                let rendered: Vec<String> = items.borrow().iter().map(Value::repr).collect();
                format!("[{}]", rendered.join(", "))
            }
            Value::Dict(entries) => {
                let rendered: Vec<String> = entries
                    .borrow()
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
                    .collect();
                format!("{{{}}}", rendered.join(", "))
            }
            Value::Function(f) => format!("<function {}>", f.name),
            Value::Class(c) => format!("<class {}>", c.name),
            Value::Instance(inst) => format!("<{} instance>", inst.borrow().class.name),
        }
    }
}

/// Floats always print with a fractional digit or an exponent, never
/// looking like an integer literal.
fn format_float(f: f64) -> String {
    let s = format!("{f}");
    if s.contains('.') || s.contains('e') || s.contains('E') {
        s
    } else {
        format!("{s}.0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_repr_always_has_a_fractional_part() {
        assert_eq!(Value::Float(3.0).repr(), "3.0");
        assert_eq!(Value::Float(3.5).repr(), "3.5");
    }

    #[test]
    fn list_repr_nests_without_quoting_strings() {
        let list = Value::list(vec![Value::Integer(1), Value::Str("a".into())]);
        assert_eq!(list.repr(), "[1, a]");
    }

    #[test]
    fn dict_repr_preserves_insertion_order() {
        let dict = Value::dict(vec![
            (Value::Str("b".into()), Value::Integer(2)),
            (Value::Str("a".into()), Value::Integer(1)),
        ]);
        assert_eq!(dict.repr(), "{b: 2, a: 1}");
    }
}
