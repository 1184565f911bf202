use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::Value;

/// A user-defined class: a name plus an attribute mapping (typically
/// functions, the methods, though the mapping is kept general), with an
/// optional single base class.
#[derive(Debug)]
pub struct Class {
    pub name: String,
    pub base: Option<Rc<Class>>,
    pub attributes: HashMap<String, Value>,
}

impl Class {
    pub fn new(
        name: impl Into<String>,
        base: Option<Rc<Class>>,
        attributes: HashMap<String, Value>,
    ) -> Self {
        Self {
            name: name.into(),
            base,
            attributes,
        }
    }

    /// Method resolution: consult this class, then its base chain.
    pub fn resolve(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.attributes.get(name) {
            return Some(value.clone());
        }
        self.base.as_ref().and_then(|base| base.resolve(name))
    }
}

/// A class instance: a class reference plus a per-instance attribute
/// mapping that never writes back to the class mapping.
#[derive(Debug)]
pub struct Instance {
    pub class: Rc<Class>,
    pub attributes: HashMap<String, Value>,
}

impl Instance {
    pub fn new(class: Rc<Class>) -> Self {
        Self {
            class,
            attributes: HashMap::new(),
        }
    }
}

pub type SharedInstance = Rc<RefCell<Instance>>;
