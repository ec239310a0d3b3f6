use std::cell::RefCell;
use std::collections::BTreeMap;

/// Named values that appear at some point after startup.
///
/// `None` means "not defined yet". Any `Some` value counts as available,
/// including empty collections and zero.
pub trait BindingSource {
    type Value;

    fn lookup(&self, name: &str) -> Option<Self::Value>;
}

impl<S: BindingSource + ?Sized> BindingSource for &S {
    type Value = S::Value;

    fn lookup(&self, name: &str) -> Option<Self::Value> {
        (**self).lookup(name)
    }
}

/// Binding scope backed by a map, filled in by whoever produces the values.
///
/// Definitions go through `&self` so a producer can keep populating the
/// scope while a wait holds a shared reference to it.
#[derive(Debug)]
pub struct InMemoryBindings<V> {
    values: RefCell<BTreeMap<String, V>>,
}

impl<V> Default for InMemoryBindings<V> {
    fn default() -> Self {
        Self {
            values: RefCell::new(BTreeMap::new()),
        }
    }
}

impl<V: Clone> InMemoryBindings<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: impl Into<String>, value: V) {
        self.values.borrow_mut().insert(name.into(), value);
    }
}

impl<V: Clone> BindingSource for InMemoryBindings<V> {
    type Value = V;

    fn lookup(&self, name: &str) -> Option<V> {
        self.values.borrow().get(name).cloned()
    }
}
