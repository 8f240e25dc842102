//! # Predicate Registry
//!
//! An explicit capability: a name-to-function table that a configuration
//! receives at construction, instead of looking predicates up on a global
//! object.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::standard;

/// A shareable boolean test over a JSON value.
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Name-to-predicate table.
///
/// Cloning is cheap: predicates are reference-counted.
#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: BTreeMap<String, PredicateFn>,
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRegistry")
            .field("names", &self.predicates.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl PredicateRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every predicate of the standard set.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (name, predicate) in standard::ALL {
            registry.register(*name, *predicate);
        }
        registry
    }

    /// Register `predicate` under `name`, replacing any previous entry.
    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
        self
    }

    /// Remove the predicate registered under `name`.
    pub fn unregister(&mut self, name: &str) -> Option<PredicateFn> {
        self.predicates.remove(name)
    }

    /// Look up a predicate by name.
    pub fn get(&self, name: &str) -> Option<&PredicateFn> {
        self.predicates.get(name)
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Run the predicate `name` against `value`.
    ///
    /// Returns `None` if no predicate is registered under `name`.
    pub fn test(&self, name: &str, value: &Value) -> Option<bool> {
        self.predicates.get(name).map(|predicate| predicate(value))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    /// Returns the number of registered predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true if no predicate is registered.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}
