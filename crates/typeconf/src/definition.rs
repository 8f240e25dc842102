//! # Type Definitions
//!
//! What the type tree stores at each leaf: either the name of a predicate
//! in the configuration's [`PredicateRegistry`], or a custom predicate
//! that also sees the registry and the whole configuration, so a rule can
//! depend on sibling settings.
//!
//! Definitions are not validated when they are declared. A name that is
//! not registered simply fails every write that reaches it.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use typeconf_is::PredicateRegistry;

use crate::configuration::Configuration;
use crate::input::Input;

/// Signature of a custom predicate.
pub type CustomFn = dyn Fn(&Value, &PredicateRegistry, &Configuration) -> bool + Send + Sync;

/// An inline predicate with an optional label used in issue messages.
#[derive(Clone)]
pub struct CustomPredicate {
    label: Option<String>,
    test: Arc<CustomFn>,
}

impl CustomPredicate {
    /// Wrap an unlabeled predicate.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(&Value, &PredicateRegistry, &Configuration) -> bool + Send + Sync + 'static,
    {
        Self {
            label: None,
            test: Arc::new(test),
        }
    }

    /// Wrap a predicate that reports as `label`.
    pub fn labeled<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value, &PredicateRegistry, &Configuration) -> bool + Send + Sync + 'static,
    {
        Self {
            label: Some(label.into()),
            test: Arc::new(test),
        }
    }

    /// The label, if one was given.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Run the predicate.
    pub fn evaluate(
        &self,
        value: &Value,
        registry: &PredicateRegistry,
        configuration: &Configuration,
    ) -> bool {
        (self.test)(value, registry, configuration)
    }
}

impl fmt::Debug for CustomPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Two custom predicates are equal when they share the same function.
impl PartialEq for CustomPredicate {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.test, &other.test)
    }
}

/// The definition stored at one leaf of the type tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDef {
    /// Dispatch to the registry predicate of this name.
    Named(String),
    /// Run an inline predicate.
    Custom(CustomPredicate),
}

impl TypeDef {
    /// A definition naming a registry predicate.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// An unlabeled custom definition.
    pub fn custom<F>(test: F) -> Self
    where
        F: Fn(&Value, &PredicateRegistry, &Configuration) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate::new(test))
    }

    /// A custom definition reported as `label`.
    pub fn labeled<F>(label: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value, &PredicateRegistry, &Configuration) -> bool + Send + Sync + 'static,
    {
        Self::Custom(CustomPredicate::labeled(label, test))
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Custom(custom) => f.write_str(custom.label().unwrap_or("custom")),
        }
    }
}

impl From<&str> for TypeDef {
    fn from(name: &str) -> Self {
        Self::named(name)
    }
}

impl From<String> for TypeDef {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<CustomPredicate> for TypeDef {
    fn from(custom: CustomPredicate) -> Self {
        Self::Custom(custom)
    }
}

impl From<TypeDef> for Input<TypeDef> {
    fn from(definition: TypeDef) -> Self {
        Self::Scalar(definition)
    }
}

impl From<&str> for Input<TypeDef> {
    fn from(name: &str) -> Self {
        Self::Scalar(TypeDef::named(name))
    }
}

impl From<String> for Input<TypeDef> {
    fn from(name: String) -> Self {
        Self::Scalar(TypeDef::Named(name))
    }
}

/// Describe a nested shape with a JSON literal: strings name predicates,
/// arrays and objects nest. Any other scalar becomes a name built from its
/// JSON text, which no registry is expected to know.
impl From<Value> for Input<TypeDef> {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Self::Scalar(TypeDef::Named(name)),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Mapping(
                fields
                    .into_iter()
                    .map(|(name, field)| (name, Self::from(field)))
                    .collect(),
            ),
            other => Self::Scalar(TypeDef::Named(other.to_string())),
        }
    }
}
