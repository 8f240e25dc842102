//! # Configuration
//!
//! The owned aggregate: a value tree, a type tree with the same shape,
//! and the predicate registry that named definitions dispatch to.
//!
//! ## Write Pipeline
//!
//! For every leaf of a `write`:
//!
//! 1. Resolve the leaf's parent in the type tree using the glob form of the
//!    path. No parent → [`Issue::InvalidParent`].
//! 2. Find the definition at the final step. None → [`Issue::UndefinedLeaf`].
//! 3. Evaluate it. False → [`Issue::TypeMismatch`].
//! 4. Create the value-tree parent using the plain form and store the value.
//!
//! A rejected leaf never touches the value tree. Accepted leaves are applied
//! immediately, so a rejected call may still have written some leaves.
//!
//! ## Presence
//!
//! `read` and `has` distinguish "never written" from "written with a falsy
//! value": a stored `false`, `0`, `""` or `null` is present.

use serde_json::Value;
use tracing::{debug, trace, warn};
use typeconf_core::{Issue, Issues, Node, Path, Tree};
use typeconf_is::PredicateRegistry;

use crate::definition::TypeDef;
use crate::input::Input;
use crate::traverse::traverse;

/// A typed, hierarchical configuration.
///
/// Every value written must land on a path whose type has been declared
/// with [`Configuration::define`]. Mutation needs `&mut self`; callers
/// sharing one instance across threads wrap it in their own lock.
#[derive(Debug, Clone)]
pub struct Configuration {
    values: Tree<Value>,
    types: Tree<TypeDef>,
    registry: PredicateRegistry,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

impl Configuration {
    /// An empty configuration using the standard predicate set.
    pub fn new() -> Self {
        Self::with_registry(PredicateRegistry::standard())
    }

    /// An empty configuration dispatching named definitions to `registry`.
    pub fn with_registry(registry: PredicateRegistry) -> Self {
        Self {
            values: Tree::new(),
            types: Tree::new(),
            registry,
        }
    }

    /// The registry named definitions are looked up in.
    pub fn registry(&self) -> &PredicateRegistry {
        &self.registry
    }

    /// Discard every definition and every value.
    pub fn clear(&mut self) -> &mut Self {
        debug!(had_types = !self.types.is_empty(), "clearing type definitions");
        self.types.clear();
        self.empty()
    }

    /// Discard every value, keeping the definitions.
    pub fn empty(&mut self) -> &mut Self {
        debug!(had_values = !self.values.is_empty(), "emptying values");
        self.values.clear();
        self
    }

    /// Returns true if a value is stored at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.read(path).is_some()
    }

    /// The value stored at `path`.
    ///
    /// A path ending on a container returns that sub-tree as JSON, with
    /// `null` in place of array holes. Missing locations and paths that do
    /// not parse return `None`.
    pub fn read(&self, path: &str) -> Option<Value> {
        let steps = Path::parse(path).ok()?.steps().ok()?;
        self.values.get(&steps).map(materialize)
    }

    /// The whole value tree as a JSON object.
    pub fn snapshot(&self) -> Value {
        materialize(self.values.root())
    }

    /// The definition that governs `path`, resolved with the glob form so
    /// `list[4]` reports the element definition of `list`.
    pub fn definition(&self, path: &str) -> Option<&TypeDef> {
        let path = Path::parse(path).ok()?;
        self.types.leaf(&path.glob_steps())
    }

    /// Write `value` at `path`, decomposing nested inputs into leaves.
    ///
    /// # Errors
    ///
    /// Returns every [`Issue`] recorded across all leaves. Leaves without
    /// an issue were written regardless. Mapping fields are visited in key
    /// order, so issues come back sorted by field name rather than in the
    /// order the caller built the mapping.
    pub fn write(&mut self, path: &str, value: impl Into<Input<Value>>) -> Result<(), Issues> {
        let mut issues = Issues::new();
        match Path::parse(path) {
            Ok(root) => {
                let input = value.into();
                debug!(
                    path = %root,
                    nested = input.is_nesting(),
                    leaves = input.leaf_count(),
                    "write"
                );
                let mut visit = |leaf: &Path, value: Value, issues: &mut Issues| {
                    self.write_leaf(leaf, value, issues);
                };
                traverse(&root, input, &mut issues, &mut visit);
            }
            Err(e) => issues.push(Issue::MalformedPath {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }

        if !issues.is_empty() {
            debug!(path, issues = issues.len(), "write rejected");
        }
        issues.into_result()
    }

    /// Declare the type at `path`, decomposing nested shapes into leaves.
    ///
    /// Array positions are collapsed, so `list[*]`, `list[0]` and `list[9]`
    /// all declare the element type of `list`. A later definition at the
    /// same leaf replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Issue::MalformedPath`] if `path` does not parse. The
    /// definitions themselves are not checked until a write reaches them.
    /// Issues follow the key order of mapping fields.
    pub fn define(&mut self, path: &str, ty: impl Into<Input<TypeDef>>) -> Result<(), Issues> {
        let mut issues = Issues::new();
        match Path::parse(path) {
            Ok(root) => {
                let input = ty.into();
                debug!(path = %root, leaves = input.leaf_count(), "define");
                let mut visit = |leaf: &Path, definition: TypeDef, issues: &mut Issues| {
                    self.define_leaf(leaf, definition, issues);
                };
                traverse(&root, input, &mut issues, &mut visit);
            }
            Err(e) => issues.push(Issue::MalformedPath {
                path: path.to_string(),
                reason: e.to_string(),
            }),
        }
        issues.into_result()
    }

    fn define_leaf(&mut self, path: &Path, definition: TypeDef, issues: &mut Issues) {
        trace!(path = %path, definition = %definition, "storing definition");
        if let Err(e) = self.types.insert(&path.glob_steps(), definition) {
            issues.push(Issue::MalformedPath {
                path: path.to_string(),
                reason: e.to_string(),
            });
        }
    }

    fn write_leaf(&mut self, path: &Path, value: Value, issues: &mut Issues) {
        let type_steps = path.glob_steps();
        let Some((last, parent_steps)) = type_steps.split_last() else {
            return;
        };

        let Some(parent) = self.types.get(parent_steps) else {
            issues.push(Issue::InvalidParent {
                path: path.to_string(),
                parent: path.parent().to_string(),
            });
            return;
        };

        let Some(definition) = parent.child(last).and_then(Node::as_leaf).cloned() else {
            issues.push(Issue::UndefinedLeaf {
                path: path.to_string(),
                step: path.last().map(ToString::to_string).unwrap_or_default(),
            });
            return;
        };

        if !self.permits(&definition, &value) {
            issues.push(Issue::TypeMismatch {
                path: path.to_string(),
                definition: definition.to_string(),
            });
            return;
        }

        let steps = match path.steps() {
            Ok(steps) => steps,
            Err(e) => {
                issues.push(Issue::MalformedPath {
                    path: path.to_string(),
                    reason: e.to_string(),
                });
                return;
            }
        };

        trace!(path = %path, "storing value");
        if let Err(e) = self.values.insert(&steps, value) {
            issues.push(Issue::MalformedPath {
                path: path.to_string(),
                reason: e.to_string(),
            });
        }
    }

    fn permits(&self, definition: &TypeDef, value: &Value) -> bool {
        match definition {
            TypeDef::Named(name) => self.registry.test(name, value).unwrap_or_else(|| {
                warn!(predicate = %name, "definition names an unregistered predicate");
                false
            }),
            TypeDef::Custom(custom) => custom.evaluate(value, &self.registry, self),
        }
    }
}

/// Render a value-tree node as JSON.
fn materialize(node: &Node<Value>) -> Value {
    match node {
        Node::Leaf(value) => value.clone(),
        Node::Map(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, child)| (name.clone(), materialize(child)))
                .collect(),
        ),
        Node::List(items) => Value::Array(
            items
                .iter()
                .map(|item| item.as_ref().map_or(Value::Null, materialize))
                .collect(),
        ),
    }
}
