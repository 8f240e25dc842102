//! # Input Model
//!
//! What a caller hands to `write` or `define`. Whether something nests is
//! decided by how the caller builds the [`Input`], never by inspecting the
//! value at runtime: a [`Input::Mapping`] is decomposed field by field, while
//! a [`Input::Scalar`] is one leaf even if it wraps a JSON object.

use std::collections::BTreeMap;

use serde_json::Value;

/// A possibly nested input whose leaves are `S`.
#[derive(Debug, Clone, PartialEq)]
pub enum Input<S> {
    /// One leaf.
    Scalar(S),
    /// Items addressed as `path[0]`, `path[1]`, ...
    Sequence(Vec<Input<S>>),
    /// Fields addressed as `path.name`, visited in key order.
    Mapping(BTreeMap<String, Input<S>>),
}

impl<S> Input<S> {
    /// A single leaf.
    pub fn scalar(leaf: S) -> Self {
        Self::Scalar(leaf)
    }

    /// A sequence of inputs.
    pub fn sequence<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Input<S>>,
    {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// A mapping of named inputs.
    pub fn mapping<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Input<S>>,
    {
        Self::Mapping(
            fields
                .into_iter()
                .map(|(name, field)| (name.into(), field.into()))
                .collect(),
        )
    }

    /// Returns true for sequences and mappings.
    pub fn is_nesting(&self) -> bool {
        !matches!(self, Self::Scalar(_))
    }

    /// Number of leaves the input decomposes into.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(items) => items.iter().map(Self::leaf_count).sum(),
            Self::Mapping(fields) => fields.values().map(Self::leaf_count).sum(),
        }
    }
}

impl Input<Value> {
    /// Keep `value` as one leaf, even if it is a JSON object or array.
    pub fn opaque(value: Value) -> Self {
        Self::Scalar(value)
    }
}

/// JSON arrays become sequences, JSON objects become mappings, anything
/// else is a leaf.
impl From<Value> for Input<Value> {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => Self::Mapping(
                fields
                    .into_iter()
                    .map(|(name, field)| (name, Self::from(field)))
                    .collect(),
            ),
            scalar => Self::Scalar(scalar),
        }
    }
}
