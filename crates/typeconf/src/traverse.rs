//! # Traversal Engine
//!
//! Decomposes a nested [`Input`] into leaves and hands each leaf, with its
//! full path, to a leaf operation. This is what lets one call declare or
//! write a whole shape:
//!
//! ```text
//! write("a.b", {c: 1, d: [2, 3]})
//!   == write("a.b.c", 1); write("a.b.d[0]", 2); write("a.b.d[1]", 3)
//! ```
//!
//! Leaves are visited depth-first: mapping fields in key order, sequence
//! items in index order. The leaf operation runs immediately for each leaf,
//! so earlier leaves stay applied when a later one fails.

use typeconf_core::{Issues, Path};

use crate::input::Input;

/// Walk `input` below `path`, calling `leaf` once per scalar.
pub(crate) fn traverse<S, F>(path: &Path, input: Input<S>, issues: &mut Issues, leaf: &mut F)
where
    F: FnMut(&Path, S, &mut Issues),
{
    match input {
        Input::Scalar(scalar) => {
            tracing::trace!(path = %path, "visiting leaf");
            leaf(path, scalar, issues);
        }
        Input::Sequence(items) => {
            for (index, item) in items.into_iter().enumerate() {
                traverse(&path.index(index), item, issues, leaf);
            }
        }
        Input::Mapping(fields) => {
            for (name, field) in fields {
                traverse(&path.key(name), field, issues, leaf);
            }
        }
    }
}
