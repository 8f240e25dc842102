//! # Tree Store
//!
//! Nested containers addressed by [`Step`] sequences. A configuration owns
//! two of these trees, one holding values and one holding type definitions,
//! and both grow the same way.
//!
//! ## Shape Rules
//!
//! - The root is always a mapping.
//! - A [`Step::Key`] descends into a [`Node::Map`], a [`Step::Index`] into a
//!   [`Node::List`]. Lists are sparse: writing position 5 of an empty list
//!   leaves holes at 0..5. An index more than [`MAX_INDEX_GAP`] past the
//!   current end of its list is refused with [`TreeError::IndexGap`].
//! - Creating a path through a node of the wrong shape replaces that node.
//!   The later structure wins; a warning is logged when content is dropped.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::path::Step;

/// How far past the end of a list an insert may reach.
pub const MAX_INDEX_GAP: usize = 1024;

/// Errors from [`Tree::insert`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// An index step lands too far past the end of its list.
    #[error("index {index} is more than {gap} past the end of a list of length {len}", gap = MAX_INDEX_GAP)]
    IndexGap {
        /// The requested position.
        index: usize,
        /// The list length at that point of the path.
        len: usize,
    },
}

/// One node of a tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<T> {
    /// A terminal entry.
    Leaf(T),
    /// Named children.
    Map(BTreeMap<String, Node<T>>),
    /// Positional children; `None` marks a hole.
    List(Vec<Option<Node<T>>>),
}

impl<T> Node<T> {
    /// An empty mapping node.
    pub fn empty_map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// The leaf payload, if this node is a leaf.
    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Self::Leaf(value) => Some(value),
            _ => None,
        }
    }

    /// Short name of the node shape, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Leaf(_) => "leaf",
            Self::Map(_) => "map",
            Self::List(_) => "list",
        }
    }

    /// Returns true if the node is a container with no children.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Map(map) => map.is_empty(),
            Self::List(list) => list.iter().all(Option::is_none),
        }
    }

    /// The child reached by `step`, if the shapes agree and it exists.
    pub fn child(&self, step: &Step) -> Option<&Node<T>> {
        match (self, step) {
            (Self::Map(map), Step::Key(key)) => map.get(key),
            (Self::List(list), Step::Index(index)) => list.get(*index).and_then(Option::as_ref),
            _ => None,
        }
    }

    /// The child reached by `step`, creating it (and reshaping `self`) as
    /// needed. New children start as empty mappings.
    fn descend(&mut self, step: &Step) -> &mut Node<T> {
        match (self, step) {
            (Self::Map(map), Step::Key(key)) => map.entry(key.clone()).or_insert_with(Self::empty_map),
            (Self::List(list), Step::Index(index)) => {
                if list.len() <= *index {
                    list.resize_with(index.saturating_add(1), || None);
                }
                list[*index].get_or_insert_with(Self::empty_map)
            }
            (node, step) => {
                let replacement = match step {
                    Step::Key(_) => Self::empty_map(),
                    Step::Index(_) => Self::List(Vec::new()),
                };
                if !node.is_empty_container() {
                    tracing::warn!(
                        from = node.kind(),
                        to = replacement.kind(),
                        step = %step,
                        "replacing node to create path"
                    );
                }
                *node = replacement;
                node.descend(step)
            }
        }
    }
}

/// A rooted tree of [`Node`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    root: Node<T>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self {
            root: Node::empty_map(),
        }
    }
}

impl<T> Tree<T> {
    /// An empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root mapping.
    pub fn root(&self) -> &Node<T> {
        &self.root
    }

    /// Returns true if nothing has been inserted since construction or the
    /// last [`Tree::clear`].
    pub fn is_empty(&self) -> bool {
        self.root.is_empty_container()
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = Node::empty_map();
    }

    /// The node at `steps`. An empty step sequence addresses the root.
    ///
    /// Returns `None` if any step is missing, lands on a hole, or does not
    /// match the shape of the node it descends into.
    pub fn get(&self, steps: &[Step]) -> Option<&Node<T>> {
        steps
            .iter()
            .try_fold(&self.root, |node, step| node.child(step))
    }

    /// The leaf payload at `steps`, if that node is a leaf.
    pub fn leaf(&self, steps: &[Step]) -> Option<&T> {
        self.get(steps).and_then(Node::as_leaf)
    }

    /// Store `value` as a leaf at `steps`, creating intermediate containers.
    ///
    /// Returns the previous leaf payload at that location, if there was one.
    /// An empty step sequence cannot address a leaf and is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::IndexGap`] if an index step reaches more than
    /// [`MAX_INDEX_GAP`] past the end of its list. The tree is unchanged.
    pub fn insert(&mut self, steps: &[Step], value: T) -> Result<Option<T>, TreeError> {
        self.check_gaps(steps)?;
        let Some((last, parents)) = steps.split_last() else {
            return Ok(None);
        };
        let parent = parents
            .iter()
            .fold(&mut self.root, |node, step| node.descend(step));
        let slot = parent.descend(last);
        match std::mem::replace(slot, Node::Leaf(value)) {
            Node::Leaf(previous) => Ok(Some(previous)),
            _ => Ok(None),
        }
    }

    /// Reject index steps that would allocate an unbounded run of holes.
    /// Missing or wrong-shaped nodes count as empty lists, since `insert`
    /// creates or replaces them.
    fn check_gaps(&self, steps: &[Step]) -> Result<(), TreeError> {
        let mut node = Some(&self.root);
        for step in steps {
            if let Step::Index(index) = step {
                let len = match node {
                    Some(Node::List(list)) => list.len(),
                    _ => 0,
                };
                if *index > len.saturating_add(MAX_INDEX_GAP) {
                    return Err(TreeError::IndexGap { index: *index, len });
                }
            }
            node = node.and_then(|n| n.child(step));
        }
        Ok(())
    }
}
