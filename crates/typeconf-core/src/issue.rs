//! # Issue Reporting
//!
//! A single `write` or `define` call may touch many leaves. Every problem
//! found along the way is recorded as an [`Issue`] and the whole batch is
//! returned at once as [`Issues`], in the order the leaves were visited.
//!
//! ## Taxonomy
//!
//! - [`Issue::InvalidParent`]: no branch of the type tree covers the
//!   leaf's parent path.
//! - [`Issue::UndefinedLeaf`]: the parent exists but holds no definition
//!   at the final step.
//! - [`Issue::TypeMismatch`]: the value failed its resolved predicate.
//! - [`Issue::MalformedPath`]: the address could not be resolved at all.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// One recorded failure within a batched call.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// The type tree has no branch at the leaf's parent path.
    #[error("{parent} is invalid")]
    InvalidParent {
        /// The leaf path that was written.
        path: String,
        /// The parent path with no type-tree branch.
        parent: String,
    },

    /// The parent exists but has no definition for the final step.
    #[error("{path} is invalid at \"{step}\"")]
    UndefinedLeaf {
        /// The leaf path that was written.
        path: String,
        /// The final step of the path, as written by the caller.
        step: String,
    },

    /// The value did not satisfy the definition at its path.
    #[error("{path} matches an invalid type at \"{definition}\"")]
    TypeMismatch {
        /// The leaf path that was written.
        path: String,
        /// Display form of the failing definition.
        definition: String,
    },

    /// The address could not be parsed or resolved.
    #[error("{path} is malformed: {reason}")]
    MalformedPath {
        /// The address as given.
        path: String,
        /// Why the address was rejected.
        reason: String,
    },
}

impl Issue {
    /// The leaf path this issue was recorded for.
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidParent { path, .. }
            | Self::UndefinedLeaf { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::MalformedPath { path, .. } => path,
        }
    }
}

/// Ordered collection of issues from one call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Issues {
    issues: Vec<Issue>,
}

impl Issues {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one issue.
    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// Returns the number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if there are no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Iterate over the issues in recording order.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Returns a slice of all issues.
    pub fn as_slice(&self) -> &[Issue] {
        &self.issues
    }

    /// The human-readable message of every issue, in order.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(ToString::to_string).collect()
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Issue> {
        self.issues
    }

    /// `Ok(())` when nothing was recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Issues> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for Issues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Issues {}

impl IntoIterator for Issues {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Issues {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
