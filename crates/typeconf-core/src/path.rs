//! # Path Addressing
//!
//! Converts human-written address strings into the steps used to walk
//! the value and type trees.
//!
//! ## Grammar
//!
//! ```text
//! path    := segment ('.' segment)*
//! segment := name ('[' token ']')*
//! ```
//!
//! `name` is any non-empty run of characters other than `.`, `[` and `]`.
//! `token` is any run of characters other than `]`. Any number of bracket
//! groups may appear in a path, so `matrix[0][1]` and `a[0].b[1]` both
//! address nested arrays.
//!
//! ## Two Resolutions
//!
//! - **Plain** ([`Path::steps`]): every index token must be a non-negative
//!   integer. Used for reading and writing values.
//! - **Glob** ([`Path::glob_steps`]): every index token, whatever its text,
//!   collapses onto [`GLOB_INDEX`]. Used for the type tree, where one
//!   definition covers every element of an array: `list[3]`, `list[7]`
//!   and `list[*]` all resolve to the same slot.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The single array slot that holds the element definition of an array
/// in the type tree.
pub const GLOB_INDEX: usize = 0;

/// Error produced when an address string does not follow the path grammar.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The address was the empty string.
    #[error("path is empty")]
    Empty,

    /// The address starts with `[`; the tree root is always a mapping.
    #[error("path '{path}' starts with an array index")]
    LeadingIndex {
        /// The offending address.
        path: String,
    },

    /// A `.` was not followed by a key name.
    #[error("path '{path}' has an empty key at segment {position}")]
    EmptyKey {
        /// The offending address.
        path: String,
        /// Zero-based segment position of the empty key.
        position: usize,
    },

    /// A `[` was never closed.
    #[error("path '{path}' has an unterminated '['")]
    Unterminated {
        /// The offending address.
        path: String,
    },

    /// A `]` appeared outside of a bracket group.
    #[error("path '{path}' has an unexpected ']'")]
    UnexpectedClose {
        /// The offending address.
        path: String,
    },

    /// A closing `]` was followed by something other than `.` or `[`.
    #[error("path '{path}' has unexpected '{found}' after ']'")]
    TrailingText {
        /// The offending address.
        path: String,
        /// The character that followed the bracket group.
        found: char,
    },

    /// An index token could not be used as an array position.
    #[error("index '{token}' in path '{path}' is not a non-negative integer")]
    InvalidIndex {
        /// The address containing the token.
        path: String,
        /// The raw token between the brackets.
        token: String,
    },
}

/// One parsed segment of an address, before index tokens are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Descend into a mapping by field name.
    Key(String),
    /// Descend into a sequence; the token is kept verbatim (`3`, `*`, ...).
    Index(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(token) => f.write_str(token),
        }
    }
}

/// One resolved step through a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Descend into a mapping by field name.
    Key(String),
    /// Descend into a sequence by position.
    Index(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

/// A parsed address into a configuration.
///
/// A `Path` keeps the caller's index tokens so it can be displayed back
/// exactly as written and resolved either way (plain or glob). Paths built
/// by [`Path::key`] and [`Path::index`] append segments structurally, so a
/// field name containing `.` stays a single key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse an address string.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] describing the first grammar violation.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }

        let mut segments = Vec::new();
        let mut chars = input.chars().peekable();

        loop {
            let mut name = String::new();
            while let Some(&c) = chars.peek() {
                match c {
                    '.' | '[' => break,
                    ']' => {
                        return Err(PathError::UnexpectedClose {
                            path: input.to_string(),
                        })
                    }
                    _ => {
                        name.push(c);
                        chars.next();
                    }
                }
            }

            if name.is_empty() {
                if segments.is_empty() && chars.peek() == Some(&'[') {
                    return Err(PathError::LeadingIndex {
                        path: input.to_string(),
                    });
                }
                return Err(PathError::EmptyKey {
                    path: input.to_string(),
                    position: segments.len(),
                });
            }
            segments.push(Segment::Key(name));

            while chars.peek() == Some(&'[') {
                chars.next();
                let mut token = String::new();
                loop {
                    match chars.next() {
                        Some(']') => break,
                        Some(c) => token.push(c),
                        None => {
                            return Err(PathError::Unterminated {
                                path: input.to_string(),
                            })
                        }
                    }
                }
                segments.push(Segment::Index(token));
            }

            match chars.next() {
                None => break,
                Some('.') => continue,
                Some(found) => {
                    return Err(PathError::TrailingText {
                        path: input.to_string(),
                        found,
                    })
                }
            }
        }

        Ok(Self { segments })
    }

    /// The parsed segments, in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path (no segments).
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, if any.
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// The path without its final segment. The parent of a single-segment
    /// path is the (empty) root path.
    pub fn parent(&self) -> Path {
        let end = self.segments.len().saturating_sub(1);
        Self {
            segments: self.segments[..end].to_vec(),
        }
    }

    /// A child path descending into the mapping field `name`.
    pub fn key(&self, name: impl Into<String>) -> Path {
        let mut segments = self.segments.clone();
        segments.push(Segment::Key(name.into()));
        Self { segments }
    }

    /// A child path descending into array position `index`.
    pub fn index(&self, index: usize) -> Path {
        let mut segments = self.segments.clone();
        segments.push(Segment::Index(index.to_string()));
        Self { segments }
    }

    /// Resolve to concrete steps for the value tree.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidIndex`] if an index token is not a
    /// non-negative integer.
    pub fn steps(&self) -> Result<Vec<Step>, PathError> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => Ok(Step::Key(key.clone())),
                Segment::Index(token) => {
                    token
                        .parse::<usize>()
                        .map(Step::Index)
                        .map_err(|_| PathError::InvalidIndex {
                            path: self.to_string(),
                            token: token.clone(),
                        })
                }
            })
            .collect()
    }

    /// Resolve to type-tree steps, collapsing every index onto [`GLOB_INDEX`].
    pub fn glob_steps(&self) -> Vec<Step> {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Key(key) => Step::Key(key.clone()),
                Segment::Index(_) => Step::Index(GLOB_INDEX),
            })
            .collect()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Index(token) => write!(f, "[{token}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
