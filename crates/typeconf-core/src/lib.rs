//! # typeconf-core — Foundational Types for typeconf
//!
//! This crate holds the data structures every other `typeconf` crate is
//! built on. It depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Explicitly tagged steps.** A parsed [`Path`] resolves to [`Step`]s
//!    that are either object keys or array indices. The tag comes from the
//!    path syntax (`a.b` versus `a[0]`), never from whatever value happens
//!    to live at that location.
//!
//! 2. **One tree shape for values and types.** [`Tree<T>`] is generic over
//!    its leaf, so the value tree (`Tree<serde_json::Value>`) and the type
//!    tree (`Tree<TypeDef>`) are addressed by the same steps and grow the
//!    same containers.
//!
//! 3. **Batched issues.** Validation failures are [`Issue`] values gathered
//!    into one [`Issues`] collection per call instead of failing fast.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `typeconf-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod issue;
pub mod path;
pub mod tree;

// Re-export primary types for ergonomic imports.
pub use issue::{Issue, Issues};
pub use path::{Path, PathError, Segment, Step, GLOB_INDEX};
pub use tree::{Node, Tree, TreeError, MAX_INDEX_GAP};
