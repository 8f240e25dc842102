//! # typeconf-is — Named Type Predicates
//!
//! The type-testing collaborator of `typeconf`. A [`PredicateRegistry`]
//! maps predicate names to pure boolean tests over JSON values; a
//! configuration dispatches to them by name when a definition such as
//! `"string"` or `"positive"` is checked at write time.
//!
//! ## Standard Set
//!
//! [`PredicateRegistry::standard`] registers the predicates in
//! [`standard`], named the way the `is.js` library names them (`string`,
//! `number`, `positive`, `alphaNumeric`, `ipv4`, ...). Callers may start
//! from an empty registry instead and register only their own tests.
//!
//! ## Crate Policy
//!
//! - Depends on no other `typeconf-*` crate.
//! - Predicates are pure: no I/O, no interior state.

pub mod registry;
pub mod standard;

pub use registry::{PredicateFn, PredicateRegistry};
