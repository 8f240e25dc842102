#![deny(missing_docs)]

//! # typeconf — Typed Hierarchical Configuration
//!
//! An in-memory configuration store where every value lives at a path such
//! as `server.tls.port` or `upstreams[2].host`, and every path must have a
//! declared type before anything can be written to it.
//!
//! ```
//! use serde_json::json;
//! use typeconf::Configuration;
//!
//! let mut config = Configuration::new();
//! config
//!     .define("server", json!({"host": "string", "ports": ["integer"]}))
//!     .unwrap();
//! config
//!     .write("server", json!({"host": "localhost", "ports": [80, 443]}))
//!     .unwrap();
//!
//! assert_eq!(config.read("server.ports[1]"), Some(json!(443)));
//!
//! let issues = config.write("server.host", json!(1)).unwrap_err();
//! assert_eq!(
//!     issues.to_string(),
//!     "server.host matches an invalid type at \"string\""
//! );
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Define before write.** The type tree is the schema. A write is
//!    checked leaf by leaf against it and rejected leaves never reach the
//!    value tree.
//!
//! 2. **One definition per array.** Definitions collapse every index onto a
//!    single element slot, so `list[*]` governs `list[0]`, `list[1]`, ...
//!
//! 3. **Explicit nesting.** Callers decide what nests by building an
//!    [`Input`]. JSON objects and arrays nest by default; [`Input::opaque`]
//!    stores one as a single value.
//!
//! 4. **Every issue, not the first.** `write` and `define` return all
//!    [`Issue`]s found in one call as an [`Issues`] error.
//!
//! ## Crate Policy
//!
//! - Predicates come from an injected [`PredicateRegistry`]; nothing is global.
//! - No `unsafe` code.
//! - No `.unwrap()` outside tests.

pub mod configuration;
pub mod definition;
pub mod input;
mod traverse;

pub use configuration::Configuration;
pub use definition::{CustomFn, CustomPredicate, TypeDef};
pub use input::Input;
pub use typeconf_core::{Issue, Issues, Path, PathError};
pub use typeconf_is::PredicateRegistry;
