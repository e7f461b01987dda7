//! structdiff core - path-addressed structural diff of object/array graphs
//!
//! This crate provides:
//! - A graph model of leaves and shared, possibly cyclic, containers
//! - Leaf equality rules for numbers, dates, patterns and boxed primitives
//! - The recursive diff engine with cycle tracking and array policies
//! - Options with JSON/TOML configuration loading
//! - Structured errors and the logging facility
//! - A human-readable summary renderer

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod options;

// Used by the exported logging macros
#[doc(hidden)]
pub use structdiff_core_types as core_types;
#[doc(hidden)]
pub use tracing;

// Re-export commonly used types
pub use diff::{diff, render_human_summary};
pub use errors::{DiffError, ExError, ExErrorKind, Result};
pub use model::{Container, DiffKind, DiffResult, Node, Path, PathSegment};
pub use options::{ArrayEquality, ArrayPolicy, DiffOptions};
