//! Structural diff engine.
//!
//! Compares two rooted graphs of objects and arrays and produces an ordered
//! list of CREATE / REMOVE / CHANGE events addressed by path.
//!
//! ## Entry point
//!
//! ```ignore
//! use structdiff_core::diff::diff;
//!
//! let results = diff(&previous, &current, &DiffOptions::default());
//! let summary = structdiff_core::diff::render_human_summary(&results);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce identical, identically ordered results.
//! - **Read-only**: neither graph is mutated.
//! - **Cycle safety**: with `track_circular_references` on, a container pair
//!   already being compared is not entered again.
//! - **Local ordering**: at each level, results from the previous side's keys
//!   precede creations for keys only the current side has.

pub mod array_policy;
pub mod cycle;
pub mod engine;
pub mod equality;
pub mod human_summary;

pub use engine::{diff, DiffEngine};
pub use equality::equals;
pub use human_summary::render_human_summary;
