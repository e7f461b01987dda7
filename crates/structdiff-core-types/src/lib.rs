//! Core types shared across structdiff facilities
//!
//! This crate provides the canonical schema constants used by the logging
//! facility and by anything that inspects captured log events:
//!
//! - **Field keys**: component, op, event, duration and diff-specific fields
//! - **Event names**: start / end / end_error

pub mod schema;
