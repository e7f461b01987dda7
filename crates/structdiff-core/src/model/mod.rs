//! Data model: nodes, containers, paths and diff events.

pub mod convert;
pub mod node;
pub mod path;
pub mod result;

pub use node::{
    ArrayRef, Container, ContainerId, ContainerKind, DateValue, Node, Object, ObjectRef,
    OpaqueRef, PatternValue, Primitive,
};
pub use path::{Path, PathSegment};
pub use result::{DiffKind, DiffResult};
