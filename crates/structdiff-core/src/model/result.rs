//! Diff events.

use super::node::Node;
use super::path::Path;
use std::fmt;

/// Kind of a [`DiffResult`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiffKind {
    Create,
    Remove,
    Change,
}

impl DiffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffKind::Create => "CREATE",
            DiffKind::Remove => "REMOVE",
            DiffKind::Change => "CHANGE",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One difference between the previous and the current graph.
///
/// Values are handles into the caller's graphs, not deep copies: two results
/// may point at the same container when the graph aliases it.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffResult {
    /// Present in current only
    Create { path: Path, value: Node },
    /// Present in previous only
    Remove { path: Path, old_value: Node },
    /// Present on both sides with unequal values, or with different kinds
    Change {
        path: Path,
        value: Node,
        old_value: Node,
    },
}

impl DiffResult {
    pub fn create(path: Path, value: Node) -> Self {
        DiffResult::Create { path, value }
    }

    pub fn remove(path: Path, old_value: Node) -> Self {
        DiffResult::Remove { path, old_value }
    }

    pub fn change(path: Path, value: Node, old_value: Node) -> Self {
        DiffResult::Change {
            path,
            value,
            old_value,
        }
    }

    pub fn kind(&self) -> DiffKind {
        match self {
            DiffResult::Create { .. } => DiffKind::Create,
            DiffResult::Remove { .. } => DiffKind::Remove,
            DiffResult::Change { .. } => DiffKind::Change,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DiffResult::Create { path, .. }
            | DiffResult::Remove { path, .. }
            | DiffResult::Change { path, .. } => path,
        }
    }

    /// Value on the current side (`None` for removals)
    pub fn value(&self) -> Option<&Node> {
        match self {
            DiffResult::Create { value, .. } | DiffResult::Change { value, .. } => Some(value),
            DiffResult::Remove { .. } => None,
        }
    }

    /// Value on the previous side (`None` for creations)
    pub fn old_value(&self) -> Option<&Node> {
        match self {
            DiffResult::Remove { old_value, .. } | DiffResult::Change { old_value, .. } => {
                Some(old_value)
            }
            DiffResult::Create { .. } => None,
        }
    }
}
