//! Active container-pair tracking.
//!
//! The tracker holds the (previous, current) container pairs on the current
//! recursion path. A pair is entered before its subtree is walked and exited
//! afterwards, so `is_active` is true only while the walk is inside that
//! pair. State lives for one top-level diff call.

use crate::model::ContainerId;
use std::collections::HashSet;

/// Joint identity of a previous/current container pair
pub type PairKey = (ContainerId, ContainerId);

/// Proof that a pair was entered; hand it back to [`CycleTracker::exit`].
#[must_use = "an entered pair stays active until its token is passed to exit"]
#[derive(Debug)]
pub struct PairToken {
    key: Option<PairKey>,
}

#[derive(Debug)]
pub struct CycleTracker {
    enabled: bool,
    active: HashSet<PairKey>,
}

impl CycleTracker {
    /// A tracker that records pairs when `enabled`, and is inert otherwise.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            active: HashSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether the walk is currently inside `pair`. Always false when disabled.
    pub fn is_active(&self, pair: PairKey) -> bool {
        self.enabled && self.active.contains(&pair)
    }

    pub fn enter(&mut self, pair: PairKey) -> PairToken {
        if !self.enabled {
            return PairToken { key: None };
        }
        self.active.insert(pair);
        PairToken { key: Some(pair) }
    }

    pub fn exit(&mut self, token: PairToken) {
        if let Some(key) = token.key {
            self.active.remove(&key);
        }
    }

    /// Number of pairs currently on the recursion path
    pub fn depth(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Object, ObjectRef};

    fn pair(a: &ObjectRef, b: &ObjectRef) -> PairKey {
        (a.id(), b.id())
    }

    #[test]
    fn test_active_only_between_enter_and_exit() {
        let a = ObjectRef::new(Object::new());
        let b = ObjectRef::new(Object::new());
        let mut tracker = CycleTracker::new(true);

        assert!(!tracker.is_active(pair(&a, &b)));
        let token = tracker.enter(pair(&a, &b));
        assert!(tracker.is_active(pair(&a, &b)));
        assert_eq!(tracker.depth(), 1);
        tracker.exit(token);
        assert!(!tracker.is_active(pair(&a, &b)));
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_pairs_are_ordered() {
        let a = ObjectRef::new(Object::new());
        let b = ObjectRef::new(Object::new());
        let mut tracker = CycleTracker::new(true);

        let token = tracker.enter(pair(&a, &b));
        assert!(!tracker.is_active(pair(&b, &a)));
        assert!(!tracker.is_active(pair(&a, &a)));
        tracker.exit(token);
    }

    #[test]
    fn test_disabled_tracker_records_nothing() {
        let a = ObjectRef::new(Object::new());
        let mut tracker = CycleTracker::new(false);

        let token = tracker.enter(pair(&a, &a));
        assert!(!tracker.is_active(pair(&a, &a)));
        assert_eq!(tracker.depth(), 0);
        tracker.exit(token);
        assert!(!tracker.is_enabled());
    }
}
