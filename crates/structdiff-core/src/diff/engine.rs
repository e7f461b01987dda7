//! Structural diff computation engine.
//!
//! The core entry point is [`diff`], which walks two rooted graphs in
//! lock-step and returns an ordered list of [`DiffResult`]s.
//!
//! ## Ordering
//!
//! At every container, the previous side's own keys are walked first (yielding
//! removals, changes and anything nested below them), then the current side's
//! keys that the previous side lacks (yielding creations). Nested results are
//! spliced in at the position of the key they came from.

use super::array_policy::{self, ArrayDispatch};
use super::cycle::{CycleTracker, PairKey};
use super::equality::equals;
use crate::model::{ArrayRef, Container, DiffResult, Node, ObjectRef, Path};
use crate::options::DiffOptions;
use crate::{log_op_end, log_op_start};

/// Recursive walker for one top-level diff call.
///
/// Owns its own [`CycleTracker`], so separate calls share no state.
pub struct DiffEngine<'o> {
    options: &'o DiffOptions,
    tracker: CycleTracker,
}

impl<'o> DiffEngine<'o> {
    pub fn new(options: &'o DiffOptions) -> Self {
        Self {
            options,
            tracker: CycleTracker::new(options.track_circular_references),
        }
    }

    /// Diff two roots. Roots of different kinds yield a single root-level change.
    pub fn run(&mut self, previous: &Container, current: &Container) -> Vec<DiffResult> {
        let previous = previous.to_node();
        let current = current.to_node();
        self.process(&Path::root(), Some(&previous), Some(&current))
    }

    /// Classify one path given the node found on each side (`None` = absent).
    pub fn process(
        &mut self,
        path: &Path,
        previous: Option<&Node>,
        current: Option<&Node>,
    ) -> Vec<DiffResult> {
        let (previous, current) = match (previous, current) {
            (None, None) => return Vec::new(),
            (None, Some(c)) => return vec![DiffResult::create(path.clone(), c.clone())],
            (Some(p), None) => return vec![DiffResult::remove(path.clone(), p.clone())],
            (Some(p), Some(c)) => (p, c),
        };

        match (previous, current) {
            (Node::Object(p), Node::Object(c)) => {
                self.guarded(path, (p.id(), c.id()), |engine| {
                    engine.walk_object(path, p, c)
                })
            }
            (Node::Array(p), Node::Array(c)) => {
                self.guarded(path, (p.id(), c.id()), |engine| {
                    match array_policy::dispatch(path, p, c, engine.options) {
                        ArrayDispatch::Recurse => engine.walk_array(path, p, c),
                        ArrayDispatch::Resolved(results) => results,
                    }
                })
            }
            (p, c) if p.is_container() || c.is_container() => {
                vec![DiffResult::change(path.clone(), c.clone(), p.clone())]
            }
            (p, c) if equals(p, c) => Vec::new(),
            (p, c) => vec![DiffResult::change(path.clone(), c.clone(), p.clone())],
        }
    }

    /// Run `walk` inside `pair`, unless the pair is already being walked.
    fn guarded<F>(&mut self, path: &Path, pair: PairKey, walk: F) -> Vec<DiffResult>
    where
        F: FnOnce(&mut Self) -> Vec<DiffResult>,
    {
        if self.tracker.is_active(pair) {
            tracing::trace!(path = %path, "container pair already active, not descending");
            return Vec::new();
        }
        let token = self.tracker.enter(pair);
        let results = walk(self);
        self.tracker.exit(token);
        results
    }

    fn walk_object(
        &mut self,
        path: &Path,
        previous: &ObjectRef,
        current: &ObjectRef,
    ) -> Vec<DiffResult> {
        let prev = previous.borrow();
        let cur = current.borrow();
        let mut results = Vec::new();

        for key in prev.own_keys() {
            if self.options.is_skipped(key) {
                continue;
            }
            let current_value = cur.get(key);
            results.extend(self.process(
                &path.child(key),
                prev.get_own(key),
                current_value.as_ref(),
            ));
        }

        for key in cur.own_keys() {
            if self.options.is_skipped(key) || prev.has_key(key) {
                continue;
            }
            results.extend(self.process(&path.child(key), None, cur.get_own(key)));
        }

        results
    }

    fn walk_array(
        &mut self,
        path: &Path,
        previous: &ArrayRef,
        current: &ArrayRef,
    ) -> Vec<DiffResult> {
        let prev = previous.borrow();
        let cur = current.borrow();
        let mut results = Vec::new();

        for (index, previous_value) in prev.iter().enumerate() {
            results.extend(self.process(&path.child(index), Some(previous_value), cur.get(index)));
        }
        for (index, current_value) in cur.iter().enumerate().skip(prev.len()) {
            results.extend(self.process(&path.child(index), None, Some(current_value)));
        }

        results
    }
}

/// Compute the ordered structural diff between two rooted graphs.
///
/// Inputs are only read. With `track_circular_references` disabled, a pair of
/// genuinely cyclic graphs recurses until the stack is exhausted.
///
/// ```
/// use structdiff_core::diff::diff;
/// use structdiff_core::model::{Container, DiffKind};
/// use structdiff_core::options::DiffOptions;
/// use serde_json::json;
///
/// let previous = Container::from_json(&json!({"a": 1, "b": 2})).unwrap();
/// let current = Container::from_json(&json!({"b": 3, "c": 4})).unwrap();
///
/// let results = diff(&previous, &current, &DiffOptions::default());
/// let kinds: Vec<DiffKind> = results.iter().map(|r| r.kind()).collect();
/// assert_eq!(kinds, vec![DiffKind::Remove, DiffKind::Change, DiffKind::Create]);
/// ```
pub fn diff(previous: &Container, current: &Container, options: &DiffOptions) -> Vec<DiffResult> {
    log_op_start!(
        "diff",
        array_policy = %options.array_policy,
        track_cycles = options.track_circular_references,
        skipped_keys = options.keys_to_skip.len() as u64
    );
    let start = std::time::Instant::now();

    let results = DiffEngine::new(options).run(previous, current);

    log_op_end!(
        "diff",
        duration_ms = start.elapsed().as_millis() as u64,
        result_count = results.len() as u64
    );
    results
}
