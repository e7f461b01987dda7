//! Node and container model.
//!
//! A graph is built from [`Node`] values. Leaves are plain data; objects and
//! arrays are shared handles ([`ObjectRef`], [`ArrayRef`]) so that a caller can
//! alias a container at several paths or close a cycle. The diff engine only
//! ever borrows these handles immutably.

use chrono::{DateTime, TimeZone, Utc};
use indexmap::IndexMap;
use std::any::Any;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::diff::equality;

/// Identity of a container allocation.
///
/// Two handles share a `ContainerId` iff they point at the same container.
/// Only meaningful while both handles are alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(usize);

/// Shape of a container, used to detect object/array kind mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Object,
    Array,
}

/// Key/value mapping with insertion-ordered own keys and an optional prototype.
///
/// Own keys are what gets walked during a diff. Existence checks
/// ([`Object::has_key`]) and lookups ([`Object::get`]) also see keys that are
/// only reachable through the prototype chain.
#[derive(Default)]
pub struct Object {
    entries: IndexMap<String, Node>,
    prototype: Option<ObjectRef>,
}

impl Object {
    /// Create a new empty object with no prototype
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty object whose inherited lookups fall through to `prototype`
    pub fn with_prototype(prototype: ObjectRef) -> Self {
        Self {
            entries: IndexMap::new(),
            prototype: Some(prototype),
        }
    }

    /// Insert or overwrite an own entry, keeping the original position on overwrite
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) -> Option<Node> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove an own entry, preserving the order of the remaining keys
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key)
    }

    /// Own keys in insertion order
    pub fn own_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Own value for `key`, ignoring the prototype chain
    pub fn get_own(&self, key: &str) -> Option<&Node> {
        self.entries.get(key)
    }

    /// Whether `key` is an own key
    pub fn has_own_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Whether `key` is visible on this object, either as an own key or
    /// through the prototype chain.
    pub fn has_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Look `key` up on this object, then along the prototype chain.
    ///
    /// A prototype chain that loops back on itself is walked once.
    pub fn get(&self, key: &str) -> Option<Node> {
        if let Some(value) = self.entries.get(key) {
            return Some(value.clone());
        }

        let mut seen: Vec<ContainerId> = Vec::new();
        let mut next = self.prototype.clone();
        while let Some(proto) = next {
            if seen.contains(&proto.id()) {
                break;
            }
            seen.push(proto.id());

            let object = proto.borrow();
            if let Some(value) = object.entries.get(key) {
                return Some(value.clone());
            }
            next = object.prototype.clone();
        }
        None
    }

    /// The prototype, if any
    pub fn prototype(&self) -> Option<&ObjectRef> {
        self.prototype.as_ref()
    }

    /// Replace the prototype
    pub fn set_prototype(&mut self, prototype: Option<ObjectRef>) {
        self.prototype = prototype;
    }

    /// Number of own entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no own entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Node>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            prototype: None,
        }
    }
}

/// Shared handle to an [`Object`].
#[derive(Clone, Default)]
pub struct ObjectRef(Rc<RefCell<Object>>);

impl ObjectRef {
    pub fn new(object: Object) -> Self {
        Self(Rc::new(RefCell::new(object)))
    }

    /// Immutably borrow the object.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Object> {
        self.0.borrow()
    }

    /// Mutably borrow the object, e.g. to close a cycle after construction.
    ///
    /// # Panics
    ///
    /// Panics if the object is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Object> {
        self.0.borrow_mut()
    }

    pub fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as usize)
    }

    /// Reference identity
    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// Keys only: a full dump would not terminate on cyclic graphs.
impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.try_borrow() {
            Ok(object) => f
                .debug_struct("ObjectRef")
                .field("id", &self.id().0)
                .field("keys", &object.entries.keys().collect::<Vec<_>>())
                .finish(),
            Err(_) => f
                .debug_struct("ObjectRef")
                .field("id", &self.id().0)
                .finish_non_exhaustive(),
        }
    }
}

/// Shared handle to an ordered sequence of nodes.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Node>>>);

impl ArrayRef {
    pub fn new(items: Vec<Node>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    /// Immutably borrow the elements.
    ///
    /// # Panics
    ///
    /// Panics if the array is currently mutably borrowed.
    pub fn borrow(&self) -> Ref<'_, Vec<Node>> {
        self.0.borrow()
    }

    /// Mutably borrow the elements.
    ///
    /// # Panics
    ///
    /// Panics if the array is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Node>> {
        self.0.borrow_mut()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Element at `index`, cloned out of the array
    pub fn get(&self, index: usize) -> Option<Node> {
        self.0.borrow().get(index).cloned()
    }

    pub fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as usize)
    }

    /// Reference identity
    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ArrayRef");
        s.field("id", &self.id().0);
        match self.0.try_borrow() {
            Ok(items) => s.field("len", &items.len()).finish(),
            Err(_) => s.finish_non_exhaustive(),
        }
    }
}

/// Handle to a value of a kind the diff engine does not understand
/// (functions, native handles, foreign collections). Compared by identity only.
#[derive(Clone)]
pub struct OpaqueRef(Rc<dyn Any>);

impl OpaqueRef {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    /// Reference identity (data pointer only, vtables are not compared)
    pub fn ptr_eq(&self, other: &OpaqueRef) -> bool {
        std::ptr::eq(
            Rc::as_ptr(&self.0) as *const (),
            Rc::as_ptr(&other.0) as *const (),
        )
    }
}

impl fmt::Debug for OpaqueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpaqueRef({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// A point in time, stored as epoch milliseconds. NaN marks an invalid date.
#[derive(Debug, Clone, Copy)]
pub struct DateValue {
    millis: f64,
}

impl DateValue {
    pub fn from_millis(millis: f64) -> Self {
        Self { millis }
    }

    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            millis: at.timestamp_millis() as f64,
        }
    }

    pub fn invalid() -> Self {
        Self { millis: f64::NAN }
    }

    pub fn millis(&self) -> f64 {
        self.millis
    }

    pub fn is_valid(&self) -> bool {
        !self.millis.is_nan()
    }

    /// UTC rendering of the timestamp, `None` for invalid dates and for
    /// timestamps chrono cannot represent
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        // `as` saturates, so reject anything outside i64 before casting
        if !self.millis.is_finite() || self.millis.abs() >= i64::MAX as f64 {
            return None;
        }
        Utc.timestamp_millis_opt(self.millis as i64).single()
    }
}

/// A regular-expression-like pattern, kept as its source text and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternValue {
    pub source: String,
    pub flags: String,
}

impl PatternValue {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }

    /// Canonical `/source/flags` form; two patterns are equal iff these match
    pub fn canonical(&self) -> String {
        format!("/{}/{}", self.source, self.flags)
    }
}

/// Payload of a boxed primitive (a wrapper object around a primitive value).
#[derive(Debug, Clone)]
pub enum Primitive {
    Number(f64),
    String(String),
    Bool(bool),
    BigInt(i128),
}

/// Any value reachable at a path.
#[derive(Debug, Clone)]
pub enum Node {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    BigInt(i128),
    Date(DateValue),
    Pattern(PatternValue),
    Boxed(Primitive),
    Object(ObjectRef),
    Array(ArrayRef),
    Opaque(OpaqueRef),
}

impl Node {
    /// Build a fresh object node from key/value pairs
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Object(ObjectRef::new(entries.into_iter().collect()))
    }

    /// Build a fresh array node
    pub fn array<V, I>(items: I) -> Self
    where
        V: Into<Node>,
        I: IntoIterator<Item = V>,
    {
        Node::Array(ArrayRef::new(items.into_iter().map(Into::into).collect()))
    }

    pub fn date_millis(millis: f64) -> Self {
        Node::Date(DateValue::from_millis(millis))
    }

    pub fn pattern(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Node::Pattern(PatternValue::new(source, flags))
    }

    pub fn opaque<T: Any>(value: T) -> Self {
        Node::Opaque(OpaqueRef::new(value))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Object(_) | Node::Array(_))
    }

    /// The container behind this node, if it is one
    pub fn as_container(&self) -> Option<Container> {
        match self {
            Node::Object(o) => Some(Container::Object(o.clone())),
            Node::Array(a) => Some(Container::Array(a.clone())),
            _ => None,
        }
    }

    /// Short, stable name of the node's kind
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::BigInt(_) => "bigint",
            Node::Date(_) => "date",
            Node::Pattern(_) => "pattern",
            Node::Boxed(_) => "boxed",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
            Node::Opaque(_) => "opaque",
        }
    }
}

/// Nodes compare with leaf-equality semantics: containers and opaque values
/// by identity, everything else by value.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        equality::equals(self, other)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Number(value)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Number(f64::from(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<DateValue> for Node {
    fn from(value: DateValue) -> Self {
        Node::Date(value)
    }
}

impl From<PatternValue> for Node {
    fn from(value: PatternValue) -> Self {
        Node::Pattern(value)
    }
}

impl From<ObjectRef> for Node {
    fn from(value: ObjectRef) -> Self {
        Node::Object(value)
    }
}

impl From<ArrayRef> for Node {
    fn from(value: ArrayRef) -> Self {
        Node::Array(value)
    }
}

impl From<Container> for Node {
    fn from(value: Container) -> Self {
        match value {
            Container::Object(o) => Node::Object(o),
            Container::Array(a) => Node::Array(a),
        }
    }
}

/// A recursible node: the root of a graph, or any object/array inside it.
#[derive(Debug, Clone)]
pub enum Container {
    Object(ObjectRef),
    Array(ArrayRef),
}

impl Container {
    pub fn id(&self) -> ContainerId {
        match self {
            Container::Object(o) => o.id(),
            Container::Array(a) => a.id(),
        }
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            Container::Object(_) => ContainerKind::Object,
            Container::Array(_) => ContainerKind::Array,
        }
    }

    pub fn to_node(&self) -> Node {
        Node::from(self.clone())
    }
}

impl From<ObjectRef> for Container {
    fn from(value: ObjectRef) -> Self {
        Container::Object(value)
    }
}

impl From<ArrayRef> for Container {
    fn from(value: ArrayRef) -> Self {
        Container::Array(value)
    }
}
