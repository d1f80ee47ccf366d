//! Core types for spark-vdom.
//!
//! These types are the vocabulary shared by the VNode model, the host
//! adapter boundary and the renderer: keys, property values, the ordered
//! property bag, shape classification and element ids.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;
use std::rc::Rc;

// =============================================================================
// Event Handler
// =============================================================================

/// Event listener stored as a property value.
///
/// Listener semantics belong to the host; the reconciler only hands the
/// handler over through `patch_prop`. Two handlers are equal only if they are
/// the same allocation.
pub type EventHandler = Rc<dyn Fn()>;

// =============================================================================
// Prop Value
// =============================================================================

/// A single property / attribute / listener value.
#[derive(Clone)]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Event listener (compared by pointer identity).
    Handler(EventHandler),
}

impl PropValue {
    /// Get the string content if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this value is an event handler.
    pub fn is_handler(&self) -> bool {
        matches!(self, PropValue::Handler(_))
    }
}

impl PartialEq for PropValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropValue::Bool(a), PropValue::Bool(b)) => a == b,
            (PropValue::Int(a), PropValue::Int(b)) => a == b,
            (PropValue::Float(a), PropValue::Float(b)) => a == b,
            (PropValue::Str(a), PropValue::Str(b)) => a == b,
            (PropValue::Handler(a), PropValue::Handler(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(v) => write!(f, "Bool({v})"),
            PropValue::Int(v) => write!(f, "Int({v})"),
            PropValue::Float(v) => write!(f, "Float({v})"),
            PropValue::Str(v) => write!(f, "Str({v:?})"),
            PropValue::Handler(h) => write!(f, "Handler({:p})", Rc::as_ptr(h)),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropValue::Bool(v) => write!(f, "{v}"),
            PropValue::Int(v) => write!(f, "{v}"),
            PropValue::Float(v) => write!(f, "{v}"),
            PropValue::Str(v) => f.write_str(v),
            PropValue::Handler(_) => f.write_str("[handler]"),
        }
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Int(value)
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        PropValue::Int(value.into())
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Float(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<EventHandler> for PropValue {
    fn from(value: EventHandler) -> Self {
        PropValue::Handler(value)
    }
}

// =============================================================================
// Key
// =============================================================================

/// Name of the reserved property that carries a VNode's key.
pub const KEY_PROP: &str = "key";

/// Stable sibling identity used by keyed children reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Int(i64),
    Str(Rc<str>),
}

impl Key {
    /// Derive a key from a property value.
    ///
    /// Integers and strings map directly, booleans and floats are
    /// stringified. Handlers cannot act as keys.
    pub fn from_prop(value: &PropValue) -> Option<Key> {
        match value {
            PropValue::Int(v) => Some(Key::Int(*v)),
            PropValue::Str(s) => Some(Key::Str(Rc::from(s.as_str()))),
            PropValue::Bool(_) | PropValue::Float(_) => Some(Key::Str(Rc::from(value.to_string()))),
            PropValue::Handler(_) => None,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(v) => write!(f, "{v}"),
            Key::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Str(Rc::from(value))
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Ordered property bag.
///
/// Iteration is sorted by name so property diffs issue host calls in a
/// deterministic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Create an empty property bag.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a property, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Option<PropValue> {
        self.0.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate properties in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, PropValue> {
        self.0.iter()
    }

    /// The key carried by the reserved `key` property, if any.
    pub fn key(&self) -> Option<Key> {
        let value = self.get(KEY_PROP)?;
        let key = Key::from_prop(value);
        if key.is_none() {
            log::warn!("ignoring `{KEY_PROP}` prop that cannot act as a key: {value:?}");
        }
        key
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a PropValue);
    type IntoIter = btree_map::Iter<'a, String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Returns true for properties consumed by the reconciler itself.
///
/// Reserved properties are never forwarded to the host.
#[inline]
pub fn is_reserved_prop(name: &str) -> bool {
    name == KEY_PROP
}

// =============================================================================
// Shape Flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Shape classification of a VNode.
    ///
    /// `ELEMENT` describes the node kind. `TEXT_CHILDREN` and `ARRAY_CHILDREN`
    /// describe the children payload and are mutually exclusive.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShapeFlags: u8 {
        const ELEMENT = 1 << 0;
        const TEXT_CHILDREN = 1 << 3;
        const ARRAY_CHILDREN = 1 << 4;
    }
}

// =============================================================================
// Element Id
// =============================================================================

/// Handle to a host node held in the renderer's element registry.
///
/// The generation makes ids of released slots stale instead of letting them
/// alias whatever node reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl ElementId {
    /// Slot index inside the registry.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}v{}", self.index, self.generation)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prop_value_equality() {
        assert_eq!(PropValue::from(1), PropValue::Int(1));
        assert_ne!(PropValue::from(1), PropValue::from("1"));

        let handler: EventHandler = Rc::new(|| {});
        let same = PropValue::Handler(handler.clone());
        assert_eq!(PropValue::Handler(handler), same);

        let other: EventHandler = Rc::new(|| {});
        assert_ne!(same, PropValue::Handler(other));
    }

    #[test]
    fn test_key_from_prop() {
        assert_eq!(Key::from_prop(&PropValue::Int(3)), Some(Key::Int(3)));
        assert_eq!(Key::from_prop(&"a".into()), Some(Key::from("a")));
        assert_eq!(Key::from_prop(&PropValue::Bool(true)), Some(Key::from("true")));

        let handler: EventHandler = Rc::new(|| {});
        assert_eq!(Key::from_prop(&PropValue::Handler(handler)), None);
    }

    #[test]
    fn test_props_iterate_sorted() {
        let props = Props::new().with("b", 2).with("a", 1).with("c", 3);
        let names: Vec<&str> = props.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_props_key() {
        assert_eq!(Props::new().with("key", "row-1").key(), Some(Key::from("row-1")));
        assert_eq!(Props::new().with("id", "x").key(), None);
        assert!(is_reserved_prop("key"));
        assert!(!is_reserved_prop("id"));
    }

    #[test]
    fn test_shape_flags_combine() {
        let flags = ShapeFlags::ELEMENT | ShapeFlags::ARRAY_CHILDREN;
        assert!(flags.contains(ShapeFlags::ELEMENT));
        assert!(!flags.contains(ShapeFlags::TEXT_CHILDREN));
    }
}
