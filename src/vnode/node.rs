//! VNode model - the description of one node in the desired tree.
//!
//! A VNode is immutable once created except for its `el` back-reference,
//! which the renderer sets when the node is mounted or when it takes over
//! the element of the VNode it replaces.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::types::{ElementId, Key, Props, ShapeFlags};

// =============================================================================
// Node Type
// =============================================================================

/// What kind of real node a VNode materializes as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VNodeType {
    /// Host element with a tag name.
    Element(Rc<str>),
    /// Bare text node. Its content lives in `Children::Text`.
    Text,
}

impl VNodeType {
    /// Tag name for element nodes.
    pub fn tag(&self) -> Option<&str> {
        match self {
            VNodeType::Element(tag) => Some(tag),
            VNodeType::Text => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, VNodeType::Element(_))
    }
}

impl From<&str> for VNodeType {
    fn from(tag: &str) -> Self {
        VNodeType::Element(Rc::from(tag))
    }
}

impl From<String> for VNodeType {
    fn from(tag: String) -> Self {
        VNodeType::Element(Rc::from(tag))
    }
}

// =============================================================================
// Children
// =============================================================================

/// Children payload of a VNode.
///
/// The variant is the single source of truth for the child shape; the
/// `TEXT_CHILDREN` / `ARRAY_CHILDREN` flags are derived from it.
#[derive(Debug, Clone, Default)]
pub enum Children {
    #[default]
    None,
    Text(String),
    Nodes(Vec<VNode>),
}

impl Children {
    /// Child shape bits for this payload.
    pub fn shape_flag(&self) -> ShapeFlags {
        match self {
            Children::None => ShapeFlags::empty(),
            Children::Text(_) => ShapeFlags::TEXT_CHILDREN,
            Children::Nodes(_) => ShapeFlags::ARRAY_CHILDREN,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Children::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_nodes(&self) -> Option<&[VNode]> {
        match self {
            Children::Nodes(nodes) => Some(nodes),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Children::None)
    }
}

// Text coercion: an empty string carries no children.
fn text_children(text: String) -> Children {
    if text.is_empty() {
        Children::None
    } else {
        Children::Text(text)
    }
}

impl From<()> for Children {
    fn from(_: ()) -> Self {
        Children::None
    }
}

impl From<&str> for Children {
    fn from(text: &str) -> Self {
        text_children(text.to_string())
    }
}

impl From<String> for Children {
    fn from(text: String) -> Self {
        text_children(text)
    }
}

impl From<Vec<VNode>> for Children {
    fn from(nodes: Vec<VNode>) -> Self {
        Children::Nodes(nodes)
    }
}

impl<const N: usize> From<[VNode; N]> for Children {
    fn from(nodes: [VNode; N]) -> Self {
        Children::Nodes(nodes.into())
    }
}

impl<T: Into<Children>> From<Option<T>> for Children {
    fn from(value: Option<T>) -> Self {
        value.map_or(Children::None, Into::into)
    }
}

macro_rules! text_coercible {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Children {
                fn from(value: $ty) -> Self {
                    text_children(value.to_string())
                }
            }
        )*
    };
}

text_coercible!(bool, char, i32, i64, u32, u64, usize, f64);

// =============================================================================
// VNode
// =============================================================================

struct VNodeInner {
    node_type: VNodeType,
    props: Option<Props>,
    children: Children,
    key: Option<Key>,
    el: Cell<Option<ElementId>>,
}

/// Virtual node handle.
///
/// Cloning is cheap and preserves identity: two clones are the same node for
/// the renderer's `old === new` short-circuit.
#[derive(Clone)]
pub struct VNode(Rc<VNodeInner>);

impl VNode {
    pub(crate) fn from_parts(
        node_type: VNodeType,
        props: Option<Props>,
        children: Children,
        key: Option<Key>,
    ) -> Self {
        Self(Rc::new(VNodeInner {
            node_type,
            props,
            children,
            key,
            el: Cell::new(None),
        }))
    }

    pub fn node_type(&self) -> &VNodeType {
        &self.0.node_type
    }

    /// Tag name for element nodes.
    pub fn tag(&self) -> Option<&str> {
        self.0.node_type.tag()
    }

    pub fn props(&self) -> Option<&Props> {
        self.0.props.as_ref()
    }

    pub fn children(&self) -> &Children {
        &self.0.children
    }

    pub fn key(&self) -> Option<&Key> {
        self.0.key.as_ref()
    }

    /// Element currently materializing this node, if mounted.
    pub fn el(&self) -> Option<ElementId> {
        self.0.el.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.0.el.get().is_some()
    }

    pub(crate) fn set_el(&self, id: ElementId) {
        self.0.el.set(Some(id));
    }

    /// Shape classification, derived from the node type and children.
    pub fn shape_flag(&self) -> ShapeFlags {
        let kind = if self.0.node_type.is_element() {
            ShapeFlags::ELEMENT
        } else {
            ShapeFlags::empty()
        };
        kind | self.0.children.shape_flag()
    }

    /// Reference identity.
    pub fn ptr_eq(&self, other: &VNode) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for VNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VNode")
            .field("type", &self.0.node_type)
            .field("key", &self.0.key)
            .field("props", &self.0.props)
            .field("children", &self.0.children)
            .field("el", &self.0.el.get())
            .finish()
    }
}
