//! MemoryHost - in-memory reference implementation of [`HostAdapter`].
//!
//! Keeps the real tree in a flat arena (nodes are indices, like the
//! component registry of a TUI) and records every mutating call in an
//! operation log. Tests assert against the log to count creates, inserts,
//! moves and removes; [`MemoryHost::markup`] renders a subtree for
//! structural assertions.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use super::HostAdapter;
use crate::types::PropValue;

// =============================================================================
// Handles & Errors
// =============================================================================

/// Index of a node inside a [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

impl NodeHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors reported by [`MemoryHost`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryHostError {
    #[error("unknown node {0}")]
    UnknownNode(NodeHandle),

    #[error("anchor {anchor} is not a child of {parent}")]
    AnchorNotChild { anchor: NodeHandle, parent: NodeHandle },

    #[error("node {0} is not an element")]
    NotAnElement(NodeHandle),

    #[error("node {0} is not a text node")]
    NotAText(NodeHandle),

    #[error("cannot insert {node} into its own subtree at {parent}")]
    CyclicInsert { node: NodeHandle, parent: NodeHandle },
}

// =============================================================================
// Operation Log
// =============================================================================

/// One recorded mutating call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostOp {
    CreateElement { node: NodeHandle, tag: String },
    CreateText { node: NodeHandle, text: String },
    Insert { node: NodeHandle, parent: NodeHandle, anchor: Option<NodeHandle> },
    Remove { node: NodeHandle },
    SetElementText { node: NodeHandle, text: String },
    SetText { node: NodeHandle, text: String },
    PatchProp {
        node: NodeHandle,
        key: String,
        old: Option<PropValue>,
        new: Option<PropValue>,
    },
}

impl HostOp {
    pub fn is_create(&self) -> bool {
        matches!(self, HostOp::CreateElement { .. } | HostOp::CreateText { .. })
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, HostOp::Insert { .. })
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, HostOp::Remove { .. })
    }
}

// =============================================================================
// Node Storage
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    Root,
    Element(String),
    Text,
}

#[derive(Debug)]
struct MemoryNode {
    kind: NodeKind,
    /// Text content (element text or text node content).
    text: String,
    props: BTreeMap<String, PropValue>,
    children: Vec<NodeHandle>,
    parent: Option<NodeHandle>,
}

impl MemoryNode {
    fn new(kind: NodeKind, text: String) -> Self {
        Self {
            kind,
            text,
            props: BTreeMap::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

// =============================================================================
// MemoryHost
// =============================================================================

/// Arena-backed host tree with an operation log.
#[derive(Debug, Default)]
pub struct MemoryHost {
    nodes: Vec<MemoryNode>,
    ops: Vec<HostOp>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container node to render into. Not recorded in the log.
    pub fn create_root(&mut self) -> NodeHandle {
        self.alloc(MemoryNode::new(NodeKind::Root, String::new()))
    }

    // -------------------------------------------------------------------------
    // Operation log
    // -------------------------------------------------------------------------

    /// All recorded operations since the last clear.
    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    /// Drain the operation log.
    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    /// Total number of nodes ever allocated (roots included).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn children(&self, node: NodeHandle) -> &[NodeHandle] {
        self.nodes.get(node.0).map_or(&[], |n| n.children.as_slice())
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    /// Tag name of an element node.
    pub fn tag(&self, node: NodeHandle) -> Option<&str> {
        match &self.nodes.get(node.0)?.kind {
            NodeKind::Element(tag) => Some(tag),
            _ => None,
        }
    }

    /// Text content of an element or text node.
    pub fn text(&self, node: NodeHandle) -> Option<&str> {
        self.nodes.get(node.0).map(|n| n.text.as_str())
    }

    pub fn prop(&self, node: NodeHandle, key: &str) -> Option<&PropValue> {
        self.nodes.get(node.0)?.props.get(key)
    }

    /// Serialize a subtree to compact HTML-like markup.
    ///
    /// Roots render as the concatenation of their children, elements as
    /// `<tag name="value">text children</tag>`, text nodes as their content.
    pub fn markup(&self, node: NodeHandle) -> String {
        let mut out = String::new();
        self.write_markup(node, &mut out);
        out
    }

    fn write_markup(&self, handle: NodeHandle, out: &mut String) {
        let Some(node) = self.nodes.get(handle.0) else { return };
        match &node.kind {
            NodeKind::Root => {
                for child in &node.children {
                    self.write_markup(*child, out);
                }
            }
            NodeKind::Text => out.push_str(&node.text),
            NodeKind::Element(tag) => {
                out.push('<');
                out.push_str(tag);
                for (key, value) in &node.props {
                    out.push_str(&format!(" {key}=\"{value}\""));
                }
                out.push('>');
                out.push_str(&node.text);
                for child in &node.children {
                    self.write_markup(*child, out);
                }
                out.push_str(&format!("</{tag}>"));
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn alloc(&mut self, node: MemoryNode) -> NodeHandle {
        let handle = NodeHandle(self.nodes.len());
        self.nodes.push(node);
        handle
    }

    fn node(&self, handle: NodeHandle) -> Result<&MemoryNode, MemoryHostError> {
        self.nodes.get(handle.0).ok_or(MemoryHostError::UnknownNode(handle))
    }

    fn node_mut(&mut self, handle: NodeHandle) -> Result<&mut MemoryNode, MemoryHostError> {
        self.nodes.get_mut(handle.0).ok_or(MemoryHostError::UnknownNode(handle))
    }

    fn element_mut(&mut self, handle: NodeHandle) -> Result<&mut MemoryNode, MemoryHostError> {
        let node = self.node_mut(handle)?;
        match node.kind {
            NodeKind::Element(_) => Ok(node),
            _ => Err(MemoryHostError::NotAnElement(handle)),
        }
    }

    /// Is `ancestor` equal to `node` or one of its ancestors?
    fn is_ancestor_or_self(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = Some(node);
        while let Some(handle) = current {
            if handle == ancestor {
                return true;
            }
            current = self.parent(handle);
        }
        false
    }

    fn detach(&mut self, handle: NodeHandle) {
        let Some(parent) = self.parent(handle) else { return };
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.retain(|child| *child != handle);
        }
        if let Some(n) = self.nodes.get_mut(handle.0) {
            n.parent = None;
        }
    }
}

impl HostAdapter for MemoryHost {
    type Node = NodeHandle;
    type Error = MemoryHostError;

    fn create_element(&mut self, tag: &str) -> Result<NodeHandle, MemoryHostError> {
        let node = self.alloc(MemoryNode::new(NodeKind::Element(tag.to_string()), String::new()));
        self.ops.push(HostOp::CreateElement { node, tag: tag.to_string() });
        Ok(node)
    }

    fn create_text(&mut self, text: &str) -> Result<NodeHandle, MemoryHostError> {
        let node = self.alloc(MemoryNode::new(NodeKind::Text, text.to_string()));
        self.ops.push(HostOp::CreateText { node, text: text.to_string() });
        Ok(node)
    }

    fn insert(
        &mut self,
        node: &NodeHandle,
        parent: &NodeHandle,
        anchor: Option<&NodeHandle>,
    ) -> Result<(), MemoryHostError> {
        let (node, parent) = (*node, *parent);
        self.node(node)?;
        if self.node(parent)?.kind == NodeKind::Text {
            return Err(MemoryHostError::NotAnElement(parent));
        }
        if self.is_ancestor_or_self(node, parent) {
            return Err(MemoryHostError::CyclicInsert { node, parent });
        }
        if let Some(&anchor) = anchor {
            if anchor == node || self.parent(anchor) != Some(parent) {
                return Err(MemoryHostError::AnchorNotChild { anchor, parent });
            }
        }

        self.detach(node);

        let siblings = &mut self.node_mut(parent)?.children;
        let position = anchor
            .and_then(|a| siblings.iter().position(|child| child == a))
            .unwrap_or(siblings.len());
        siblings.insert(position, node);
        self.node_mut(node)?.parent = Some(parent);

        self.ops.push(HostOp::Insert { node, parent, anchor: anchor.copied() });
        Ok(())
    }

    fn remove(&mut self, node: &NodeHandle) -> Result<(), MemoryHostError> {
        self.node(*node)?;
        self.detach(*node);
        self.ops.push(HostOp::Remove { node: *node });
        Ok(())
    }

    fn set_element_text(&mut self, node: &NodeHandle, text: &str) -> Result<(), MemoryHostError> {
        let element = self.element_mut(*node)?;
        element.text = text.to_string();
        let children = std::mem::take(&mut element.children);
        for child in children {
            if let Some(c) = self.nodes.get_mut(child.0) {
                c.parent = None;
            }
        }
        self.ops.push(HostOp::SetElementText { node: *node, text: text.to_string() });
        Ok(())
    }

    fn set_text(&mut self, node: &NodeHandle, text: &str) -> Result<(), MemoryHostError> {
        let target = self.node_mut(*node)?;
        if target.kind != NodeKind::Text {
            return Err(MemoryHostError::NotAText(*node));
        }
        target.text = text.to_string();
        self.ops.push(HostOp::SetText { node: *node, text: text.to_string() });
        Ok(())
    }

    fn parent_node(&self, node: &NodeHandle) -> Option<NodeHandle> {
        self.parent(*node)
    }

    fn next_sibling(&self, node: &NodeHandle) -> Option<NodeHandle> {
        let parent = self.parent(*node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|child| child == node)?;
        siblings.get(position + 1).copied()
    }

    fn patch_prop(
        &mut self,
        node: &NodeHandle,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) -> Result<(), MemoryHostError> {
        let element = self.element_mut(*node)?;
        match new {
            Some(value) => element.props.insert(key.to_string(), value.clone()),
            None => element.props.remove(key),
        };
        self.ops.push(HostOp::PatchProp {
            node: *node,
            key: key.to_string(),
            old: old.cloned(),
            new: new.cloned(),
        });
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
