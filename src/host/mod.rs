//! Host Adapter - the primitives the renderer mutates the real tree with.
//!
//! The reconciler never touches a real tree directly. Everything goes through
//! a [`HostAdapter`]: a DOM binding, a terminal widget tree, a scene graph or
//! the in-memory [`MemoryHost`] used by the tests.
//!
//! # Contract
//!
//! - Calls are synchronous and either succeed or return `Self::Error`; the
//!   renderer propagates the first error unchanged and stops.
//! - `insert` on a node that already has a parent moves it.
//! - `remove` detaches a node. Whether its descendants are detached with it
//!   is up to the host; see [`RendererOptions::remove_descendants`].
//!
//! [`RendererOptions::remove_descendants`]: crate::renderer::RendererOptions::remove_descendants

mod memory;

pub use memory::{HostOp, MemoryHost, MemoryHostError, NodeHandle};

use std::fmt::Debug;
use std::hash::Hash;

use crate::types::PropValue;

/// Target-specific primitives used by the renderer.
pub trait HostAdapter {
    /// Handle to a real node. Containers are nodes too.
    type Node: Clone + Eq + Hash + Debug;

    /// Failure reported by the host.
    type Error;

    /// Allocate a detached element for `tag`.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Allocate a detached text node.
    fn create_text(&mut self, text: &str) -> Result<Self::Node, Self::Error>;

    /// Attach `node` under `parent`, before `anchor` if given, else last.
    fn insert(
        &mut self,
        node: &Self::Node,
        parent: &Self::Node,
        anchor: Option<&Self::Node>,
    ) -> Result<(), Self::Error>;

    /// Detach `node` from its parent.
    fn remove(&mut self, node: &Self::Node) -> Result<(), Self::Error>;

    /// Replace the content of an element with text.
    fn set_element_text(&mut self, node: &Self::Node, text: &str) -> Result<(), Self::Error>;

    /// Set the content of a text node.
    fn set_text(&mut self, node: &Self::Node, text: &str) -> Result<(), Self::Error>;

    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Reconcile one named property. `new == None` removes it.
    fn patch_prop(
        &mut self,
        node: &Self::Node,
        key: &str,
        old: Option<&PropValue>,
        new: Option<&PropValue>,
    ) -> Result<(), Self::Error>;
}
