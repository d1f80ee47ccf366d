//! Renderer - turns VNode trees into host mutations.
//!
//! The renderer walks an old and a new VNode tree in lockstep and applies the
//! minimal set of host calls to make the real tree match the new one.
//!
//! # Pipeline
//!
//! ```text
//! render(vnode, container)
//!   └─ previous VNode for container?
//!        ├─ none      → mount      (create, set props, mount children, insert)
//!        ├─ same node → patch      (props diff, children diff, keyed reconciliation)
//!        └─ different → unmount + mount in place
//!   └─ store vnode as the container's previous VNode
//! ```
//!
//! # Modules
//!
//! - `mount` - Mount Engine: materialize a subtree from scratch
//! - `patch` - Patch Engine: node, property and children diffing
//! - `keyed` - keyed children reconciliation + longest increasing subsequence
//! - `unmount` - Unmount Engine: release elements and detach real nodes
//! - `render` - Root Render Entry: per-container previous-VNode slots
//!
//! # Threading
//!
//! A renderer is single-threaded and every call runs to completion. It is not
//! `Send` (VNodes are `Rc` based); callers rendering from several threads must
//! serialize access themselves.

mod keyed;
mod mount;
mod patch;
mod render;
mod unmount;


use std::collections::HashMap;

use crate::engine::ElementRegistry;
use crate::host::HostAdapter;
use crate::types::ElementId;
use crate::vnode::VNode;

// =============================================================================
// Options
// =============================================================================

/// Renderer configuration.
///
/// ```
/// use spark_vdom::RendererOptions;
///
/// let options = RendererOptions::default().with_remove_descendants(true);
/// assert!(options.remove_descendants);
/// assert!(!options.patch_unchanged_props);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RendererOptions {
    /// Remove every descendant through the host before its ancestor.
    ///
    /// Leave this off for hosts whose `remove` detaches a whole subtree.
    /// Registry slots of descendants are released either way.
    pub remove_descendants: bool,

    /// Call `patch_prop` for every property of the new node, even when the
    /// old value is equal.
    pub patch_unchanged_props: bool,
}

impl RendererOptions {
    pub fn with_remove_descendants(mut self, enabled: bool) -> Self {
        self.remove_descendants = enabled;
        self
    }

    pub fn with_patch_unchanged_props(mut self, enabled: bool) -> Self {
        self.patch_unchanged_props = enabled;
        self
    }
}

// =============================================================================
// Renderer
// =============================================================================

/// Reconciler bound to one host.
///
/// Holds the host, the element registry backing every mounted VNode's `el`,
/// and the previous VNode of each container it rendered into.
pub struct Renderer<H: HostAdapter> {
    host: H,
    elements: ElementRegistry<H::Node>,
    roots: HashMap<H::Node, VNode>,
    options: RendererOptions,
}

/// Create a renderer with default options.
pub fn create_renderer<H: HostAdapter>(host: H) -> Renderer<H> {
    Renderer::new(host)
}

impl<H: HostAdapter> Renderer<H> {
    pub fn new(host: H) -> Self {
        Self::with_options(host, RendererOptions::default())
    }

    pub fn with_options(host: H, options: RendererOptions) -> Self {
        Self {
            host,
            elements: ElementRegistry::new(),
            roots: HashMap::new(),
            options,
        }
    }

    pub fn options(&self) -> RendererOptions {
        self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host, e.g. to create containers.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// VNode last rendered into `container`.
    pub fn root(&self, container: &H::Node) -> Option<&VNode> {
        self.roots.get(container)
    }

    /// Host node behind an element id, if it is still live.
    pub fn element(&self, id: ElementId) -> Option<&H::Node> {
        self.elements.get(id)
    }

    /// Host node a VNode currently materializes as.
    pub fn host_node(&self, vnode: &VNode) -> Option<&H::Node> {
        vnode.el().and_then(|id| self.elements.get(id))
    }

    /// Number of live elements (text nodes included).
    pub fn mounted_count(&self) -> usize {
        self.elements.len()
    }

    /// Owned copy of a VNode's host node, for passing back into the host.
    fn node_of(&self, vnode: &VNode) -> Option<H::Node> {
        self.host_node(vnode).cloned()
    }
}
