//! Unmount Engine - tear down mounted subtrees.
//!
//! Every element of the subtree gives its registry slot back. Only the root
//! of the subtree is detached through the host, unless
//! [`RendererOptions::remove_descendants`](super::RendererOptions) asks for
//! children to be removed first, one by one.

use super::Renderer;
use crate::host::HostAdapter;
use crate::vnode::{Children, VNode};

impl<H: HostAdapter> Renderer<H> {
    /// Remove `vnode`'s real node and release its whole subtree.
    pub(super) fn unmount(&mut self, vnode: &VNode) -> Result<(), H::Error> {
        self.unmount_node(vnode, true)
    }

    pub(super) fn unmount_children(&mut self, children: &[VNode]) -> Result<(), H::Error> {
        for child in children {
            self.unmount(child)?;
        }
        Ok(())
    }

    fn unmount_node(&mut self, vnode: &VNode, detach: bool) -> Result<(), H::Error> {
        if let Children::Nodes(children) = vnode.children() {
            let detach_children = self.options.remove_descendants;
            for child in children {
                self.unmount_node(child, detach_children)?;
            }
        }

        let Some(node) = vnode.el().and_then(|id| self.elements.release(id)) else {
            log::trace!("unmount skipped: {:?} has no live element", vnode.node_type());
            return Ok(());
        };

        if detach {
            log::trace!("unmount {:?} key={:?}", vnode.node_type(), vnode.key());
            self.host.remove(&node)?;
        }
        Ok(())
    }
}
