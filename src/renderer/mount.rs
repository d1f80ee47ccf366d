//! Mount Engine - materialize a VNode subtree with no previous counterpart.
//!
//! An element is fully populated (props, text or children) before it is
//! inserted, so exactly one insert happens per mounted node and a node never
//! becomes visible without its children.

use super::Renderer;
use crate::host::HostAdapter;
use crate::types::is_reserved_prop;
use crate::vnode::{Children, VNode, VNodeType};

impl<H: HostAdapter> Renderer<H> {
    /// Mount `vnode` into `container`, before `anchor` if given.
    pub(super) fn mount(
        &mut self,
        vnode: &VNode,
        container: &H::Node,
        anchor: Option<&H::Node>,
    ) -> Result<(), H::Error> {
        if let Some(id) = vnode.el().filter(|id| self.elements.is_allocated(*id)) {
            log::warn!(
                "mounting a VNode that is still mounted as {id}; it now tracks the new element"
            );
        }

        match vnode.node_type() {
            VNodeType::Element(tag) => self.mount_element(vnode, tag, container, anchor),
            VNodeType::Text => self.mount_text(vnode, container, anchor),
        }
    }

    pub(super) fn mount_children(
        &mut self,
        children: &[VNode],
        container: &H::Node,
    ) -> Result<(), H::Error> {
        for child in children {
            self.mount(child, container, None)?;
        }
        Ok(())
    }

    fn mount_element(
        &mut self,
        vnode: &VNode,
        tag: &str,
        container: &H::Node,
        anchor: Option<&H::Node>,
    ) -> Result<(), H::Error> {
        log::trace!("mount <{tag}> shape={:?} key={:?}", vnode.shape_flag(), vnode.key());

        let node = self.host.create_element(tag)?;
        vnode.set_el(self.elements.allocate(node.clone()));

        if let Some(props) = vnode.props() {
            for (key, value) in props.iter().filter(|(key, _)| !is_reserved_prop(key)) {
                self.host.patch_prop(&node, key, None, Some(value))?;
            }
        }

        match vnode.children() {
            Children::Text(text) => self.host.set_element_text(&node, text)?,
            Children::Nodes(children) => self.mount_children(children, &node)?,
            Children::None => {}
        }

        self.host.insert(&node, container, anchor)
    }

    fn mount_text(
        &mut self,
        vnode: &VNode,
        container: &H::Node,
        anchor: Option<&H::Node>,
    ) -> Result<(), H::Error> {
        let text = vnode.children().as_text().unwrap_or_default();
        let node = self.host.create_text(text)?;
        vnode.set_el(self.elements.allocate(node.clone()));

        self.host.insert(&node, container, anchor)
    }
}
