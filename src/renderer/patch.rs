//! Patch Engine - reconcile an old VNode against its replacement.
//!
//! # Node pairs
//!
//! | old          | new                      | action                          |
//! |--------------|--------------------------|---------------------------------|
//! | none         | any                      | mount                           |
//! | same handle  | same handle              | nothing                         |
//! | some         | not the same logical node| unmount old, mount new in place |
//! | some         | same logical node        | reuse element, diff props + kids|
//!
//! # Children
//!
//! Dispatch is on the (old, new) children payloads:
//!
//! ```text
//! old \ new   Text                 Nodes                  None
//! Text        set text if changed  clear text, mount all  clear text
//! Nodes       unmount all, set     keyed reconciliation   unmount all
//! None        set text             mount all              -
//! ```

use super::Renderer;
use crate::host::HostAdapter;
use crate::types::{is_reserved_prop, Props};
use crate::vnode::{is_same_vnode, Children, VNode, VNodeType};

impl<H: HostAdapter> Renderer<H> {
    /// Reconcile `old` (if any) into `new` under `container`.
    pub(super) fn patch(
        &mut self,
        old: Option<&VNode>,
        new: &VNode,
        container: &H::Node,
    ) -> Result<(), H::Error> {
        let Some(old) = old else {
            return self.mount(new, container, None);
        };

        if old.ptr_eq(new) {
            return Ok(());
        }

        if !is_same_vnode(old, new) {
            return self.replace(old, new, container);
        }

        match new.node_type() {
            VNodeType::Element(_) => self.patch_element(old, new, container),
            VNodeType::Text => self.patch_text(old, new, container),
        }
    }

    /// Swap `old` for an unrelated `new`, keeping its position.
    fn replace(&mut self, old: &VNode, new: &VNode, container: &H::Node) -> Result<(), H::Error> {
        let old_node = self.node_of(old);
        let next = old_node.as_ref().and_then(|node| self.host.next_sibling(node));
        let parent = old_node
            .as_ref()
            .and_then(|node| self.host.parent_node(node))
            .unwrap_or_else(|| container.clone());

        log::trace!("replace {:?} with {:?}", old.node_type(), new.node_type());
        self.unmount(old)?;
        self.mount(new, &parent, next.as_ref())
    }

    /// Take over the old element, or mount fresh if the old one is gone.
    fn adopt_element(&self, old: &VNode, new: &VNode) -> Option<H::Node> {
        let id = old.el()?;
        let node = self.elements.get(id)?.clone();
        new.set_el(id);
        Some(node)
    }

    fn patch_element(&mut self, old: &VNode, new: &VNode, container: &H::Node) -> Result<(), H::Error> {
        let Some(el) = self.adopt_element(old, new) else {
            log::warn!("patching from a VNode with no live element; mounting {:?} fresh", new.tag());
            return self.mount(new, container, None);
        };

        self.patch_props(&el, old.props(), new.props())?;
        self.patch_children(old, new, &el)
    }

    fn patch_text(&mut self, old: &VNode, new: &VNode, container: &H::Node) -> Result<(), H::Error> {
        let Some(el) = self.adopt_element(old, new) else {
            log::warn!("patching from a text VNode with no live node; mounting fresh");
            return self.mount(new, container, None);
        };

        let next = new.children().as_text().unwrap_or_default();
        if old.children().as_text().unwrap_or_default() != next {
            self.host.set_text(&el, next)?;
        }
        Ok(())
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Apply added/changed properties, then remove the ones that went away.
    fn patch_props(
        &mut self,
        el: &H::Node,
        old: Option<&Props>,
        new: Option<&Props>,
    ) -> Result<(), H::Error> {
        let empty = Props::new();
        let old = old.unwrap_or(&empty);
        let new = new.unwrap_or(&empty);

        for (key, next) in new {
            if is_reserved_prop(key) {
                continue;
            }
            let prev = old.get(key);
            if prev == Some(next) && !self.options.patch_unchanged_props {
                continue;
            }
            self.host.patch_prop(el, key, prev, Some(next))?;
        }

        for (key, prev) in old {
            if is_reserved_prop(key) || new.contains(key) {
                continue;
            }
            self.host.patch_prop(el, key, Some(prev), None)?;
        }

        Ok(())
    }

    // =========================================================================
    // Children
    // =========================================================================

    fn patch_children(&mut self, old: &VNode, new: &VNode, el: &H::Node) -> Result<(), H::Error> {
        match (old.children(), new.children()) {
            (Children::Text(prev), Children::Text(next)) => {
                if prev != next {
                    self.host.set_element_text(el, next)?;
                }
            }
            (Children::Nodes(prev), Children::Text(next)) => {
                self.unmount_children(prev)?;
                self.host.set_element_text(el, next)?;
            }
            (Children::None, Children::Text(next)) => {
                self.host.set_element_text(el, next)?;
            }
            (Children::Text(_), Children::Nodes(next)) => {
                self.host.set_element_text(el, "")?;
                self.mount_children(next, el)?;
            }
            (Children::Nodes(prev), Children::Nodes(next)) => {
                self.patch_keyed_children(prev, next, el)?;
            }
            (Children::None, Children::Nodes(next)) => {
                self.mount_children(next, el)?;
            }
            (Children::Text(_), Children::None) => {
                self.host.set_element_text(el, "")?;
            }
            (Children::Nodes(prev), Children::None) => {
                self.unmount_children(prev)?;
            }
            (Children::None, Children::None) => {}
        }
        Ok(())
    }
}
