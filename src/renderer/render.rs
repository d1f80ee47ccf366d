//! Root Render Entry - one previous-VNode slot per container.
//!
//! ```
//! use spark_vdom::{create_renderer, create_vnode, MemoryHost};
//!
//! let mut renderer = create_renderer(MemoryHost::new());
//! let root = renderer.host_mut().create_root();
//!
//! renderer.render(Some(create_vnode("p", None, "hello")), &root)?;
//! assert_eq!(renderer.host().markup(root), "<p>hello</p>");
//!
//! renderer.render(Some(create_vnode("p", None, "world")), &root)?;
//! assert_eq!(renderer.host().markup(root), "<p>world</p>");
//!
//! renderer.render(None, &root)?;
//! assert_eq!(renderer.host().markup(root), "");
//! # Ok::<(), spark_vdom::MemoryHostError>(())
//! ```

use super::Renderer;
use crate::host::HostAdapter;
use crate::vnode::VNode;

impl<H: HostAdapter> Renderer<H> {
    /// Render `vnode` into `container`, reconciling against the previous render.
    ///
    /// `None` tears down whatever was rendered before. The container slot is
    /// updated only if every host call succeeded; on error the real tree may
    /// be partially updated.
    pub fn render(&mut self, vnode: Option<VNode>, container: &H::Node) -> Result<(), H::Error> {
        let previous = self.roots.get(container).cloned();

        match vnode {
            None => {
                if let Some(previous) = previous {
                    log::debug!("render: tearing down tree in {container:?}");
                    self.unmount(&previous)?;
                }
                self.roots.remove(container);
            }
            Some(vnode) => {
                log::debug!(
                    "render: {} {:?} in {container:?}",
                    if previous.is_some() { "patching" } else { "mounting" },
                    vnode.node_type()
                );
                self.patch(previous.as_ref(), &vnode, container)?;
                self.roots.insert(container.clone(), vnode);
            }
        }

        Ok(())
    }
}
