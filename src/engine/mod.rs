//! Engine - bookkeeping shared by the renderer.
//!
//! Real nodes are not stored on VNodes. A VNode holds an [`ElementId`]
//! into the [`ElementRegistry`] owned by its renderer:
//!
//! ```text
//! VNode(li key=a).el = e0v0  ──►  registry[0] = host node #7
//! VNode(li key=b).el = e1v0  ──►  registry[1] = host node #9
//! ```
//!
//! Ownership of an element moves from an old VNode to its replacement by
//! copying the id; releasing the slot bumps its generation so the old id
//! can never resolve to the slot's next occupant.
//!
//! [`ElementId`]: crate::types::ElementId

mod registry;

pub use registry::ElementRegistry;
