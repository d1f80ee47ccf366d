//! Virtual nodes - the desired tree handed to the renderer.
//!
//! - [`VNode`] - cheap, identity-preserving handle to one node
//! - [`Children`] - `None | Text | Nodes`, the children payload
//! - [`create_vnode`] / [`text_vnode`] - construction
//! - [`is_same_vnode`] - the reconciliation identity predicate

mod create;
mod node;

pub use create::{create_vnode, is_same_vnode, text_vnode};
pub use node::{Children, VNode, VNodeType};
