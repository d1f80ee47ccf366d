//! # spark-vdom
//!
//! Virtual node reconciler for Rust.
//!
//! Describe the UI you want as a tree of lightweight [`VNode`]s; the
//! [`Renderer`] computes the minimal set of mutations that turns the
//! previously rendered real tree into it and applies them through a
//! [`HostAdapter`].
//!
//! ## Architecture
//!
//! ```text
//! create_vnode → VNode tree → Renderer::render → mount / patch / unmount → HostAdapter
//!                                  │
//!                                  └─ previous VNode per container
//! ```
//!
//! The renderer is a pure tree-diff-and-apply engine. It does not decide
//! when to render, manage component instances, or interpret layout.
//!
//! ## Modules
//!
//! - [`types`] - Keys, property values, shape flags, element ids
//! - [`vnode`] - The VNode model and node construction
//! - [`host`] - The host adapter trait and the in-memory [`MemoryHost`]
//! - [`engine`] - Element registry backing VNode `el` references
//! - [`renderer`] - Mount, patch, keyed reconciliation, unmount, render
//!
//! ## Logging
//!
//! Decisions are reported through the [`log`] facade: `debug` per render
//! call, `trace` per mount/move/unmount, `warn` for caller contract
//! violations such as duplicate sibling keys. No logger is installed.

pub mod engine;
pub mod host;
pub mod renderer;
pub mod types;
pub mod vnode;

// Re-export commonly used items
pub use types::*;

pub use vnode::{create_vnode, is_same_vnode, text_vnode, Children, VNode, VNodeType};

pub use host::{HostAdapter, HostOp, MemoryHost, MemoryHostError, NodeHandle};

pub use renderer::{create_renderer, Renderer, RendererOptions};
