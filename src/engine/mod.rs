//! Engine - Peers, the peer registry and the reconciliation passes.
//!
//! - Registry: component type tag to peer factory
//! - Peer: lifecycle contract plus the Root peer
//! - Renderer: peer slots, peer loading, document ownership
//! - Dispose: the disposal cascade
//! - Process: one update pass over the pending records
//!
//! # Architecture
//!
//! Peers live in the renderer, keyed by the component's `RenderId`:
//!
//! ```text
//! c_0: RootPeer   (disposed=false)
//! c_1: LabelPeer  (disposed=false)
//! c_2: ColumnPeer (disposed=true)   removed, released after the pass
//! ```
//!
//! A running peer receives a `RenderContext` that can reach the document and
//! re-enter the renderer for other components.

mod context;
mod dispose;
mod peer;
mod process;
mod registry;
mod renderer;

pub use context::*;
pub use peer::*;
pub use registry::*;
pub use renderer::*;
