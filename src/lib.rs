//! # spark-peer
//!
//! Component/peer reconciliation engine.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! reactive focus state.
//!
//! ## Architecture
//!
//! An [`Application`] holds an abstract component tree. Every mutation is
//! folded into per-parent update records. A [`Renderer`] keeps one peer per
//! rendered component and, on each pass, brings its document in line with the
//! tree:
//!
//! ```text
//! Application mutations → UpdateManager records → process_updates → peers → Document
//! ```
//!
//! Peers are created from a [`PeerRegistry`] keyed by component type tag.
//!
//! ## Modules
//!
//! - [`types`] - Core types (RenderId, Color, Extent, Insets, Property, etc.)
//! - [`tree`] - Component tree, update records, application
//! - [`dom`] - Element tree the peers render into
//! - [`engine`] - Peer registry, peer contract, renderer, update passes
//! - [`state`] - Focus traversal
//! - [`property`] - Property renderers (extent, insets, border, color, fill image)

pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod property;
pub mod state;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{DoubleInstallPolicy, RendererConfig, UnitMetrics};

pub use dom::{Document, Element, ElementId, Style};

pub use engine::{Focusable, Peer, PeerFactory, PeerRegistry, RenderContext, Renderer, RootPeer};

pub use error::{ReconcileError, Result};

pub use state::{find_next, find_previous, next_sibling, previous_sibling};

pub use tree::{Application, ComponentNode, ComponentTree, ComponentUpdate, UpdateManager, UpdateSource};
