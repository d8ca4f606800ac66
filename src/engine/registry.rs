//! Peer Registry - Component type tag to peer factory.
//!
//! One registry belongs to one `Renderer`, so independent component trees in
//! the same process never see each other's peer types.

use std::collections::HashMap;

use crate::error::{ReconcileError, Result};
use crate::types::ROOT_TYPE;

use super::peer::{Peer, RootPeer};

/// Creates a fresh peer instance.
pub type PeerFactory = Box<dyn Fn() -> Box<dyn Peer>>;

/// Map of component type tags to peer factories.
pub struct PeerRegistry {
    factories: HashMap<String, PeerFactory>,
}

impl Default for PeerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PeerRegistry {
    /// Registry with the Root peer registered under `"Root"`.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ROOT_TYPE, || RootPeer);
        registry
    }

    /// Registry with nothing registered.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register `factory` for `component_type`.
    ///
    /// A later registration for the same tag replaces the earlier one.
    pub fn register<P, F>(&mut self, component_type: impl Into<String>, factory: F)
    where
        P: Peer + 'static,
        F: Fn() -> P + 'static,
    {
        let factory: PeerFactory = Box::new(move || -> Box<dyn Peer> { Box::new(factory()) });
        self.factories.insert(component_type.into(), factory);
    }

    pub fn is_registered(&self, component_type: &str) -> bool {
        self.factories.contains_key(component_type)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Instantiate the peer for `component_type`.
    pub fn create(&self, component_type: &str) -> Result<Box<dyn Peer>> {
        let factory = self
            .factories
            .get(component_type)
            .ok_or_else(|| ReconcileError::PeerNotFound {
                component_type: component_type.to_string(),
            })?;
        Ok(factory())
    }
}
