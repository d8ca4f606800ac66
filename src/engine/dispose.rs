//! Disposal Cascade - Release peers for a component and its descendants.
//!
//! The disposed flag is set before the peer's `render_dispose` runs, so a
//! component reached twice in one pass (as a removed child and again through
//! an ancestor's cascade) is disposed exactly once.

use tracing::{debug, warn};

use crate::error::{ReconcileError, Result};
use crate::tree::{Application, ComponentUpdate};
use crate::types::RenderId;

use super::renderer::Renderer;

impl Renderer {
    /// Dispose `component` and every descendant, then strip the identity
    /// markers from the component's element subtree.
    ///
    /// Components without a peer and peers already disposed are skipped.
    pub fn render_component_dispose(
        &mut self,
        app: &Application,
        update: &ComponentUpdate,
        component: RenderId,
    ) -> Result<()> {
        self.dispose_tree(app, update, component, true)
    }

    pub(crate) fn dispose_tree(
        &mut self,
        app: &Application,
        update: &ComponentUpdate,
        component: RenderId,
        strip_ids: bool,
    ) -> Result<()> {
        let Some(slot) = self.peers.get(&component) else {
            return Ok(());
        };
        if slot.disposed {
            return Ok(());
        }
        if slot.peer.is_none() {
            return Err(ReconcileError::PeerInUse(component));
        }
        self.mark_disposed(component);

        self.with_peer(app, component, |peer, cx| peer.render_dispose(cx, update))?;
        self.dispose_rest(app, update, component, strip_ids)
    }

    /// Set `component`'s disposed flag. False if it has no peer or was
    /// already disposed.
    pub(crate) fn mark_disposed(&mut self, component: RenderId) -> bool {
        match self.peers.get_mut(&component) {
            Some(slot) if !slot.disposed => {
                slot.disposed = true;
                debug!(%component, "dispose");
                true
            }
            _ => false,
        }
    }

    /// Cascade into the children of a component whose own peer has been
    /// disposed, then strip its identity markers if asked to.
    pub(crate) fn dispose_rest(
        &mut self,
        app: &Application,
        update: &ComponentUpdate,
        component: RenderId,
        strip_ids: bool,
    ) -> Result<()> {
        for &child in app.tree().children(component) {
            self.dispose_tree(app, update, child, false)?;
        }

        if strip_ids {
            let marker = component.dom_id();
            match self.document().element_by_id(&marker) {
                Some(element) => self.document_mut().strip_ids(element),
                None => warn!(%component, "no element to strip identity markers from"),
            }
        }
        Ok(())
    }
}
