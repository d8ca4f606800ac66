//! Peer contract and the Root peer.
//!
//! A peer synchronizes one component with the document. Every lifecycle
//! operation except `init` fails loudly unless the concrete peer overrides it,
//! so a missing override surfaces as `UnsupportedOperation` naming the
//! component instead of rendering nothing.

use crate::dom::ElementId;
use crate::error::{ReconcileError, Result};
use crate::tree::ComponentUpdate;
use crate::types::RenderId;

use super::context::RenderContext;

// =============================================================================
// Peer
// =============================================================================

/// Lifecycle operations of a component synchronization peer.
///
/// `cx.component()` is the component this peer belongs to.
pub trait Peer {
    /// Called once, right after the peer is linked to its component.
    fn init(&mut self, _cx: &mut RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    /// Create this component's elements and attach them under `parent`.
    fn render_add(
        &mut self,
        cx: &mut RenderContext<'_>,
        _update: &ComponentUpdate,
        _parent: ElementId,
    ) -> Result<()> {
        Err(ReconcileError::unsupported("render_add", cx.component()))
    }

    /// Release everything this peer holds. The disposed flag is already set.
    fn render_dispose(&mut self, cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
        Err(ReconcileError::unsupported("render_dispose", cx.component()))
    }

    /// Bring the rendering in line with the component's current state.
    ///
    /// Returns `true` when the whole descendant subtree was torn down and
    /// re-rendered, `false` for an in-place patch that left descendant peers
    /// alone.
    fn render_update(&mut self, cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<bool> {
        Err(ReconcileError::unsupported("render_update", cx.component()))
    }

    /// Element into which `child` (a child of this component) renders.
    fn container_element(&self, cx: &RenderContext<'_>, _child: RenderId) -> Result<ElementId> {
        Err(ReconcileError::unsupported("container_element", cx.component()))
    }

    /// Focus capability. Peers that return `Some` are focus traversal stops.
    fn focusable(&self) -> Option<&dyn Focusable> {
        None
    }
}

/// Optional capability of peers whose component can take keyboard focus.
pub trait Focusable {
    /// Move input focus to this peer's rendering.
    fn focus(&self, cx: &mut RenderContext<'_>) -> Result<()>;
}

// =============================================================================
// Root Peer
// =============================================================================

/// Peer of the implicit top-level component.
///
/// Its container is the host element carrying the root's identity marker,
/// which the hosting environment owns. Every update re-renders all children.
#[derive(Debug, Default)]
pub struct RootPeer;

impl RootPeer {
    fn root_element(cx: &RenderContext<'_>) -> Result<ElementId> {
        cx.element()
            .ok_or_else(|| ReconcileError::ElementNotFound(cx.component().dom_id()))
    }
}

impl Peer for RootPeer {
    fn container_element(&self, cx: &RenderContext<'_>, _child: RenderId) -> Result<ElementId> {
        Self::root_element(cx)
    }

    fn render_dispose(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
        Ok(())
    }

    fn render_update(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate) -> Result<bool> {
        let root_element = Self::root_element(cx)?;
        cx.dispose_children(update)?;
        cx.document_mut().remove_all_children(root_element)?;

        let children = cx.tree().children(cx.component()).to_vec();
        for child in children {
            cx.render_component_add(update, child, root_element)?;
        }
        Ok(true)
    }
}
