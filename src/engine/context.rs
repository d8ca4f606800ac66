//! Render Context - What a peer can reach while one of its operations runs.
//!
//! The context borrows the renderer mutably and the application immutably, so
//! a peer can read the component tree, mutate the document and re-enter the
//! engine for other components (adding or disposing children).

use crate::config::{RendererConfig, UnitMetrics};
use crate::dom::{Document, ElementId};
use crate::error::{ReconcileError, Result};
use crate::tree::{Application, ComponentTree, ComponentUpdate};
use crate::types::{Property, RenderId};

use super::peer::Peer;
use super::renderer::Renderer;

/// Engine access handed to a running peer operation.
pub struct RenderContext<'a> {
    renderer: &'a mut Renderer,
    app: &'a Application,
    component: RenderId,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(renderer: &'a mut Renderer, app: &'a Application, component: RenderId) -> Self {
        Self {
            renderer,
            app,
            component,
        }
    }

    /// The component whose peer is running.
    pub fn component(&self) -> RenderId {
        self.component
    }

    pub fn app(&self) -> &'a Application {
        self.app
    }

    pub fn tree(&self) -> &'a ComponentTree {
        let app: &'a Application = self.app;
        app.tree()
    }

    /// Property of the running component.
    pub fn property(&self, name: &str) -> Option<&'a Property> {
        self.tree().property(self.component, name)
    }

    pub fn config(&self) -> &RendererConfig {
        self.renderer.config()
    }

    pub fn metrics(&self) -> UnitMetrics {
        self.renderer.config().metrics
    }

    pub fn document(&self) -> &Document {
        self.renderer.document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.renderer.document_mut()
    }

    /// The attached element carrying the running component's identity marker.
    pub fn element(&self) -> Option<ElementId> {
        self.document().element_by_id(&self.component.dom_id())
    }

    /// Create an element stamped with the running component's identity marker.
    pub fn create_component_element(&mut self, tag: &str) -> Result<ElementId> {
        let marker = self.component.dom_id();
        let document = self.document_mut();
        let element = document.create_element(tag);
        document.set_id(element, Some(&marker))?;
        Ok(element)
    }

    // =========================================================================
    // Re-entrant engine calls
    // =========================================================================

    /// Load (if needed) and render `child` beneath `parent`.
    pub fn render_component_add(
        &mut self,
        update: &ComponentUpdate,
        child: RenderId,
        parent: ElementId,
    ) -> Result<()> {
        self.renderer.render_component_add(self.app, update, child, parent)
    }

    /// Dispose `component` and its descendants, stripping identity markers.
    ///
    /// The running component may dispose itself, e.g. ahead of a full
    /// re-render from `render_update`. Its own `render_dispose` is not
    /// invoked then since the peer is the caller; use
    /// [`dispose_self`](Self::dispose_self) to have it run.
    pub fn render_component_dispose(&mut self, update: &ComponentUpdate, component: RenderId) -> Result<()> {
        if component == self.component {
            return self.dispose_running(None, update);
        }
        self.renderer.render_component_dispose(self.app, update, component)
    }

    /// Dispose the running component through its own peer, then its
    /// descendants, stripping identity markers.
    ///
    /// ```ignore
    /// fn render_update(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate) -> Result<bool> {
    ///     let container = cx.container_element_for(cx.component())?;
    ///     let element = self.element.take().ok_or(...)?;
    ///     cx.dispose_self(self, update)?;
    ///     cx.document_mut().remove_child(container, element)?;
    ///     self.render_add(cx, update, container)?;
    ///     Ok(true)
    /// }
    /// ```
    pub fn dispose_self(&mut self, peer: &mut dyn Peer, update: &ComponentUpdate) -> Result<()> {
        self.dispose_running(Some(peer), update)
    }

    fn dispose_running(&mut self, peer: Option<&mut dyn Peer>, update: &ComponentUpdate) -> Result<()> {
        let component = self.component;
        if !self.renderer.mark_disposed(component) {
            return Ok(());
        }
        if let Some(peer) = peer {
            peer.render_dispose(self, update)?;
        }
        self.renderer.dispose_rest(self.app, update, component, true)
    }

    /// Dispose every child of the running component, for full re-renders.
    pub fn dispose_children(&mut self, update: &ComponentUpdate) -> Result<()> {
        let app = self.app;
        for &child in app.tree().children(self.component) {
            self.renderer.dispose_tree(app, update, child, false)?;
        }
        Ok(())
    }

    /// Element into which `child` renders, as reported by its parent's peer.
    pub fn container_element_for(&mut self, child: RenderId) -> Result<ElementId> {
        let parent = self.tree().parent(child).ok_or(ReconcileError::InvalidHierarchy {
            component: child,
            reason: "component has no parent",
        })?;
        self.renderer
            .with_peer(self.app, parent, |peer, cx| peer.container_element(cx, child))
    }

    /// Dispose `child` and remove its element from the document.
    pub fn render_remove(&mut self, update: &ComponentUpdate, child: RenderId) -> Result<()> {
        let marker = child.dom_id();
        let element = self
            .document()
            .element_by_id(&marker)
            .ok_or(ReconcileError::ElementNotFound(marker))?;
        let parent = self.document().parent(element);

        self.render_component_dispose(update, child)?;
        if let Some(parent) = parent {
            self.document_mut().remove_child(parent, element)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PeerRegistry;

    /// Renders into a `div` and hosts children in it.
    #[derive(Default)]
    struct Panel {
        element: Option<ElementId>,
    }

    impl Peer for Panel {
        fn render_add(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate, parent: ElementId) -> Result<()> {
            let element = cx.create_component_element("div")?;
            cx.document_mut().append_child(parent, element)?;
            self.element = Some(element);
            for child in cx.tree().children(cx.component()).to_vec() {
                cx.render_component_add(update, child, element)?;
            }
            Ok(())
        }

        fn render_dispose(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
            Ok(())
        }

        fn container_element(&self, cx: &RenderContext<'_>, _child: RenderId) -> Result<ElementId> {
            self.element
                .ok_or_else(|| ReconcileError::ElementNotFound(cx.component().dom_id()))
        }
    }

    fn setup() -> (Application, Renderer, RenderId, RenderId) {
        let mut registry = PeerRegistry::new();
        registry.register("Panel", Panel::default);

        let mut app = Application::new();
        let outer = app.add(app.root(), "Panel").unwrap();
        let inner = app.add(outer, "Panel").unwrap();

        let mut renderer = Renderer::new(&app, registry, RendererConfig::default()).unwrap();
        let update = ComponentUpdate::new(app.root());
        let host = renderer.host_element();
        renderer.render_component_add(&app, &update, outer, host).unwrap();
        (app, renderer, outer, inner)
    }

    #[test]
    fn test_container_element_for_asks_parent_peer() {
        let (app, mut renderer, outer, inner) = setup();
        let outer_el = renderer.document().element_by_id(&outer.dom_id());

        let container = renderer
            .with_peer(&app, inner, |_peer, cx| cx.container_element_for(inner))
            .unwrap();
        assert_eq!(Some(container), outer_el);
    }

    #[test]
    fn test_render_remove_disposes_and_detaches() {
        let (app, mut renderer, outer, inner) = setup();
        let update = ComponentUpdate::new(outer);

        renderer
            .with_peer(&app, outer, |_peer, cx| cx.render_remove(&update, inner))
            .unwrap();

        assert_eq!(renderer.is_disposed(inner), Some(true));
        assert!(renderer.document().element_by_id(&inner.dom_id()).is_none());
        let outer_el = renderer.document().element_by_id(&outer.dom_id()).unwrap();
        assert!(renderer.document().children(outer_el).is_empty());
    }

    #[test]
    fn test_property_reads_running_component() {
        let (mut app, mut renderer, outer, _inner) = setup();
        app.set_property(outer, "title", Some("main".into())).unwrap();

        let title = renderer
            .with_peer(&app, outer, |_peer, cx| {
                Ok(cx.property("title").and_then(|p| p.as_text()).map(str::to_string))
            })
            .unwrap();
        assert_eq!(title.as_deref(), Some("main"));
    }
}
