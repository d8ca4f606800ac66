//! Renderer - Owns the peer registry, the peer slots and the document.
//!
//! Each component that has been rendered owns one slot holding its peer and
//! the peer's disposed flag. A peer is checked out of its slot while one of
//! its operations runs and put back afterwards, so nested engine calls can
//! borrow the renderer mutably without aliasing the running peer.

use std::collections::HashMap;

use tracing::debug;

use crate::config::{DoubleInstallPolicy, RendererConfig};
use crate::dom::{Document, ElementId};
use crate::error::{ReconcileError, Result};
use crate::tree::{Application, ComponentUpdate};
use crate::types::RenderId;

use super::context::RenderContext;
use super::peer::Peer;
use super::registry::PeerRegistry;

/// Deferred work run after every completed update pass.
pub type RedrawHook = Box<dyn FnMut(&mut Document)>;

/// A component's peer plus its disposal state.
pub(crate) struct PeerSlot {
    /// `None` while one of the peer's own operations is running.
    pub(crate) peer: Option<Box<dyn Peer>>,
    pub(crate) disposed: bool,
}

impl PeerSlot {
    fn new(peer: Box<dyn Peer>) -> Self {
        Self {
            peer: Some(peer),
            disposed: false,
        }
    }
}

/// Synchronizes an `Application` with a `Document` through peers.
pub struct Renderer {
    registry: PeerRegistry,
    config: RendererConfig,
    document: Document,
    host: ElementId,
    pub(crate) peers: HashMap<RenderId, PeerSlot>,
    redraw_hooks: Vec<RedrawHook>,
}

impl Renderer {
    /// Create a renderer for `app`.
    ///
    /// The document starts with the host element of the root component
    /// attached to its body, carrying the root's identity marker.
    pub fn new(app: &Application, registry: PeerRegistry, config: RendererConfig) -> Result<Self> {
        let mut document = Document::new();
        let host = document.create_element("div");
        document.set_id(host, Some(&app.root().dom_id()))?;
        let body = document.body();
        document.append_child(body, host)?;

        Ok(Self {
            registry,
            config,
            document,
            host,
            peers: HashMap::new(),
            redraw_hooks: Vec::new(),
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn registry(&self) -> &PeerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut PeerRegistry {
        &mut self.registry
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Element hosting the root component's rendering.
    pub fn host_element(&self) -> ElementId {
        self.host
    }

    pub fn has_peer(&self, component: RenderId) -> bool {
        self.peers.contains_key(&component)
    }

    /// Disposed flag of `component`'s peer, `None` if it has no peer.
    pub fn is_disposed(&self, component: RenderId) -> Option<bool> {
        self.peers.get(&component).map(|slot| slot.disposed)
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Register work to run after every completed update pass.
    pub fn on_redraw(&mut self, hook: impl FnMut(&mut Document) + 'static) {
        self.redraw_hooks.push(Box::new(hook));
    }

    pub(crate) fn run_redraw_hooks(&mut self) {
        for hook in &mut self.redraw_hooks {
            hook(&mut self.document);
        }
    }

    // =========================================================================
    // Peer lifecycle
    // =========================================================================

    /// Create and initialize the peer for `component` from the registry.
    ///
    /// A component that already has a peer is left alone or rejected
    /// according to the configured `DoubleInstallPolicy`.
    pub fn load_peer(&mut self, app: &Application, component: RenderId) -> Result<()> {
        if self.peers.contains_key(&component) {
            return match self.config.double_install {
                DoubleInstallPolicy::Tolerate => Ok(()),
                DoubleInstallPolicy::Fail => Err(ReconcileError::PeerAlreadyInstalled(component)),
            };
        }

        let component_type = app
            .tree()
            .component_type(component)
            .ok_or(ReconcileError::InvalidHierarchy {
                component,
                reason: "component is not in the tree",
            })?;
        let peer = self.registry.create(component_type)?;
        self.peers.insert(component, PeerSlot::new(peer));
        debug!(%component, component_type, "peer loaded");

        if let Err(err) = self.with_peer(app, component, |peer, cx| peer.init(cx)) {
            self.peers.remove(&component);
            return Err(err);
        }
        Ok(())
    }

    /// Render `component` beneath `parent`, loading its peer first if needed.
    ///
    /// A previously disposed peer is revived.
    pub fn render_component_add(
        &mut self,
        app: &Application,
        update: &ComponentUpdate,
        component: RenderId,
        parent: ElementId,
    ) -> Result<()> {
        if !self.peers.contains_key(&component) {
            self.load_peer(app, component)?;
        }
        if let Some(slot) = self.peers.get_mut(&component) {
            slot.disposed = false;
        }
        self.with_peer(app, component, |peer, cx| peer.render_add(cx, update, parent))
    }

    /// True if `component`'s peer is live and can take focus.
    pub(crate) fn is_focusable(&self, component: RenderId) -> bool {
        self.peers.get(&component).is_some_and(|slot| {
            !slot.disposed
                && slot
                    .peer
                    .as_ref()
                    .is_some_and(|peer| peer.focusable().is_some())
        })
    }

    /// Run `f` against `component`'s peer with a context for that component.
    pub(crate) fn with_peer<R>(
        &mut self,
        app: &Application,
        component: RenderId,
        f: impl FnOnce(&mut dyn Peer, &mut RenderContext<'_>) -> Result<R>,
    ) -> Result<R> {
        let slot = self
            .peers
            .get_mut(&component)
            .ok_or(ReconcileError::InvalidHierarchy {
                component,
                reason: "component has no peer",
            })?;
        let mut peer = slot.peer.take().ok_or(ReconcileError::PeerInUse(component))?;

        let result = {
            let mut cx = RenderContext::new(self, app, component);
            f(peer.as_mut(), &mut cx)
        };

        if let Some(slot) = self.peers.get_mut(&component) {
            slot.peer = Some(peer);
        }
        result
    }

    /// Drop the slots of components that no longer exist.
    pub(crate) fn drop_peers(&mut self, released: &[RenderId]) {
        for component in released {
            self.peers.remove(component);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blank;

    impl Peer for Blank {
        fn render_add(
            &mut self,
            cx: &mut RenderContext<'_>,
            _update: &ComponentUpdate,
            parent: ElementId,
        ) -> Result<()> {
            let element = cx.create_component_element("span")?;
            cx.document_mut().append_child(parent, element)
        }
    }

    struct FailingInit;

    impl Peer for FailingInit {
        fn init(&mut self, cx: &mut RenderContext<'_>) -> Result<()> {
            Err(ReconcileError::unsupported("init", cx.component()))
        }
    }

    fn setup(config: RendererConfig) -> (Application, Renderer) {
        let app = Application::new();
        let mut registry = PeerRegistry::new();
        registry.register("Blank", || Blank);
        registry.register("FailingInit", || FailingInit);
        let renderer = Renderer::new(&app, registry, config).unwrap();
        (app, renderer)
    }

    #[test]
    fn test_host_element_carries_root_marker() {
        let (app, renderer) = setup(RendererConfig::default());
        let host = renderer.document().element_by_id(&app.root().dom_id());
        assert_eq!(host, Some(renderer.host_element()));
    }

    #[test]
    fn test_load_peer_tolerates_second_install() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let blank = app.add(app.root(), "Blank").unwrap();

        renderer.load_peer(&app, blank).unwrap();
        renderer.load_peer(&app, blank).unwrap();
        assert!(renderer.has_peer(blank));
        assert_eq!(renderer.is_disposed(blank), Some(false));
    }

    #[test]
    fn test_load_peer_fail_policy() {
        let config = RendererConfig::new().with_double_install(DoubleInstallPolicy::Fail);
        let (mut app, mut renderer) = setup(config);
        let blank = app.add(app.root(), "Blank").unwrap();

        renderer.load_peer(&app, blank).unwrap();
        assert_eq!(
            renderer.load_peer(&app, blank),
            Err(ReconcileError::PeerAlreadyInstalled(blank))
        );
    }

    #[test]
    fn test_load_peer_unknown_type() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let button = app.add(app.root(), "Button").unwrap();

        let err = renderer.load_peer(&app, button).err();
        assert_eq!(
            err,
            Some(ReconcileError::PeerNotFound {
                component_type: "Button".to_string()
            })
        );
        assert!(!renderer.has_peer(button));
    }

    #[test]
    fn test_failed_init_leaves_no_peer() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let component = app.add(app.root(), "FailingInit").unwrap();

        assert!(renderer.load_peer(&app, component).is_err());
        assert!(!renderer.has_peer(component));
    }

    #[test]
    fn test_render_component_add_loads_and_renders() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let blank = app.add(app.root(), "Blank").unwrap();
        let update = ComponentUpdate::new(app.root());
        let host = renderer.host_element();

        renderer.render_component_add(&app, &update, blank, host).unwrap();

        assert!(renderer.has_peer(blank));
        let element = renderer.document().element_by_id(&blank.dom_id()).unwrap();
        assert_eq!(renderer.document().parent(element), Some(host));
    }

    #[test]
    fn test_unsupported_default_operation() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let component = app.add(app.root(), "FailingInit").unwrap();
        renderer.registry_mut().register("FailingInit", || Blank);
        renderer.load_peer(&app, component).unwrap();

        let update = ComponentUpdate::new(component);
        let err = renderer
            .with_peer(&app, component, |peer, cx| peer.render_update(cx, &update))
            .err();
        assert_eq!(err, Some(ReconcileError::unsupported("render_update", component)));
    }

    #[test]
    fn test_with_peer_reentry_reports_in_use() {
        let (mut app, mut renderer) = setup(RendererConfig::default());
        let blank = app.add(app.root(), "Blank").unwrap();
        renderer.load_peer(&app, blank).unwrap();

        let update = ComponentUpdate::new(app.root());
        let err = renderer
            .with_peer(&app, blank, |_peer, cx| cx.render_component_dispose(&update, blank))
            .err();
        assert_eq!(err, Some(ReconcileError::PeerInUse(blank)));
        assert!(renderer.has_peer(blank));
    }
}
