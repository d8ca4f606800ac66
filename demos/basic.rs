//! Basic reconciliation demo.
//!
//! Builds a small component tree, renders it, patches it and prints the
//! document after each pass.
//!
//! Run with: RUST_LOG=debug cargo run --example basic

use std::collections::HashMap;

use spark_peer::property::color;
use spark_peer::{
    Application, Color, ComponentUpdate, ElementId, Peer, PeerRegistry, ReconcileError, RenderContext,
    RenderId, Renderer, RendererConfig, Result,
};

// =============================================================================
// PEERS
// =============================================================================

/// Vertical container rendering into a `div`.
#[derive(Default)]
struct ColumnPeer {
    element: Option<ElementId>,
    children: HashMap<RenderId, ElementId>,
}

impl ColumnPeer {
    fn element(&self, cx: &RenderContext<'_>) -> Result<ElementId> {
        self.element
            .ok_or_else(|| ReconcileError::ElementNotFound(cx.component().dom_id()))
    }

    fn add_child(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate, child: RenderId) -> Result<()> {
        let element = self.element(cx)?;
        cx.render_component_add(update, child, element)?;
        if let Some(&rendered) = cx.document().children(element).last() {
            self.children.insert(child, rendered);
        }
        Ok(())
    }
}

impl Peer for ColumnPeer {
    fn render_add(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate, parent: ElementId) -> Result<()> {
        let element = cx.create_component_element("div")?;
        cx.document_mut().append_child(parent, element)?;
        self.element = Some(element);
        self.children.clear();
        for child in cx.tree().children(cx.component()).to_vec() {
            self.add_child(cx, update, child)?;
        }
        Ok(())
    }

    fn render_dispose(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
        self.element = None;
        Ok(())
    }

    fn render_update(&mut self, cx: &mut RenderContext<'_>, update: &ComponentUpdate) -> Result<bool> {
        let element = self.element(cx)?;
        for child in update.removed_children() {
            if let Some(rendered) = self.children.remove(child) {
                cx.document_mut().remove_child(element, rendered)?;
            }
        }
        for &child in update.added_children() {
            self.add_child(cx, update, child)?;
        }
        Ok(false)
    }

    fn container_element(&self, cx: &RenderContext<'_>, _child: RenderId) -> Result<ElementId> {
        self.element(cx)
    }
}

/// Text label rendering into a `span`.
#[derive(Default)]
struct LabelPeer {
    element: Option<ElementId>,
}

impl LabelPeer {
    fn paint(cx: &mut RenderContext<'_>, element: ElementId) -> Result<()> {
        let text = cx.property("text").and_then(|p| p.as_text());
        cx.document_mut().set_text(element, text)?;
        color::render_foreground_background(cx, element)
    }
}

impl Peer for LabelPeer {
    fn render_add(&mut self, cx: &mut RenderContext<'_>, _update: &ComponentUpdate, parent: ElementId) -> Result<()> {
        let element = cx.create_component_element("span")?;
        cx.document_mut().append_child(parent, element)?;
        self.element = Some(element);
        Self::paint(cx, element)
    }

    fn render_dispose(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
        self.element = None;
        Ok(())
    }

    fn render_update(&mut self, cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<bool> {
        if let Some(element) = self.element {
            Self::paint(cx, element)?;
        }
        Ok(false)
    }
}

// =============================================================================
// MAIN
// =============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut registry = PeerRegistry::new();
    registry.register("Column", ColumnPeer::default);
    registry.register("Label", LabelPeer::default);

    let mut app = Application::new();
    let mut renderer = Renderer::new(&app, registry, RendererConfig::default())?;
    renderer.on_redraw(|document| {
        tracing::debug!(elements = document.len(), "redraw");
    });

    let root = app.root();
    let column = app.add(root, "Column")?;
    let title = app.add(column, "Label")?;
    app.set_property(title, "text", Some("Hello".into()))?;
    let status = app.add(column, "Label")?;
    app.set_property(status, "text", Some("loading".into()))?;

    renderer.process_updates(&mut app)?;
    println!("{}", renderer.document().markup(renderer.host_element()));

    app.set_property(status, "text", Some("ready".into()))?;
    app.set_property(status, "foreground", Some(Color::GREEN.into()))?;
    app.remove(title)?;
    renderer.process_updates(&mut app)?;
    println!("{}", renderer.document().markup(renderer.host_element()));

    Ok(())
}
