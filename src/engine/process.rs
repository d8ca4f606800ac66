//! Update Processor - One reconciliation pass over the pending updates.
//!
//! A pass runs in three phases over the records sorted by parent depth:
//!
//! 1. Bootstrap the Root peer if a record targets a root that has none.
//! 2. Dispose removed components, deepest records first.
//! 3. Render updates, shallowest records first. A full re-render of a parent
//!    makes every later record beneath it redundant, so those are dropped.
//!
//! Then the queue is purged, detached subtrees are released along with their
//! peers, and the redraw hooks run.

use tracing::{debug, trace};

use crate::error::{ReconcileError, Result};
use crate::tree::{Application, ComponentTree, ComponentUpdate, UpdateSource};
use crate::types::{ROOT_TYPE, RenderId};

use super::renderer::Renderer;

/// An update record with its parent's depth, computed once per pass.
struct Pending {
    depth: usize,
    update: ComponentUpdate,
}

impl Pending {
    fn parent(&self) -> RenderId {
        self.update.parent()
    }

    /// True if this record's parent lies strictly beneath `ancestor`.
    fn descends_from(&self, tree: &ComponentTree, ancestor: &Pending) -> bool {
        if self.depth <= ancestor.depth {
            return false;
        }
        let mut current = self.parent();
        for _ in 0..self.depth - ancestor.depth {
            match tree.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        current == ancestor.parent()
    }
}

impl Renderer {
    /// Reconcile the document with every update recorded since the last pass.
    ///
    /// Any failure aborts the pass and leaves the pending updates in place.
    pub fn process_updates(&mut self, app: &mut Application) -> Result<()> {
        let mut updates = app.take_updates();
        let processed = self.process_source(app, &mut updates);
        app.restore_updates(updates);

        if processed? {
            let released = app.release_detached();
            self.drop_peers(&released);
        }
        Ok(())
    }

    /// Run one pass over the records of `source` against `app`'s tree.
    ///
    /// Records may come in any order. The source is purged and the redraw
    /// hooks run only if the pass completes. Returns `false` when the source
    /// had nothing pending. Detached subtrees are left to the application.
    pub fn process_source<S>(&mut self, app: &Application, source: &mut S) -> Result<bool>
    where
        S: UpdateSource + ?Sized,
    {
        if !source.has_updates() {
            return Ok(false);
        }

        self.run_pass(app, source.updates())?;

        source.purge();
        self.run_redraw_hooks();
        Ok(true)
    }

    fn run_pass(&mut self, app: &Application, updates: Vec<ComponentUpdate>) -> Result<()> {
        let tree = app.tree();
        let mut pending: Vec<Pending> = updates
            .into_iter()
            .map(|update| Pending {
                depth: tree.depth(update.parent()),
                update,
            })
            .collect();
        pending.sort_by_key(|p| p.depth);
        debug!(count = pending.len(), "processing updates");

        for p in &pending {
            let parent = p.parent();
            if !self.has_peer(parent) && tree.component_type(parent) == Some(ROOT_TYPE) {
                self.load_peer(app, parent)?;
            }
        }

        for p in pending.iter().rev() {
            for &descendant in p.update.removed_descendants() {
                self.dispose_tree(app, &p.update, descendant, false)?;
            }
            for &child in p.update.removed_children() {
                self.dispose_tree(app, &p.update, child, true)?;
            }
        }

        let mut pending: Vec<Option<Pending>> = pending.into_iter().map(Some).collect();
        for i in 0..pending.len() {
            let Some(current) = pending[i].take() else {
                continue;
            };
            let parent = current.parent();
            let slot = self
                .peers
                .get_mut(&parent)
                .ok_or(ReconcileError::InvalidHierarchy {
                    component: parent,
                    reason: "update parent has no peer",
                })?;
            slot.disposed = false;

            let full_render =
                self.with_peer(app, parent, |peer, cx| peer.render_update(cx, &current.update))?;
            // A peer that disposed itself to re-render is live again.
            if let Some(slot) = self.peers.get_mut(&parent) {
                slot.disposed = false;
            }
            if !full_render {
                continue;
            }
            for later in pending[i + 1..].iter_mut() {
                if later.as_ref().is_some_and(|p| p.descends_from(tree, &current)) {
                    trace!(component = %parent, "dropping update below full render");
                    *later = None;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::config::RendererConfig;
    use crate::dom::ElementId;
    use crate::engine::{Peer, PeerRegistry, RenderContext};

    #[derive(Default)]
    struct Counter {
        updates: Rc<RefCell<usize>>,
    }

    impl Peer for Counter {
        fn render_add(
            &mut self,
            cx: &mut RenderContext<'_>,
            _update: &ComponentUpdate,
            parent: ElementId,
        ) -> Result<()> {
            let element = cx.create_component_element("div")?;
            cx.document_mut().append_child(parent, element)
        }

        fn render_dispose(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<()> {
            Ok(())
        }

        fn render_update(&mut self, _cx: &mut RenderContext<'_>, _update: &ComponentUpdate) -> Result<bool> {
            *self.updates.borrow_mut() += 1;
            Ok(false)
        }
    }

    fn renderer(app: &Application, updates: Rc<RefCell<usize>>) -> Renderer {
        let mut registry = PeerRegistry::new();
        registry.register("Counter", move || Counter {
            updates: updates.clone(),
        });
        Renderer::new(app, registry, RendererConfig::default()).unwrap()
    }

    #[test]
    fn test_no_updates_is_noop() {
        let mut app = Application::new();
        let mut renderer = renderer(&app, Rc::default());

        renderer.process_updates(&mut app).unwrap();
        assert_eq!(renderer.peer_count(), 0);
    }

    #[test]
    fn test_root_bootstrapped_on_first_pass() {
        let mut app = Application::new();
        let counter = app.add(app.root(), "Counter").unwrap();
        let mut renderer = renderer(&app, Rc::default());

        renderer.process_updates(&mut app).unwrap();

        assert!(renderer.has_peer(app.root()));
        assert!(renderer.has_peer(counter));
        assert!(!app.update_manager().has_updates());
    }

    #[test]
    fn test_update_without_peer_is_invalid_hierarchy() {
        let mut app = Application::new();
        let counter = app.add(app.root(), "Counter").unwrap();
        let mut renderer = renderer(&app, Rc::default());
        renderer.process_updates(&mut app).unwrap();

        let orphan = app.create("Counter");
        app.insert(counter, 0, orphan).unwrap();
        let nested = app.add(orphan, "Counter").unwrap();
        app.update_manager_mut().purge();
        app.set_property(nested, "text", None).unwrap();

        let err = renderer.process_updates(&mut app).err();
        assert_eq!(
            err,
            Some(ReconcileError::InvalidHierarchy {
                component: nested,
                reason: "update parent has no peer",
            })
        );
        assert!(app.update_manager().has_updates());
    }

    #[test]
    fn test_in_place_update_reaches_peer() {
        let updates = Rc::new(RefCell::new(0));
        let mut app = Application::new();
        let counter = app.add(app.root(), "Counter").unwrap();
        let mut renderer = renderer(&app, updates.clone());
        renderer.process_updates(&mut app).unwrap();

        app.set_property(counter, "text", Some("hi".into())).unwrap();
        renderer.process_updates(&mut app).unwrap();
        assert_eq!(*updates.borrow(), 1);
    }

    #[test]
    fn test_descends_from_uses_cached_depth() {
        let mut tree = ComponentTree::new();
        let a = tree.create("A");
        tree.insert(tree.root(), 0, a).unwrap();
        let b = tree.create("B");
        tree.insert(a, 0, b).unwrap();
        let c = tree.create("C");
        tree.insert(tree.root(), 1, c).unwrap();

        let pending = |id| Pending {
            depth: tree.depth(id),
            update: ComponentUpdate::new(id),
        };
        assert!(pending(b).descends_from(&tree, &pending(a)));
        assert!(pending(b).descends_from(&tree, &pending(tree.root())));
        assert!(!pending(b).descends_from(&tree, &pending(c)));
        assert!(!pending(a).descends_from(&tree, &pending(a)));
    }
}
