//! Application - The abstract component tree plus its pending updates.
//!
//! All structural and property mutations go through the application so the
//! update manager sees every one of them. The focused component lives in a
//! signal so effects can react to focus moves.

use spark_signals::{signal, Signal};

use crate::error::Result;
use crate::types::{Property, RenderId};

use super::component::ComponentTree;
use super::update::UpdateManager;

/// Component tree, update queue and focus state of one application.
pub struct Application {
    tree: ComponentTree,
    updates: UpdateManager,
    focused: Signal<Option<RenderId>>,
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

impl Application {
    pub fn new() -> Self {
        Self {
            tree: ComponentTree::new(),
            updates: UpdateManager::new(),
            focused: signal(None),
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn root(&self) -> RenderId {
        self.tree.root()
    }

    pub fn update_manager(&self) -> &UpdateManager {
        &self.updates
    }

    pub fn update_manager_mut(&mut self) -> &mut UpdateManager {
        &mut self.updates
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Create a component of `component_type` and append it to `parent`.
    pub fn add(&mut self, parent: RenderId, component_type: impl Into<String>) -> Result<RenderId> {
        let child = self.tree.create(component_type);
        self.insert(parent, usize::MAX, child)?;
        Ok(child)
    }

    /// Attach an existing unparented component at `index` beneath `parent`.
    pub fn insert(&mut self, parent: RenderId, index: usize, child: RenderId) -> Result<()> {
        self.tree.insert(parent, index, child)?;
        self.updates.record_add(&self.tree, parent, child);
        Ok(())
    }

    /// Create an unattached component, e.g. to fill in properties before
    /// inserting it.
    pub fn create(&mut self, component_type: impl Into<String>) -> RenderId {
        self.tree.create(component_type)
    }

    /// Detach `child` from its parent.
    ///
    /// The detached subtree can be re-inserted until the next update pass
    /// completes, after which it is released.
    pub fn remove(&mut self, child: RenderId) -> Result<()> {
        let parent = self.tree.parent(child);
        self.tree.remove(child)?;
        if let Some(parent) = parent {
            self.updates.record_remove(&self.tree, parent, child);
        }
        if self.focused_component().is_some_and(|f| f == child || self.tree.is_ancestor_of(child, f)) {
            self.focused.set(None);
        }
        Ok(())
    }

    /// Set (or clear) a named property on `component`.
    pub fn set_property(
        &mut self,
        component: RenderId,
        name: &str,
        value: Option<Property>,
    ) -> Result<()> {
        self.tree.set_property(component, name, value)?;
        self.updates.record_property(&self.tree, component, name);
        Ok(())
    }

    /// Free subtrees detached during the last pass. Returns released ids.
    pub(crate) fn release_detached(&mut self) -> Vec<RenderId> {
        self.tree.release_detached()
    }

    /// Move the update queue out for the length of a pass.
    pub(crate) fn take_updates(&mut self) -> UpdateManager {
        std::mem::take(&mut self.updates)
    }

    pub(crate) fn restore_updates(&mut self, updates: UpdateManager) {
        self.updates = updates;
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// The component that currently holds keyboard focus.
    pub fn focused_component(&self) -> Option<RenderId> {
        self.focused.get()
    }

    pub fn set_focused_component(&self, component: Option<RenderId>) {
        self.focused.set(component);
    }

    /// Signal tracking the focused component, for reactive observers.
    pub fn focused_signal(&self) -> Signal<Option<RenderId>> {
        self.focused.clone()
    }
}
