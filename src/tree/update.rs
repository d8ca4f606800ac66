//! Update records - Pending changes between two reconciliation passes.
//!
//! The `UpdateManager` watches tree mutations and folds them into at most one
//! `ComponentUpdate` per parent component. The renderer consumes the whole
//! queue in one pass and then purges it.

use crate::types::RenderId;

use super::component::ComponentTree;

// =============================================================================
// Component Update
// =============================================================================

/// Pending changes beneath one parent component.
///
/// The record's existence is itself the "something changed under this
/// parent" signal, even when every list is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentUpdate {
    parent: RenderId,
    added_children: Vec<RenderId>,
    removed_children: Vec<RenderId>,
    removed_descendants: Vec<RenderId>,
    updated_properties: Vec<String>,
}

impl ComponentUpdate {
    pub fn new(parent: RenderId) -> Self {
        Self {
            parent,
            added_children: Vec::new(),
            removed_children: Vec::new(),
            removed_descendants: Vec::new(),
            updated_properties: Vec::new(),
        }
    }

    /// The component this record describes.
    pub fn parent(&self) -> RenderId {
        self.parent
    }

    /// Children attached to the parent in this batch.
    pub fn added_children(&self) -> &[RenderId] {
        &self.added_children
    }

    /// Previously rendered direct children detached in this batch.
    pub fn removed_children(&self) -> &[RenderId] {
        &self.removed_children
    }

    /// Previously rendered components removed from inside a subtree that was
    /// itself removed from this parent.
    pub fn removed_descendants(&self) -> &[RenderId] {
        &self.removed_descendants
    }

    /// Names of properties changed on the parent in this batch.
    pub fn updated_properties(&self) -> &[String] {
        &self.updated_properties
    }

    pub fn has_added_children(&self) -> bool {
        !self.added_children.is_empty()
    }

    pub fn has_removed_children(&self) -> bool {
        !self.removed_children.is_empty()
    }

    pub fn has_updated_properties(&self) -> bool {
        !self.updated_properties.is_empty()
    }

    pub fn is_property_updated(&self, name: &str) -> bool {
        self.updated_properties.iter().any(|p| p == name)
    }

    // Builders for records that come from outside an `UpdateManager`, e.g.
    // decoded from a server message.

    pub fn with_added_child(mut self, child: RenderId) -> Self {
        self.add_child(child);
        self
    }

    pub fn with_removed_child(mut self, child: RenderId) -> Self {
        self.remove_child(child);
        self
    }

    pub fn with_removed_descendant(mut self, descendant: RenderId) -> Self {
        if !self.removed_descendants.contains(&descendant) {
            self.removed_descendants.push(descendant);
        }
        self
    }

    pub fn with_updated_property(mut self, name: &str) -> Self {
        self.update_property(name);
        self
    }

    fn add_child(&mut self, child: RenderId) {
        if !self.added_children.contains(&child) {
            self.added_children.push(child);
        }
    }

    fn remove_child(&mut self, child: RenderId) {
        if let Some(pos) = self.added_children.iter().position(|&c| c == child) {
            // Added in this batch: it was never rendered under this parent.
            self.added_children.remove(pos);
            return;
        }
        if !self.removed_children.contains(&child) {
            self.removed_children.push(child);
        }
    }

    fn update_property(&mut self, name: &str) {
        if !self.is_property_updated(name) {
            self.updated_properties.push(name.to_string());
        }
    }
}

// =============================================================================
// Update Source
// =============================================================================

/// Supplier of one reconciliation pass worth of update records.
pub trait UpdateSource {
    /// True if at least one record is pending.
    fn has_updates(&self) -> bool;

    /// The pending records, in no particular order.
    fn updates(&self) -> Vec<ComponentUpdate>;

    /// Drop every pending record.
    fn purge(&mut self);
}

// =============================================================================
// Update Manager
// =============================================================================

/// Folds tree mutations into per-parent update records.
#[derive(Debug, Default)]
pub struct UpdateManager {
    updates: Vec<ComponentUpdate>,
}

impl UpdateManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending record for `parent`, if any.
    pub fn update_for(&self, parent: RenderId) -> Option<&ComponentUpdate> {
        self.updates.iter().find(|u| u.parent == parent)
    }

    fn update_for_mut(&mut self, parent: RenderId) -> &mut ComponentUpdate {
        let pos = match self.updates.iter().position(|u| u.parent == parent) {
            Some(pos) => pos,
            None => {
                self.updates.push(ComponentUpdate::new(parent));
                self.updates.len() - 1
            }
        };
        &mut self.updates[pos]
    }

    /// True if `id`, or one of its ancestors, is attached in this batch.
    ///
    /// Such components are rendered in full by the pending add, so changes
    /// beneath them need no record of their own.
    fn is_being_added(&self, tree: &ComponentTree, id: RenderId) -> bool {
        std::iter::once(id)
            .chain(tree.ancestors(id))
            .any(|c| self.updates.iter().any(|u| u.added_children.contains(&c)))
    }

    /// Record that `child` was attached under `parent`.
    ///
    /// Call after the tree mutation.
    pub fn record_add(&mut self, tree: &ComponentTree, parent: RenderId, child: RenderId) {
        if !tree.is_attached(parent) || self.is_being_added(tree, parent) {
            return;
        }
        self.update_for_mut(parent).add_child(child);
    }

    /// Record that `child` was detached from `parent`.
    ///
    /// Call after the tree mutation. Pending records for the removed subtree
    /// are dissolved into `parent`'s removed descendants.
    pub fn record_remove(&mut self, tree: &ComponentTree, parent: RenderId, child: RenderId) {
        if !tree.is_attached(parent) || self.is_being_added(tree, parent) {
            return;
        }

        let (inner, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.updates)
            .into_iter()
            .partition(|u| u.parent == child || tree.is_ancestor_of(child, u.parent));
        self.updates = kept;

        let update = self.update_for_mut(parent);
        update.remove_child(child);
        for dissolved in inner {
            for id in dissolved
                .removed_children
                .into_iter()
                .chain(dissolved.removed_descendants)
            {
                if !update.removed_descendants.contains(&id) {
                    update.removed_descendants.push(id);
                }
            }
        }
    }

    /// Record that property `name` changed on `component`.
    pub fn record_property(&mut self, tree: &ComponentTree, component: RenderId, name: &str) {
        if !tree.is_attached(component) || self.is_being_added(tree, component) {
            return;
        }
        self.update_for_mut(component).update_property(name);
    }
}

impl UpdateSource for UpdateManager {
    fn has_updates(&self) -> bool {
        !self.updates.is_empty()
    }

    fn updates(&self) -> Vec<ComponentUpdate> {
        self.updates.clone()
    }

    fn purge(&mut self) {
        self.updates.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attach(tree: &mut ComponentTree, manager: &mut UpdateManager, parent: RenderId, kind: &str) -> RenderId {
        let id = tree.create(kind);
        tree.insert(parent, usize::MAX, id).unwrap();
        manager.record_add(tree, parent, id);
        id
    }

    fn detach(tree: &mut ComponentTree, manager: &mut UpdateManager, child: RenderId) {
        let parent = tree.parent(child).unwrap();
        tree.remove(child).unwrap();
        manager.record_remove(tree, parent, child);
    }

    #[test]
    fn test_built_record_folds_like_recorded_one() {
        let parent = RenderId::new(1);
        let (a, b, c) = (RenderId::new(2), RenderId::new(3), RenderId::new(4));
        let update = ComponentUpdate::new(parent)
            .with_added_child(a)
            .with_added_child(a)
            .with_removed_child(a)
            .with_removed_child(b)
            .with_removed_descendant(c)
            .with_updated_property("text")
            .with_updated_property("text");

        assert!(update.added_children().is_empty());
        assert_eq!(update.removed_children(), &[b]);
        assert_eq!(update.removed_descendants(), &[c]);
        assert_eq!(update.updated_properties(), &["text".to_string()]);
    }

    #[test]
    fn test_add_records_on_parent() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Column");

        assert!(manager.has_updates());
        let update = manager.update_for(root).unwrap();
        assert_eq!(update.added_children(), &[a]);
    }

    #[test]
    fn test_changes_beneath_added_component_are_folded() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Column");
        let b = attach(&mut tree, &mut manager, a, "Label");
        manager.record_property(&tree, b, "text");

        assert_eq!(manager.updates().len(), 1);
        assert!(manager.update_for(a).is_none());
    }

    #[test]
    fn test_add_then_remove_cancels() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Column");
        detach(&mut tree, &mut manager, a);

        let update = manager.update_for(root).unwrap();
        assert!(!update.has_added_children());
        assert!(!update.has_removed_children());
    }

    #[test]
    fn test_remove_dissolves_descendant_records() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Column");
        let b = attach(&mut tree, &mut manager, a, "Column");
        let c = attach(&mut tree, &mut manager, b, "Label");
        manager.purge();

        // c removed from b, then b's whole subtree removed from root
        detach(&mut tree, &mut manager, c);
        manager.record_property(&tree, b, "background");
        detach(&mut tree, &mut manager, a);

        let updates = manager.updates();
        assert_eq!(updates.len(), 1);
        let update = &updates[0];
        assert_eq!(update.parent(), root);
        assert_eq!(update.removed_children(), &[a]);
        assert_eq!(update.removed_descendants(), &[c]);
    }

    #[test]
    fn test_detached_components_are_not_recorded() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Column");
        manager.purge();
        detach(&mut tree, &mut manager, a);
        manager.purge();

        manager.record_property(&tree, a, "text");
        assert!(!manager.has_updates());
    }

    #[test]
    fn test_property_names_deduplicated() {
        let mut tree = ComponentTree::new();
        let mut manager = UpdateManager::new();
        let root = tree.root();
        let a = attach(&mut tree, &mut manager, root, "Label");
        manager.purge();

        manager.record_property(&tree, a, "text");
        manager.record_property(&tree, a, "text");
        let update = manager.update_for(a).unwrap();
        assert_eq!(update.updated_properties(), &["text".to_string()]);
        assert!(update.is_property_updated("text"));
    }
}
