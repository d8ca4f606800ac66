//! Component Tree - Arena of abstract application components.
//!
//! Each component has a stable `RenderId`, a type tag, an ordered child list,
//! a parent back-reference and named properties.
//!
//! Removing a child only detaches it. The detached subtree stays in the arena
//! so the disposal cascade can still walk it, and is freed by
//! `release_detached()` once the update pass that observed the removal is done.

use std::collections::HashMap;

use crate::error::{ReconcileError, Result};
use crate::types::{Property, RenderId, ROOT_TYPE};

// =============================================================================
// Component Node
// =============================================================================

/// One node of the abstract UI tree.
#[derive(Debug, Clone)]
pub struct ComponentNode {
    id: RenderId,
    component_type: String,
    parent: Option<RenderId>,
    children: Vec<RenderId>,
    properties: HashMap<String, Property>,
}

impl ComponentNode {
    fn new(id: RenderId, component_type: String) -> Self {
        Self {
            id,
            component_type,
            parent: None,
            children: Vec::new(),
            properties: HashMap::new(),
        }
    }

    pub fn id(&self) -> RenderId {
        self.id
    }

    pub fn component_type(&self) -> &str {
        &self.component_type
    }

    pub fn parent(&self) -> Option<RenderId> {
        self.parent
    }

    pub fn children(&self) -> &[RenderId] {
        &self.children
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }
}

// =============================================================================
// Component Tree
// =============================================================================

/// Arena holding every live or detached-but-unreleased component.
#[derive(Debug)]
pub struct ComponentTree {
    nodes: HashMap<RenderId, ComponentNode>,
    root: RenderId,
    next_id: u64,
    /// Roots of subtrees detached since the last release.
    detached: Vec<RenderId>,
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentTree {
    /// Create a tree holding only the root component (`c_0`).
    pub fn new() -> Self {
        let root = RenderId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, ComponentNode::new(root, ROOT_TYPE.to_string()));
        Self {
            nodes,
            root,
            next_id: 1,
            detached: Vec::new(),
        }
    }

    pub fn root(&self) -> RenderId {
        self.root
    }

    pub fn get(&self, id: RenderId) -> Option<&ComponentNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: RenderId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of components in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn component_type(&self, id: RenderId) -> Option<&str> {
        self.get(id).map(ComponentNode::component_type)
    }

    pub fn parent(&self, id: RenderId) -> Option<RenderId> {
        self.get(id).and_then(ComponentNode::parent)
    }

    /// Children of `id` in order (empty for unknown components).
    pub fn children(&self, id: RenderId) -> &[RenderId] {
        self.get(id).map(ComponentNode::children).unwrap_or(&[])
    }

    pub fn component_count(&self, id: RenderId) -> usize {
        self.children(id).len()
    }

    pub fn component_at(&self, id: RenderId, index: usize) -> Option<RenderId> {
        self.children(id).get(index).copied()
    }

    pub fn index_of(&self, parent: RenderId, child: RenderId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    pub fn property(&self, id: RenderId, name: &str) -> Option<&Property> {
        self.get(id).and_then(|node| node.property(name))
    }

    /// Depth below the top of the component's tree (root = 0).
    pub fn depth(&self, id: RenderId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// True if `ancestor` is a proper ancestor of `descendant`.
    pub fn is_ancestor_of(&self, ancestor: RenderId, descendant: RenderId) -> bool {
        let mut current = self.parent(descendant);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// True if `id` is the root or hangs beneath it.
    pub fn is_attached(&self, id: RenderId) -> bool {
        id == self.root || self.is_ancestor_of(self.root, id)
    }

    /// Iterate from the parent of `id` up to the top of its tree.
    pub fn ancestors(&self, id: RenderId) -> impl Iterator<Item = RenderId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Create an unattached component of the given type.
    pub fn create(&mut self, component_type: impl Into<String>) -> RenderId {
        let id = RenderId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, ComponentNode::new(id, component_type.into()));
        id
    }

    /// Attach `child` under `parent` at `index` (clamped to the child count).
    pub fn insert(&mut self, parent: RenderId, index: usize, child: RenderId) -> Result<()> {
        if !self.contains(parent) {
            return Err(ReconcileError::InvalidHierarchy {
                component: parent,
                reason: "parent is not in the tree",
            });
        }
        let Some(node) = self.nodes.get(&child) else {
            return Err(ReconcileError::InvalidHierarchy {
                component: child,
                reason: "component is not in the tree",
            });
        };
        if node.parent.is_some() || child == self.root {
            return Err(ReconcileError::InvalidHierarchy {
                component: child,
                reason: "component already has a parent",
            });
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(ReconcileError::InvalidHierarchy {
                component: child,
                reason: "component cannot be added beneath itself",
            });
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
        self.detached.retain(|&d| d != child);
        Ok(())
    }

    /// Detach `child` from its parent. Returns the index it occupied.
    pub fn remove(&mut self, child: RenderId) -> Result<usize> {
        let Some(parent) = self.parent(child) else {
            return Err(ReconcileError::InvalidHierarchy {
                component: child,
                reason: "component has no parent",
            });
        };
        let index = self.index_of(parent, child).ok_or(ReconcileError::InvalidHierarchy {
            component: child,
            reason: "component missing from its parent's children",
        })?;

        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.remove(index);
        }
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = None;
        }
        self.detached.push(child);
        Ok(index)
    }

    /// Set (or clear, with `None`) a named property.
    pub fn set_property(
        &mut self,
        id: RenderId,
        name: impl Into<String>,
        value: Option<Property>,
    ) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(ReconcileError::InvalidHierarchy {
            component: id,
            reason: "component is not in the tree",
        })?;
        let name = name.into();
        match value {
            Some(value) => {
                node.properties.insert(name, value);
            }
            None => {
                node.properties.remove(&name);
            }
        }
        Ok(())
    }

    /// Free every detached subtree that has not been re-attached.
    ///
    /// Returns the ids of all released components.
    pub fn release_detached(&mut self) -> Vec<RenderId> {
        let mut released = Vec::new();
        for root in std::mem::take(&mut self.detached) {
            if self.parent(root).is_none() {
                self.release_subtree(root, &mut released);
            }
        }
        released
    }

    fn release_subtree(&mut self, id: RenderId, released: &mut Vec<RenderId>) {
        let Some(node) = self.nodes.remove(&id) else { return };
        for child in node.children {
            self.release_subtree(child, released);
        }
        released.push(id);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (ComponentTree, RenderId, RenderId, RenderId) {
        let mut tree = ComponentTree::new();
        let root = tree.root();
        let a = tree.create("Column");
        let b = tree.create("Label");
        let c = tree.create("Label");
        tree.insert(root, 0, a).unwrap();
        tree.insert(a, 0, b).unwrap();
        tree.insert(a, 1, c).unwrap();
        (tree, a, b, c)
    }

    #[test]
    fn test_root() {
        let tree = ComponentTree::new();
        assert_eq!(tree.component_type(tree.root()), Some(ROOT_TYPE));
        assert_eq!(tree.depth(tree.root()), 0);
        assert_eq!(tree.parent(tree.root()), None);
    }

    #[test]
    fn test_structure_queries() {
        let (tree, a, b, c) = sample();
        assert_eq!(tree.component_count(a), 2);
        assert_eq!(tree.component_at(a, 1), Some(c));
        assert_eq!(tree.component_at(a, 2), None);
        assert_eq!(tree.index_of(a, b), Some(0));
        assert_eq!(tree.depth(c), 2);
        assert!(tree.is_ancestor_of(tree.root(), c));
        assert!(tree.is_ancestor_of(a, b));
        assert!(!tree.is_ancestor_of(b, c));
        assert!(!tree.is_ancestor_of(a, a));
        assert_eq!(tree.ancestors(c).collect::<Vec<_>>(), vec![a, tree.root()]);
        assert!(tree.is_attached(c));
    }

    #[test]
    fn test_ids_never_reused() {
        let (mut tree, a, _, _) = sample();
        tree.remove(a).unwrap();
        tree.release_detached();
        let fresh = tree.create("Label");
        assert!(fresh.raw() > a.raw());
    }

    #[test]
    fn test_insert_rejects_cycles_and_double_parent() {
        let (mut tree, a, b, _) = sample();
        let root = tree.root();
        assert!(tree.insert(root, 0, b).is_err());

        tree.remove(a).unwrap();
        assert!(tree.insert(b, 0, a).is_err());
        assert!(tree.insert(a, 0, a).is_err());
    }

    #[test]
    fn test_remove_detaches_but_keeps_subtree() {
        let (mut tree, a, b, c) = sample();
        assert_eq!(tree.remove(a).unwrap(), 0);
        assert_eq!(tree.parent(a), None);
        assert!(!tree.is_attached(b));
        assert_eq!(tree.children(a), &[b, c]);
        assert_eq!(tree.component_count(tree.root()), 0);

        let mut released = tree.release_detached();
        released.sort();
        assert_eq!(released, vec![a, b, c]);
        assert!(!tree.contains(b));
    }

    #[test]
    fn test_reattached_subtree_is_not_released() {
        let (mut tree, a, b, _) = sample();
        tree.remove(b).unwrap();
        tree.insert(tree.root(), 1, b).unwrap();
        assert!(tree.release_detached().is_empty());
        assert_eq!(tree.parent(b), Some(tree.root()));
        assert_eq!(tree.component_count(a), 1);
    }

    #[test]
    fn test_properties() {
        let (mut tree, a, _, _) = sample();
        tree.set_property(a, "text", Some(Property::from("hi"))).unwrap();
        assert_eq!(tree.property(a, "text"), Some(&Property::from("hi")));
        tree.set_property(a, "text", None).unwrap();
        assert_eq!(tree.property(a, "text"), None);
    }
}
