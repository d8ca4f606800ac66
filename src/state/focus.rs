//! Focus Navigator - Keyboard traversal between focusable components.
//!
//! Traversal is a depth-first walk of the component tree starting at the
//! focused component. Each step tries, in order:
//!
//! - descend into the first child (last child when moving backward),
//! - move to the next sibling (previous sibling when moving backward),
//! - ascend to the parent.
//!
//! A descent is skipped right after an ascent into the same component, and
//! every component entered is remembered so no move re-enters it. The first
//! focusable component reached other than the origin is the target. Walking
//! off the top of the tree means there is none.
//!
//! # Example
//!
//! ```ignore
//! // Tab
//! renderer.visit_next(&app, app.root())?;
//! // Shift+Tab
//! renderer.visit_previous(&app, app.root())?;
//! ```

use std::collections::HashSet;

use tracing::trace;

use crate::engine::Renderer;
use crate::error::{ReconcileError, Result};
use crate::tree::{Application, ComponentTree};
use crate::types::RenderId;

// =============================================================================
// DIRECTION
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

impl Direction {
    /// Child entered when descending into `component`.
    fn descend(self, tree: &ComponentTree, component: RenderId) -> Option<RenderId> {
        let count = tree.component_count(component);
        if count == 0 {
            return None;
        }
        match self {
            Direction::Next => tree.component_at(component, 0),
            Direction::Previous => tree.component_at(component, count - 1),
        }
    }

    fn sibling(self, tree: &ComponentTree, component: RenderId) -> Option<RenderId> {
        match self {
            Direction::Next => next_sibling(tree, component),
            Direction::Previous => previous_sibling(tree, component),
        }
    }
}

// =============================================================================
// SIBLINGS
// =============================================================================

/// The sibling after `component`, `None` on the last sibling or at the top.
pub fn next_sibling(tree: &ComponentTree, component: RenderId) -> Option<RenderId> {
    let parent = tree.parent(component)?;
    let index = tree.index_of(parent, component)?;
    tree.component_at(parent, index + 1)
}

/// The sibling before `component`, `None` on the first sibling or at the top.
pub fn previous_sibling(tree: &ComponentTree, component: RenderId) -> Option<RenderId> {
    let parent = tree.parent(component)?;
    let index = tree.index_of(parent, component)?;
    index.checked_sub(1).and_then(|i| tree.component_at(parent, i))
}

// =============================================================================
// TRAVERSAL
// =============================================================================

/// Next focus target after `origin` in forward (Tab) order.
pub fn find_next(
    tree: &ComponentTree,
    origin: RenderId,
    is_focusable: impl Fn(RenderId) -> bool,
) -> Option<RenderId> {
    walk(tree, origin, Direction::Next, is_focusable)
}

/// Next focus target before `origin` in backward (Shift+Tab) order.
///
/// The walk never descends into `origin` itself.
pub fn find_previous(
    tree: &ComponentTree,
    origin: RenderId,
    is_focusable: impl Fn(RenderId) -> bool,
) -> Option<RenderId> {
    walk(tree, origin, Direction::Previous, is_focusable)
}

fn walk(
    tree: &ComponentTree,
    origin: RenderId,
    direction: Direction,
    is_focusable: impl Fn(RenderId) -> bool,
) -> Option<RenderId> {
    let mut visited: HashSet<RenderId> = HashSet::new();
    let mut component = origin;
    let mut last: Option<RenderId> = None;

    loop {
        let ascended = last.is_some_and(|l| tree.parent(l) == Some(component));
        let on_origin = direction == Direction::Previous && component == origin;

        let mut next = None;
        if !ascended && !on_origin {
            next = direction
                .descend(tree, component)
                .filter(|child| !visited.contains(child));
        }
        if next.is_none() {
            next = direction
                .sibling(tree, component)
                .filter(|sibling| !visited.contains(sibling));
        }
        if next.is_none() {
            next = tree.parent(component);
        }

        let next = next?;
        last = Some(component);
        component = next;
        visited.insert(component);

        if component != origin && is_focusable(component) {
            return Some(component);
        }
    }
}

// =============================================================================
// RENDERER INTEGRATION
// =============================================================================

impl Renderer {
    /// Move focus forward from the focused component (or `container` when
    /// nothing is focused). Returns `false` when there is no target.
    pub fn visit_next(&mut self, app: &Application, container: RenderId) -> Result<bool> {
        self.visit_focus(app, container, Direction::Next)
    }

    /// Move focus backward from the focused component (or `container` when
    /// nothing is focused). Returns `false` when there is no target.
    pub fn visit_previous(&mut self, app: &Application, container: RenderId) -> Result<bool> {
        self.visit_focus(app, container, Direction::Previous)
    }

    fn visit_focus(&mut self, app: &Application, container: RenderId, direction: Direction) -> Result<bool> {
        let origin = app.focused_component().unwrap_or(container);
        let target = walk(app.tree(), origin, direction, |c| self.is_focusable(c));
        let Some(target) = target else {
            return Ok(false);
        };

        trace!(from = %origin, to = %target, "focus move");
        self.with_peer(app, target, |peer, cx| {
            let focusable = peer
                .focusable()
                .ok_or(ReconcileError::unsupported("focus", cx.component()))?;
            focusable.focus(cx)
        })?;
        app.set_focused_component(Some(target));
        Ok(true)
    }
}

// =============================================================================
// TESTS
// =============================================================================
