//! Document - The live visual element tree peers render into.
//!
//! Elements live in slots addressed by `ElementId`. Freed slots go to a pool
//! and are reused under a new generation, so a handle kept past its element's
//! removal never reaches the slot's next occupant. An element's identity marker (`id`) ties it to the
//! component that rendered it; `element_by_id` only finds elements attached
//! beneath the body.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{ReconcileError, Result};

// =============================================================================
// Element
// =============================================================================

/// Handle to an element slot, valid for one occupancy of that slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    index: usize,
    generation: u32,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element#{}.{}", self.index, self.generation)
    }
}

/// Style surface of an element. Setting a property to `""` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    properties: BTreeMap<String, String>,
}

impl Style {
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.properties.remove(name);
        } else {
            self.properties.insert(name.to_string(), value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn clear(&mut self, name: &str) {
        self.properties.remove(name);
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Inline style text, properties sorted by name.
    pub fn css_text(&self) -> String {
        self.properties
            .iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// A node of the visual tree.
#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    id: Option<String>,
    text: Option<String>,
    style: Style,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            text: None,
            style: Style::default(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

// =============================================================================
// Document
// =============================================================================

#[derive(Debug)]
struct Slot {
    generation: u32,
    element: Option<Element>,
}

/// Arena-backed element tree with a single `body`.
#[derive(Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<usize>,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                generation: 0,
                element: Some(Element::new("body")),
            }],
            free: Vec::new(),
            body: ElementId {
                index: 0,
                generation: 0,
            },
        }
    }

    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Number of live elements, detached ones included.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.element.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_ref())
    }

    fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.element.as_mut())
            .ok_or_else(|| ReconcileError::ElementNotFound(id.to_string()))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        let element = Some(Element::new(tag));
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.element = element;
            return ElementId {
                index,
                generation: slot.generation,
            };
        }
        self.slots.push(Slot {
            generation: 0,
            element,
        });
        ElementId {
            index: self.slots.len() - 1,
            generation: 0,
        }
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.element(id).map(Element::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.element(id).and_then(Element::parent)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `before` (or last, with `None`).
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        before: Option<ElementId>,
    ) -> Result<()> {
        self.element_mut(parent)?;
        let mut cursor = Some(parent);
        while let Some(current) = cursor {
            if current == child {
                return Err(ReconcileError::ElementCycle { parent, child });
            }
            cursor = self.parent(current);
        }
        self.detach(child)?;
        let node = self.element_mut(parent)?;
        let index = before
            .and_then(|b| node.children.iter().position(|&c| c == b))
            .unwrap_or(node.children.len());
        node.children.insert(index, child);
        self.element_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn detach(&mut self, child: ElementId) -> Result<()> {
        let old_parent = self.element_mut(child)?.parent.take();
        if let Some(old_parent) = old_parent {
            self.element_mut(old_parent)?.children.retain(|&c| c != child);
        }
        Ok(())
    }

    /// Remove `child` from `parent` and free its whole subtree.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if self.parent(child) != Some(parent) {
            return Err(ReconcileError::ElementNotFound(format!("{child} in {parent}")));
        }
        self.detach(child)?;
        self.free_subtree(child);
        Ok(())
    }

    /// Remove and free every child of `parent`.
    pub fn remove_all_children(&mut self, parent: ElementId) -> Result<()> {
        let children = std::mem::take(&mut self.element_mut(parent)?.children);
        for child in children {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn free_subtree(&mut self, id: ElementId) {
        let Some(slot) = self.slots.get_mut(id.index) else { return };
        if slot.generation != id.generation {
            return;
        }
        let Some(element) = slot.element.take() else { return };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        for child in element.children {
            self.free_subtree(child);
        }
    }

    // =========================================================================
    // Identity Markers
    // =========================================================================

    pub fn set_id(&mut self, element: ElementId, id: Option<&str>) -> Result<()> {
        self.element_mut(element)?.id = id.map(str::to_string);
        Ok(())
    }

    /// Find the attached element carrying identity marker `id`.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let mut stack = vec![self.body];
        while let Some(current) = stack.pop() {
            let Some(element) = self.element(current) else { continue };
            if element.id.as_deref() == Some(id) {
                return Some(current);
            }
            stack.extend(element.children.iter().rev());
        }
        None
    }

    /// Clear the identity marker of `element` and every element beneath it.
    pub fn strip_ids(&mut self, element: ElementId) {
        let mut stack = vec![element];
        while let Some(current) = stack.pop() {
            let Ok(node) = self.element_mut(current) else { continue };
            node.id = None;
            stack.extend(node.children.iter().copied());
        }
    }

    // =========================================================================
    // Content
    // =========================================================================

    pub fn set_text(&mut self, element: ElementId, text: Option<&str>) -> Result<()> {
        self.element_mut(element)?.text = text.map(str::to_string);
        Ok(())
    }

    pub fn style(&self, element: ElementId) -> Option<&Style> {
        self.element(element).map(Element::style)
    }

    pub fn style_mut(&mut self, element: ElementId) -> Result<&mut Style> {
        Ok(&mut self.element_mut(element)?.style)
    }

    /// Serialize `element` and its subtree as markup.
    pub fn markup(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_markup(element, &mut out);
        out
    }

    fn write_markup(&self, element: ElementId, out: &mut String) {
        let Some(node) = self.element(element) else { return };
        out.push('<');
        out.push_str(&node.tag);
        if let Some(id) = &node.id {
            out.push_str(&format!(" id=\"{id}\""));
        }
        if !node.style.is_empty() {
            out.push_str(&format!(" style=\"{}\"", node.style.css_text()));
        }
        out.push('>');
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        for &child in &node.children {
            self.write_markup(child, out);
        }
        out.push_str(&format!("</{}>", node.tag));
    }
}

// =============================================================================
// Tests
// =============================================================================
