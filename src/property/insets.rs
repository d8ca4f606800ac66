//! Insets rendering.

use std::fmt;

use crate::config::UnitMetrics;
use crate::dom::{Document, ElementId};
use crate::engine::RenderContext;
use crate::error::Result;
use crate::types::Insets;

use super::extent;

/// Insets resolved to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PixelInsets {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl fmt::Display for PixelInsets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px {}px {}px {}px", self.top, self.right, self.bottom, self.left)
    }
}

/// Top and bottom convert vertically, left and right horizontally.
pub fn to_pixels(insets: &Insets, metrics: &UnitMetrics) -> PixelInsets {
    PixelInsets {
        top: extent::to_pixels(Some(&insets.top), false, metrics),
        right: extent::to_pixels(Some(&insets.right), true, metrics),
        bottom: extent::to_pixels(Some(&insets.bottom), false, metrics),
        left: extent::to_pixels(Some(&insets.left), true, metrics),
    }
}

/// Write `insets` to `style_attr` as pixel shorthand, or clear it.
pub fn render_pixel(
    insets: Option<&Insets>,
    metrics: &UnitMetrics,
    document: &mut Document,
    element: ElementId,
    style_attr: &str,
) -> Result<()> {
    let value = insets
        .map(|insets| to_pixels(insets, metrics).to_string())
        .unwrap_or_default();
    document.style_mut(element)?.set(style_attr, value);
    Ok(())
}

/// Render the running component's `name` property (or `default`) to `style_attr`.
pub fn render_component_property(
    cx: &mut RenderContext<'_>,
    name: &str,
    default: Option<&Insets>,
    element: ElementId,
    style_attr: &str,
) -> Result<()> {
    let insets = cx
        .property(name)
        .and_then(|p| p.as_insets())
        .or_else(|| default.copied());
    let metrics = cx.metrics();
    render_pixel(insets.as_ref(), &metrics, cx.document_mut(), element, style_attr)
}
