//! Border rendering.

use crate::config::UnitMetrics;
use crate::dom::{Document, ElementId};
use crate::engine::RenderContext;
use crate::error::Result;
use crate::types::Border;

use super::extent;

/// Border shorthand, e.g. `"2px solid #ff0000"`. The color is omitted when unset.
pub fn to_style(border: &Border, metrics: &UnitMetrics) -> String {
    let size = extent::to_pixels(Some(&border.size), false, metrics);
    match border.color {
        Some(color) => format!("{size}px {} {}", border.style.keyword(), color.to_hex()),
        None => format!("{size}px {}", border.style.keyword()),
    }
}

/// Write `border` to the element's `border` style, or clear it.
pub fn render(
    border: Option<&Border>,
    metrics: &UnitMetrics,
    document: &mut Document,
    element: ElementId,
) -> Result<()> {
    let value = border.map(|b| to_style(b, metrics)).unwrap_or_default();
    document.style_mut(element)?.set("border", value);
    Ok(())
}

/// Render the running component's `name` property (or `default`) as the border.
pub fn render_component_property(
    cx: &mut RenderContext<'_>,
    name: &str,
    default: Option<&Border>,
    element: ElementId,
) -> Result<()> {
    let border = cx
        .property(name)
        .and_then(|p| p.as_border())
        .or_else(|| default.copied());
    let metrics = cx.metrics();
    render(border.as_ref(), &metrics, cx.document_mut(), element)
}
