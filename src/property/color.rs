//! Color rendering.

use crate::dom::{Document, ElementId};
use crate::engine::RenderContext;
use crate::error::Result;
use crate::types::Color;

/// Property name of the text color.
pub const FOREGROUND: &str = "foreground";
/// Property name of the fill color.
pub const BACKGROUND: &str = "background";

/// Write `color` to `style_property`, or clear it.
pub fn render(
    color: Option<Color>,
    document: &mut Document,
    element: ElementId,
    style_property: &str,
) -> Result<()> {
    let value = color.map(Color::to_hex).unwrap_or_default();
    document.style_mut(element)?.set(style_property, value);
    Ok(())
}

/// Render the running component's `name` property (or `default`) to `style_property`.
pub fn render_component_property(
    cx: &mut RenderContext<'_>,
    name: &str,
    default: Option<Color>,
    element: ElementId,
    style_property: &str,
) -> Result<()> {
    let color = cx.property(name).and_then(|p| p.as_color()).or(default);
    render(color, cx.document_mut(), element, style_property)
}

/// Render the running component's foreground and background colors.
pub fn render_foreground_background(cx: &mut RenderContext<'_>, element: ElementId) -> Result<()> {
    render_component_property(cx, FOREGROUND, None, element, "color")?;
    render_component_property(cx, BACKGROUND, None, element, "background-color")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_and_clear() {
        let mut document = Document::new();
        let element = document.create_element("span");

        render(Some(Color::rgb(0, 128, 255)), &mut document, element, "color").unwrap();
        assert_eq!(document.style(element).and_then(|s| s.get("color")), Some("#0080ff"));

        render(None, &mut document, element, "color").unwrap();
        assert!(document.style(element).is_some_and(|s| s.is_empty()));
    }
}
