//! Fill image rendering.

use crate::config::RendererConfig;
use crate::dom::{Document, ElementId};
use crate::engine::RenderContext;
use crate::error::Result;
use crate::types::{Extent, FillImage};

bitflags::bitflags! {
    /// Options for rendering a fill image.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FillImageFlags: u8 {
        /// Use the alpha-loader filter when the host requires it.
        const ENABLE_ALPHA_FILTER = 1 << 0;
    }
}

/// Apply `fill_image` as the element's background.
///
/// Does nothing when there is no image. Repeat and position are only written
/// when set; a missing offset on one axis renders as `0`.
pub fn render(
    fill_image: Option<&FillImage>,
    document: &mut Document,
    element: ElementId,
    flags: FillImageFlags,
    config: &RendererConfig,
) -> Result<()> {
    let Some(fill_image) = fill_image else {
        return Ok(());
    };
    let Some(image) = &fill_image.image else {
        return Ok(());
    };

    let style = document.style_mut(element)?;
    if config.alpha_filter_required && flags.contains(FillImageFlags::ENABLE_ALPHA_FILTER) {
        style.set(
            "filter",
            format!(
                "progid:DXImageTransform.Microsoft.AlphaImageLoader(src='{}', sizingMethod='scale')",
                image.url
            ),
        );
    } else {
        style.set("background-image", format!("url({})", image.url));
    }

    if let Some(repeat) = fill_image.repeat {
        style.set("background-repeat", repeat.keyword());
    }

    if fill_image.x.is_some() || fill_image.y.is_some() {
        style.set(
            "background-position",
            format!("{} {}", offset(fill_image.x), offset(fill_image.y)),
        );
    }
    Ok(())
}

fn offset(extent: Option<Extent>) -> String {
    extent.map_or_else(|| "0".to_string(), |e| e.to_string())
}

/// Render the running component's `name` property (or `default`) as the background.
pub fn render_component_property(
    cx: &mut RenderContext<'_>,
    name: &str,
    default: Option<&FillImage>,
    element: ElementId,
    flags: FillImageFlags,
) -> Result<()> {
    let fill_image = cx.property(name).and_then(|p| p.as_fill_image()).or(default);
    let config = cx.config().clone();
    render(fill_image, cx.document_mut(), element, flags, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FillRepeat, ImageRef};

    fn setup() -> (Document, ElementId) {
        let mut document = Document::new();
        let element = document.create_element("div");
        (document, element)
    }

    #[test]
    fn test_background_image() {
        let (mut document, element) = setup();
        let mut fill = FillImage::new(ImageRef::new("tile.png"));
        fill.repeat = Some(FillRepeat::RepeatX);
        fill.x = Some(Extent::px(10.0));

        render(Some(&fill), &mut document, element, FillImageFlags::empty(), &RendererConfig::default())
            .unwrap();

        let style = document.style(element).unwrap();
        assert_eq!(style.get("background-image"), Some("url(tile.png)"));
        assert_eq!(style.get("background-repeat"), Some("repeat-x"));
        assert_eq!(style.get("background-position"), Some("10px 0"));
    }

    #[test]
    fn test_alpha_filter_needs_flag_and_host() {
        let fill = FillImage::new(ImageRef::new("glass.png"));
        let host = RendererConfig::new().with_alpha_filter_required(true);

        let (mut document, element) = setup();
        render(Some(&fill), &mut document, element, FillImageFlags::ENABLE_ALPHA_FILTER, &host).unwrap();
        let style = document.style(element).unwrap();
        assert_eq!(
            style.get("filter"),
            Some("progid:DXImageTransform.Microsoft.AlphaImageLoader(src='glass.png', sizingMethod='scale')")
        );
        assert_eq!(style.get("background-image"), None);

        let (mut document, element) = setup();
        render(Some(&fill), &mut document, element, FillImageFlags::empty(), &host).unwrap();
        assert_eq!(
            document.style(element).and_then(|s| s.get("background-image")),
            Some("url(glass.png)")
        );

        let (mut document, element) = setup();
        let plain = RendererConfig::default();
        render(Some(&fill), &mut document, element, FillImageFlags::ENABLE_ALPHA_FILTER, &plain).unwrap();
        assert_eq!(document.style(element).and_then(|s| s.get("filter")), None);
    }

    #[test]
    fn test_no_image_leaves_element_alone() {
        let (mut document, element) = setup();
        document.style_mut(element).unwrap().set("background-image", "url(old.png)");

        render(None, &mut document, element, FillImageFlags::empty(), &RendererConfig::default()).unwrap();
        render(
            Some(&FillImage::default()),
            &mut document,
            element,
            FillImageFlags::empty(),
            &RendererConfig::default(),
        )
        .unwrap();
        assert_eq!(
            document.style(element).and_then(|s| s.get("background-image")),
            Some("url(old.png)")
        );
    }
}
