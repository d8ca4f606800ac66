//! Core value types for spark-peer.
//!
//! Identifiers for components and the abstract style values that peers
//! translate into concrete element styles.

use std::fmt;

// =============================================================================
// Render Identifier
// =============================================================================

/// Stable, unique identifier of a component.
///
/// Assigned once by the component tree and never reused. The document carries
/// it as the identity marker (`c_<n>`) of the element a peer renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderId(u64);

impl RenderId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Identity marker used for the element rendered by this component.
    pub fn dom_id(self) -> String {
        format!("c_{}", self.0)
    }
}

impl fmt::Display for RenderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c_{}", self.0)
    }
}

/// Type tag of the implicit top-level component.
pub const ROOT_TYPE: &str = "Root";

// =============================================================================
// Color
// =============================================================================

/// Opaque RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Parse a hex color string: `#rgb` or `#rrggbb` (hash optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            Some((hex_digit(s[i])? << 4) | hex_digit(s[i + 1])?)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => Some(Self::rgb(
                hex_byte(bytes, 0)?,
                hex_byte(bytes, 2)?,
                hex_byte(bytes, 4)?,
            )),
            _ => None,
        }
    }

    /// Style value of this color (`#rrggbb`).
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

// =============================================================================
// Extent
// =============================================================================

/// Units an extent can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Px,
    Percent,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
    Em,
    Ex,
}

impl Units {
    /// Style suffix for the unit.
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Percent => "%",
            Self::Pt => "pt",
            Self::Pc => "pc",
            Self::In => "in",
            Self::Cm => "cm",
            Self::Mm => "mm",
            Self::Em => "em",
            Self::Ex => "ex",
        }
    }
}

/// A length with units, e.g. `12px` or `50%`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub value: f64,
    pub units: Units,
}

impl Extent {
    pub const fn new(value: f64, units: Units) -> Self {
        Self { value, units }
    }

    /// Pixel extent.
    pub const fn px(value: f64) -> Self {
        Self::new(value, Units::Px)
    }

    /// Percentage extent.
    pub const fn percent(value: f64) -> Self {
        Self::new(value, Units::Percent)
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units.suffix())
    }
}

// =============================================================================
// Insets
// =============================================================================

/// Four independent extents, one per side.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: Extent,
    pub right: Extent,
    pub bottom: Extent,
    pub left: Extent,
}

impl Insets {
    pub const fn new(top: Extent, right: Extent, bottom: Extent, left: Extent) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same extent on every side.
    pub const fn uniform(extent: Extent) -> Self {
        Self::new(extent, extent, extent, extent)
    }
}

// =============================================================================
// Border
// =============================================================================

/// Border line styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    None = 0,
    #[default]
    Solid = 1,
    Dashed = 2,
    Dotted = 3,
    Double = 4,
    Groove = 5,
    Ridge = 6,
    Inset = 7,
    Outset = 8,
}

impl BorderStyle {
    /// Style keyword for the border line.
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
            Self::Double => "double",
            Self::Groove => "groove",
            Self::Ridge => "ridge",
            Self::Inset => "inset",
            Self::Outset => "outset",
        }
    }
}

/// A border: line size, style and optional color.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Border {
    pub size: Extent,
    pub style: BorderStyle,
    pub color: Option<Color>,
}

impl Border {
    pub const fn new(size: Extent, style: BorderStyle, color: Option<Color>) -> Self {
        Self { size, style, color }
    }
}

// =============================================================================
// Fill Image
// =============================================================================

/// How a fill image repeats across its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRepeat {
    Repeat,
    RepeatX,
    RepeatY,
    NoRepeat,
}

impl FillRepeat {
    pub const fn keyword(&self) -> &'static str {
        match self {
            Self::Repeat => "repeat",
            Self::RepeatX => "repeat-x",
            Self::RepeatY => "repeat-y",
            Self::NoRepeat => "no-repeat",
        }
    }
}

/// Reference to an image resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    pub url: String,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// A background image with optional repeat mode and offsets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillImage {
    pub image: Option<ImageRef>,
    pub repeat: Option<FillRepeat>,
    pub x: Option<Extent>,
    pub y: Option<Extent>,
}

impl FillImage {
    pub fn new(image: ImageRef) -> Self {
        Self {
            image: Some(image),
            ..Default::default()
        }
    }
}

// =============================================================================
// Property
// =============================================================================

/// A named component property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Text(String),
    Bool(bool),
    Integer(i64),
    Color(Color),
    Extent(Extent),
    Insets(Insets),
    Border(Border),
    FillImage(FillImage),
}

impl Property {
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(color) => Some(*color),
            _ => None,
        }
    }

    pub fn as_extent(&self) -> Option<Extent> {
        match self {
            Self::Extent(extent) => Some(*extent),
            _ => None,
        }
    }

    pub fn as_insets(&self) -> Option<Insets> {
        match self {
            Self::Insets(insets) => Some(*insets),
            _ => None,
        }
    }

    pub fn as_border(&self) -> Option<Border> {
        match self {
            Self::Border(border) => Some(*border),
            _ => None,
        }
    }

    pub fn as_fill_image(&self) -> Option<&FillImage> {
        match self {
            Self::FillImage(fill) => Some(fill),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for Property {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Color> for Property {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Extent> for Property {
    fn from(value: Extent) -> Self {
        Self::Extent(value)
    }
}

impl From<Insets> for Property {
    fn from(value: Insets) -> Self {
        Self::Insets(value)
    }
}

impl From<Border> for Property {
    fn from(value: Border) -> Self {
        Self::Border(value)
    }
}

impl From<FillImage> for Property {
    fn from(value: FillImage) -> Self {
        Self::FillImage(value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_id_marker() {
        let id = RenderId::new(42);
        assert_eq!(id.dom_id(), "c_42");
        assert_eq!(id.to_string(), "c_42");
        assert_eq!(id.raw(), 42);
    }

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::RED));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::GREEN));
        assert_eq!(Color::from_hex("#abc"), Some(Color::rgb(0xaa, 0xbb, 0xcc)));
        assert_eq!(Color::from_hex("  #FFFFFF "), Some(Color::WHITE));
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#ff00"), None);
        assert_eq!(Color::from_hex("#gggggg"), None);
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
        assert_eq!(Color::from_hex("#abc").map(Color::to_hex), Some("#aabbcc".to_string()));
    }

    #[test]
    fn test_extent_display() {
        assert_eq!(Extent::px(12.0).to_string(), "12px");
        assert_eq!(Extent::percent(50.0).to_string(), "50%");
        assert_eq!(Extent::new(1.5, Units::Em).to_string(), "1.5em");
    }

    #[test]
    fn test_property_accessors() {
        let prop = Property::from(Color::BLUE);
        assert_eq!(prop.as_color(), Some(Color::BLUE));
        assert_eq!(prop.as_extent(), None);

        let prop = Property::from("hello");
        assert_eq!(prop.as_text(), Some("hello"));
        assert_eq!(prop.as_border(), None);
    }
}
