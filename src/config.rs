//! Renderer configuration.
//!
//! Typed settings with defaults. A `RendererConfig` is handed to the
//! `Renderer` once at construction and never changes for its lifetime.

use crate::types::Units;

// =============================================================================
// Double-install Policy
// =============================================================================

/// What `load_peer` does when the component already has a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoubleInstallPolicy {
    /// Keep the existing peer and return successfully.
    #[default]
    Tolerate,
    /// Fail with `ReconcileError::PeerAlreadyInstalled`.
    Fail,
}

// =============================================================================
// Unit Metrics
// =============================================================================

/// Base metrics used to convert extents into pixels.
///
/// Horizontal and vertical extents use separate font metrics and separate
/// percentage bases (viewport width vs. height).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMetrics {
    /// Pixels per inch.
    pub dpi: f64,
    /// Pixels per `em`, horizontal axis.
    pub em_horizontal: f64,
    /// Pixels per `em`, vertical axis.
    pub em_vertical: f64,
    /// Pixels per `ex`, horizontal axis.
    pub ex_horizontal: f64,
    /// Pixels per `ex`, vertical axis.
    pub ex_vertical: f64,
    /// Base for horizontal percentages.
    pub viewport_width: f64,
    /// Base for vertical percentages.
    pub viewport_height: f64,
}

impl Default for UnitMetrics {
    fn default() -> Self {
        Self {
            dpi: 96.0,
            em_horizontal: 16.0,
            em_vertical: 16.0,
            ex_horizontal: 8.0,
            ex_vertical: 8.0,
            viewport_width: 1024.0,
            viewport_height: 768.0,
        }
    }
}

impl UnitMetrics {
    /// Pixels per unit along the given axis.
    pub fn pixels_per_unit(&self, units: Units, horizontal: bool) -> f64 {
        match units {
            Units::Px => 1.0,
            Units::In => self.dpi,
            Units::Cm => self.dpi / 2.54,
            Units::Mm => self.dpi / 25.4,
            Units::Pt => self.dpi / 72.0,
            Units::Pc => self.dpi / 6.0,
            Units::Em if horizontal => self.em_horizontal,
            Units::Em => self.em_vertical,
            Units::Ex if horizontal => self.ex_horizontal,
            Units::Ex => self.ex_vertical,
            Units::Percent if horizontal => self.viewport_width / 100.0,
            Units::Percent => self.viewport_height / 100.0,
        }
    }

    /// Convert a value in `units` to whole pixels.
    pub fn extent_to_pixels(&self, value: f64, units: Units, horizontal: bool) -> i32 {
        (value * self.pixels_per_unit(units, horizontal)).round() as i32
    }
}

// =============================================================================
// Renderer Config
// =============================================================================

/// Settings for one `Renderer` instance.
#[derive(Debug, Clone, Default)]
pub struct RendererConfig {
    /// Policy for loading a peer onto an already-peered component.
    pub double_install: DoubleInstallPolicy,
    /// Unit conversion metrics for property renderers.
    pub metrics: UnitMetrics,
    /// The host needs the alpha-loader filter for translucent fill images.
    pub alpha_filter_required: bool,
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_double_install(mut self, policy: DoubleInstallPolicy) -> Self {
        self.double_install = policy;
        self
    }

    pub fn with_metrics(mut self, metrics: UnitMetrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_alpha_filter_required(mut self, required: bool) -> Self {
        self.alpha_filter_required = required;
        self
    }
}
