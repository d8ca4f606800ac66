//! Extent conversion.

use crate::config::UnitMetrics;
use crate::types::Extent;

/// Whole pixels for `extent` along one axis. An absent extent is 0.
pub fn to_pixels(extent: Option<&Extent>, horizontal: bool, metrics: &UnitMetrics) -> i32 {
    extent.map_or(0, |e| metrics.extent_to_pixels(e.value, e.units, horizontal))
}
