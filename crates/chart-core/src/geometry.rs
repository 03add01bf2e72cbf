// File: crates/chart-core/src/geometry.rs
// Summary: Plot rectangle and pure value/index -> pixel mapping.

use crate::config::DataValue;
use crate::scale::Domain;
use crate::types::{Insets, LogicalSize, BAR_FILL_RATIO};

/// Drawing rectangle inside the surface padding, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl PlotRect {
    pub const fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Padded rectangle for a surface. Collapses to zero size instead of inverting
    /// when the insets exceed the surface.
    pub fn from_size(size: LogicalSize, insets: &Insets) -> Self {
        let right = (size.width - insets.right).max(insets.left);
        let bottom = (size.height - insets.bottom).max(insets.top);
        Self::from_ltrb(insets.left, insets.top, right, bottom)
    }

    pub fn width(&self) -> f32 { self.right - self.left }
    pub fn height(&self) -> f32 { self.bottom - self.top }
}

/// A mapped data point, kept for hit-testing.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
    pub series_index: usize,
    pub point_index: usize,
    pub value: DataValue,
}

/// Value -> pixel Y; `domain.min` lands on `rect.bottom`, `domain.max` on `rect.top`.
#[inline]
pub fn map_y(value: f64, domain: Domain, rect: &PlotRect) -> f32 {
    let span = domain.span();
    let t = if span > 0.0 { (value - domain.min) / span } else { 0.0 };
    rect.bottom - (t as f32) * rect.height()
}

/// Category index -> pixel X for line/scatter: `count - 1` divisions so the first and
/// last points sit on the rectangle edges.
#[inline]
pub fn map_x_line(index: usize, count: usize, rect: &PlotRect) -> f32 {
    let divisions = count.saturating_sub(1).max(1) as f32;
    rect.left + index as f32 * (rect.width() / divisions)
}

/// Width of one category slot for bar charts.
#[inline]
pub fn slot_width(count: usize, rect: &PlotRect) -> f32 {
    rect.width() / count.max(1) as f32
}

/// Category index -> slot midpoint for bar charts.
#[inline]
pub fn map_x_bar(index: usize, count: usize, rect: &PlotRect) -> f32 {
    let slot = slot_width(count, rect);
    rect.left + index as f32 * slot + slot / 2.0
}

/// Total bar width for one category.
#[inline]
pub fn bar_width(count: usize, rect: &PlotRect) -> f32 {
    slot_width(count, rect) * BAR_FILL_RATIO
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> PlotRect {
        PlotRect::from_ltrb(60.0, 40.0, 460.0, 240.0)
    }

    #[test]
    fn y_is_inverted() {
        let d = Domain { min: 0.0, max: 10.0 };
        assert_eq!(map_y(0.0, d, &rect()), 240.0);
        assert_eq!(map_y(10.0, d, &rect()), 40.0);
        assert_eq!(map_y(5.0, d, &rect()), 140.0);
    }

    #[test]
    fn line_x_spans_edges() {
        let r = rect();
        assert_eq!(map_x_line(0, 5, &r), 60.0);
        assert_eq!(map_x_line(4, 5, &r), 460.0);
    }

    #[test]
    fn single_category_does_not_divide_by_zero() {
        let r = rect();
        assert_eq!(map_x_line(0, 1, &r), 60.0);
        assert_eq!(map_x_line(0, 0, &r), 60.0);
        assert!(map_x_bar(0, 0, &r).is_finite());
    }

    #[test]
    fn bar_x_is_slot_midpoint() {
        let r = rect();
        assert_eq!(slot_width(4, &r), 100.0);
        assert_eq!(map_x_bar(0, 4, &r), 110.0);
        assert_eq!(map_x_bar(3, 4, &r), 410.0);
        assert!((bar_width(4, &r) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn oversized_insets_collapse() {
        let r = PlotRect::from_size(LogicalSize::new(50.0, 50.0), &Insets::default());
        assert_eq!(r.width(), 0.0);
        assert_eq!(r.height(), 0.0);
    }
}
