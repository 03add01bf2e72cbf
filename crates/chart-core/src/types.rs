// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (sizes, paddings, interaction and layout tuning).

use std::time::Duration;

/// Default logical surface width in pixels.
pub const WIDTH: f32 = 640.0;
/// Default logical surface height in pixels.
pub const HEIGHT: f32 = 300.0;

/// Horizontal snap distance for hover hit-testing, in logical pixels.
pub const SNAP_THRESHOLD: f32 = 20.0;
/// Marker radius used when a series does not set `pointRadius`.
pub const DEFAULT_POINT_RADIUS: f32 = 4.0;
/// Stroke width for line series.
pub const LINE_WIDTH: f32 = 2.5;
/// Radius of the hover highlight dot.
pub const HIGHLIGHT_RADIUS: f32 = 5.0;
/// Fraction of a category slot covered by bars.
pub const BAR_FILL_RATIO: f32 = 0.6;
/// Inner radius of a doughnut relative to the outer radius.
pub const DOUGHNUT_HOLE_RATIO: f32 = 0.6;
/// Pie radius is `min(plot_w, plot_h) / PIE_RADIUS_DIVISOR`.
pub const PIE_RADIUS_DIVISOR: f32 = 2.5;
/// Number of horizontal grid intervals on the value axis.
pub const Y_TICKS: usize = 5;
/// Category labels beyond this count are thinned out.
pub const MAX_X_LABELS: usize = 10;
/// Trailing debounce window for resize notifications.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Surface size in logical (CSS-like) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogicalSize {
    pub width: f32,
    pub height: f32,
}

impl LogicalSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for LogicalSize {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Padding between the surface edge and the plot rectangle, in logical pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub const fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left, right, top, bottom }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(60.0, 40.0, 40.0, 50.0)
    }
}
