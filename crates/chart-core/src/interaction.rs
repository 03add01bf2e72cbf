// File: crates/chart-core/src/interaction.rs
// Summary: Hover state, horizontal snap search, hover overlay and pointer binding lifecycle.

use skia_safe as skia;

use crate::config::DataValue;
use crate::geometry::{PlotPoint, PlotRect};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::types::{LogicalSize, HIGHLIGHT_RADIUS};

const TOOLTIP_OFFSET: (f32, f32) = (10.0, -30.0);
const TOOLTIP_FONT: f32 = 12.0;
const TOOLTIP_PAD_X: f32 = 10.0;
const TOOLTIP_PAD_Y: f32 = 6.0;
// Advance of a 12 px monospace glyph, used when no shaper is available.
const TOOLTIP_GLYPH_ADVANCE: f32 = 7.2;

/// Point picked by the last pointer event.
#[derive(Clone, Debug, PartialEq)]
pub struct HitCandidate {
    pub pixel_x: f32,
    pub pixel_y: f32,
    pub series_index: usize,
    pub point_index: usize,
    pub category_label: Option<String>,
    pub raw_value: DataValue,
}

impl HitCandidate {
    pub fn from_point(point: &PlotPoint, categories: &[String]) -> Self {
        Self {
            pixel_x: point.x,
            pixel_y: point.y,
            series_index: point.series_index,
            point_index: point.point_index,
            category_label: categories.get(point.point_index).cloned(),
            raw_value: point.value,
        }
    }

    /// `"<category>: <value>"`, or just the value when there is no category.
    pub fn label_text(&self) -> String {
        match &self.category_label {
            Some(c) => format!("{c}: {}", self.raw_value),
            None => self.raw_value.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(HitCandidate),
}

impl HoverState {
    pub fn candidate(&self) -> Option<&HitCandidate> {
        match self {
            HoverState::Idle => None,
            HoverState::Hovering(c) => Some(c),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, HoverState::Idle)
    }
}

/// Closest point by horizontal distance, strictly within `threshold`.
/// Ties keep the earliest point in series/point order. A NaN pointer matches nothing.
pub fn nearest_point(points: &[PlotPoint], pointer_x: f32, threshold: f32) -> Option<&PlotPoint> {
    let mut best: Option<(&PlotPoint, f32)> = None;
    for p in points {
        let dist = (p.x - pointer_x).abs();
        if dist.is_nan() || dist >= threshold {
            continue;
        }
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((p, dist));
        }
    }
    best.map(|(p, _)| p)
}

/// Floating label box, top-left anchored, in logical pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Tooltip {
    /// Offset `(+10, -30)` from the point, then clamped inside the surface. Text is
    /// measured with `shaper` when glyphs are drawn, estimated otherwise.
    pub fn place(
        candidate: &HitCandidate,
        surface: LogicalSize,
        shaper: Option<&TextShaper>,
    ) -> Self {
        let text = candidate.label_text();
        let text_width = match shaper {
            Some(s) => s.measure_width(&text, TOOLTIP_FONT, true),
            None => text.chars().count() as f32 * TOOLTIP_GLYPH_ADVANCE,
        };
        let width = text_width + TOOLTIP_PAD_X * 2.0;
        let height = TOOLTIP_FONT + TOOLTIP_PAD_Y * 2.0;
        let x = (candidate.pixel_x + TOOLTIP_OFFSET.0).min(surface.width - width).max(0.0);
        let y = (candidate.pixel_y + TOOLTIP_OFFSET.1).min(surface.height - height).max(0.0);
        Self { text, x, y, width, height }
    }

    pub fn rect(&self) -> skia::Rect {
        skia::Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

/// Dashed guideline across the plot, highlight dot, and the tooltip box.
/// `text` is `None` when glyph rendering is disabled.
pub fn draw_overlay(
    canvas: &skia::Canvas,
    candidate: &HitCandidate,
    tooltip: &Tooltip,
    rect: &PlotRect,
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let mut guide = skia::Paint::default();
    guide.set_anti_alias(true);
    guide.set_style(skia::paint::Style::Stroke);
    guide.set_stroke_width(1.0);
    guide.set_color(theme.crosshair);
    guide.set_path_effect(skia::PathEffect::dash(&[5.0, 5.0], 0.0));
    canvas.draw_line((candidate.pixel_x, rect.top), (candidate.pixel_x, rect.bottom), &guide);

    let mut dot = skia::Paint::default();
    dot.set_anti_alias(true);
    dot.set_color(theme.highlight);
    canvas.draw_circle((candidate.pixel_x, candidate.pixel_y), HIGHLIGHT_RADIUS, &dot);

    let rrect = skia::RRect::new_rect_xy(tooltip.rect(), 6.0, 6.0);
    let mut bg = skia::Paint::default();
    bg.set_anti_alias(true);
    bg.set_color(theme.tooltip_background);
    canvas.draw_rrect(rrect, &bg);
    let mut border = skia::Paint::default();
    border.set_anti_alias(true);
    border.set_style(skia::paint::Style::Stroke);
    border.set_stroke_width(1.0);
    border.set_color(theme.tooltip_border);
    canvas.draw_rrect(rrect, &border);

    if let Some(shaper) = text {
        shaper.draw(
            canvas,
            &tooltip.text,
            tooltip.x + TOOLTIP_PAD_X,
            tooltip.y + TOOLTIP_PAD_Y + TOOLTIP_FONT * 0.8,
            TOOLTIP_FONT,
            theme.tooltip_text,
            Anchor::Left,
            true,
        );
    }
}

/// Whether pointer handlers are live. Each `attach` starts a new generation, so a
/// reconfigure never leaves two sets of handlers behind.
#[derive(Debug, Default)]
pub struct PointerBinding {
    generation: u64,
    attached: bool,
}

impl PointerBinding {
    pub fn attach(&mut self) -> u64 {
        self.generation += 1;
        self.attached = true;
        self.generation
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
