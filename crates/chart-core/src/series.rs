// File: crates/chart-core/src/series.rs
// Summary: Series renderers for bar, line/scatter and pie/doughnut, with their pure geometry.
// Notes:
// - Each strategy exposes the geometry it paints (`bar_rects`, `path_segments`, `pie_slices`)
//   so layout can be checked without decoding pixels.
// - `plot_points` is the hit-testing view of the same geometry.

use skia_safe as skia;

use crate::chart::RenderOptions;
use crate::color::{bar_fill, series_color, slice_color};
use crate::config::{ChartConfig, ChartKind, Series};
use crate::geometry::{bar_width, map_x_bar, map_x_line, map_y, PlotPoint, PlotRect};
use crate::scale::{pie_total, pie_weight, Domain};
use crate::types::{LogicalSize, DOUGHNUT_HOLE_RATIO, PIE_RADIUS_DIVISOR};

/// Everything a strategy needs for one draw pass.
pub struct PlotContext<'a> {
    pub config: &'a ChartConfig,
    pub size: LogicalSize,
    pub rect: PlotRect,
    pub domain: Domain,
    pub options: &'a RenderOptions,
}

impl PlotContext<'_> {
    fn series(&self) -> &[Series] {
        self.config.series()
    }
}

/// One rendering strategy per chart family.
pub trait SeriesRenderer: Sync {
    fn name(&self) -> &'static str;

    /// Whether grid, axes and category labels frame this chart.
    fn has_axes(&self) -> bool {
        true
    }

    /// Mapped data points used for hover hit-testing.
    fn plot_points(&self, ctx: &PlotContext<'_>) -> Vec<PlotPoint>;

    fn draw(&self, canvas: &skia::Canvas, ctx: &PlotContext<'_>);
}

/// Strategy lookup; done once per render.
pub fn renderer_for(kind: ChartKind) -> &'static dyn SeriesRenderer {
    static BAR: BarRenderer = BarRenderer;
    static LINE: LineRenderer = LineRenderer { scatter: false };
    static SCATTER: LineRenderer = LineRenderer { scatter: true };
    static PIE: PieRenderer = PieRenderer { doughnut: false };
    static DOUGHNUT: PieRenderer = PieRenderer { doughnut: true };

    match kind {
        ChartKind::Bar => &BAR,
        ChartKind::Line => &LINE,
        ChartKind::Scatter => &SCATTER,
        ChartKind::Pie => &PIE,
        ChartKind::Doughnut => &DOUGHNUT,
    }
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

// ---- bar --------------------------------------------------------------------

pub struct BarRenderer;

/// One painted bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarRect {
    pub series_index: usize,
    pub point_index: usize,
    pub rect: skia::Rect,
}

impl BarRenderer {
    /// Bars grow from the zero baseline (clamped into the domain). Series share their
    /// category's `0.6 * slot` width side by side; one series gets the whole width.
    pub fn bar_rects(ctx: &PlotContext<'_>) -> Vec<BarRect> {
        let categories = ctx.config.categories().len();
        let series = ctx.series();
        let group = bar_width(categories, &ctx.rect);
        let each = group / series.len().max(1) as f32;
        let base_y = map_y(ctx.domain.clamp(0.0), ctx.domain, &ctx.rect);

        let mut out = Vec::with_capacity(series.len() * categories);
        for (series_index, s) in series.iter().enumerate() {
            for (point_index, v) in s.values.iter().enumerate() {
                let left = map_x_bar(point_index, categories, &ctx.rect) - group / 2.0
                    + series_index as f32 * each;
                let y = map_y(v.y(), ctx.domain, &ctx.rect);
                out.push(BarRect {
                    series_index,
                    point_index,
                    rect: skia::Rect::from_ltrb(left, y.min(base_y), left + each, y.max(base_y)),
                });
            }
        }
        out
    }
}

impl SeriesRenderer for BarRenderer {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn plot_points(&self, ctx: &PlotContext<'_>) -> Vec<PlotPoint> {
        let series = ctx.series();
        Self::bar_rects(ctx)
            .into_iter()
            .map(|b| {
                let value = series[b.series_index].values[b.point_index];
                PlotPoint {
                    x: b.rect.center_x(),
                    y: map_y(value.y(), ctx.domain, &ctx.rect),
                    series_index: b.series_index,
                    point_index: b.point_index,
                    value,
                }
            })
            .collect()
    }

    fn draw(&self, canvas: &skia::Canvas, ctx: &PlotContext<'_>) {
        let series = ctx.series();
        let palette = &ctx.options.palette;
        let fills: Vec<skia::Paint> = series
            .iter()
            .enumerate()
            .map(|(i, s)| fill_paint(bar_fill(s, i, palette)))
            .collect();
        for bar in Self::bar_rects(ctx) {
            canvas.draw_rect(bar.rect, &fills[bar.series_index]);
        }
    }
}

// ---- line / scatter ---------------------------------------------------------

pub struct LineRenderer {
    pub scatter: bool,
}

/// Path construction step, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(skia::Point),
    LineTo(skia::Point),
    CubicTo { c1: skia::Point, c2: skia::Point, to: skia::Point },
}

impl PathSegment {
    /// Where the pen ends up after this step.
    pub fn end(&self) -> skia::Point {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
            PathSegment::CubicTo { to, .. } => to,
        }
    }
}

/// Connect `points` with straight segments, or, when `tension > 0` and there are more
/// than two points, with cubic Bézier segments through every point.
///
/// Control points use a 4-point window `p0..p3` (ends repeat the boundary point):
/// `c1 = p1 + (p2 - p0) * t / 6`, `c2 = p2 - (p3 - p1) * t / 6`.
pub fn path_segments(points: &[skia::Point], tension: f32) -> Vec<PathSegment> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(points.len());
    out.push(PathSegment::MoveTo(first));

    if tension > 0.0 && points.len() > 2 {
        let k = tension / 6.0;
        let last = points.len() - 1;
        for i in 0..last {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points[(i + 2).min(last)];
            let c1 = skia::Point::new(p1.x + (p2.x - p0.x) * k, p1.y + (p2.y - p0.y) * k);
            let c2 = skia::Point::new(p2.x - (p3.x - p1.x) * k, p2.y - (p3.y - p1.y) * k);
            out.push(PathSegment::CubicTo { c1, c2, to: p2 });
        }
    } else {
        out.extend(points[1..].iter().map(|&p| PathSegment::LineTo(p)));
    }
    out
}

pub fn build_path(segments: &[PathSegment]) -> skia::Path {
    let mut path = skia::Path::new();
    for seg in segments {
        match *seg {
            PathSegment::MoveTo(p) => {
                path.move_to(p);
            }
            PathSegment::LineTo(p) => {
                path.line_to(p);
            }
            PathSegment::CubicTo { c1, c2, to } => {
                path.cubic_to(c1, c2, to);
            }
        }
    }
    path
}

impl LineRenderer {
    /// Pixel positions of one series; X is spread by index over the series length.
    pub fn series_points(ctx: &PlotContext<'_>, series_index: usize) -> Vec<skia::Point> {
        let Some(s) = ctx.series().get(series_index) else {
            return Vec::new();
        };
        let count = s.values.len();
        s.values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = map_x_line(i, count, &ctx.rect);
                skia::Point::new(x, map_y(v.y(), ctx.domain, &ctx.rect))
            })
            .collect()
    }

    fn marker_radius(&self, s: &Series, options: &RenderOptions) -> Option<f32> {
        if !(self.scatter || s.show_discrete_points) {
            return None;
        }
        Some(match s.point_radius {
            Some(r) if r.is_finite() && r > 0.0 => r,
            _ => options.default_point_radius,
        })
    }
}

impl SeriesRenderer for LineRenderer {
    fn name(&self) -> &'static str {
        if self.scatter { "scatter" } else { "line" }
    }

    fn plot_points(&self, ctx: &PlotContext<'_>) -> Vec<PlotPoint> {
        let mut out = Vec::new();
        for (series_index, s) in ctx.series().iter().enumerate() {
            let pts = Self::series_points(ctx, series_index);
            out.extend(pts.into_iter().zip(&s.values).enumerate().map(|(point_index, (p, v))| {
                PlotPoint { x: p.x, y: p.y, series_index, point_index, value: *v }
            }));
        }
        out
    }

    fn draw(&self, canvas: &skia::Canvas, ctx: &PlotContext<'_>) {
        let palette = &ctx.options.palette;
        for (series_index, s) in ctx.series().iter().enumerate() {
            let color = series_color(s, series_index, palette);
            let points = Self::series_points(ctx, series_index);

            if !self.scatter && points.len() >= 2 {
                let path = build_path(&path_segments(&points, s.tension()));
                canvas.draw_path(&path, &stroke_paint(color, ctx.options.line_width));
            }

            if let Some(radius) = self.marker_radius(s, ctx.options) {
                let paint = fill_paint(color);
                for p in &points {
                    canvas.draw_circle(*p, radius, &paint);
                }
            }
        }
    }
}

// ---- pie / doughnut ---------------------------------------------------------

pub struct PieRenderer {
    pub doughnut: bool,
}

/// Angular span of one category, in degrees, clockwise from 12 o'clock (-90°).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieSlice {
    pub index: usize,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl PieSlice {
    pub fn sweep_deg(&self) -> f64 {
        self.end_deg - self.start_deg
    }
}

/// Proportional slices for `values` (negatives count as zero). Boundaries come from
/// running sums, so neighbours share an edge exactly and the last slice ends at 270°.
/// Empty when the total is not positive.
pub fn pie_slices(values: &[f64]) -> Vec<PieSlice> {
    let weights: Vec<f64> = values.iter().copied().map(pie_weight).collect();
    let total: f64 = weights.iter().sum();
    if total.is_nan() || total <= 0.0 {
        return Vec::new();
    }

    let angle_at = |cum: f64| -90.0 + 360.0 * cum / total;
    let last = weights.len() - 1;
    let mut cum = 0.0;
    weights
        .iter()
        .enumerate()
        .map(|(index, w)| {
            let start_deg = angle_at(cum);
            cum += w;
            let end_deg = if index == last { 270.0 } else { angle_at(cum) };
            PieSlice { index, start_deg, end_deg }
        })
        .collect()
}

/// Centre and outer radius: surface centre, `min(plot_w, plot_h) / 2.5`.
pub fn pie_geometry(size: LogicalSize, rect: &PlotRect) -> (skia::Point, f32) {
    let center = skia::Point::new(size.width / 2.0, size.height / 2.0);
    let radius = rect.width().min(rect.height()) / PIE_RADIUS_DIVISOR;
    (center, radius.max(0.0))
}

impl SeriesRenderer for PieRenderer {
    fn name(&self) -> &'static str {
        if self.doughnut { "doughnut" } else { "pie" }
    }

    fn has_axes(&self) -> bool {
        false
    }

    fn plot_points(&self, _ctx: &PlotContext<'_>) -> Vec<PlotPoint> {
        Vec::new()
    }

    fn draw(&self, canvas: &skia::Canvas, ctx: &PlotContext<'_>) {
        let Some(series) = ctx.series().first() else {
            return;
        };
        let total = pie_total(ctx.series());
        if total.is_nan() || total <= 0.0 {
            tracing::debug!(kind = self.name(), total, "no positive slices to draw");
            return;
        }
        let values: Vec<f64> = series.values.iter().map(|v| v.y()).collect();
        let slices = pie_slices(&values);

        let (center, radius) = pie_geometry(ctx.size, &ctx.rect);
        let diameter = radius * 2.0;
        let oval = skia::Rect::from_xywh(center.x - radius, center.y - radius, diameter, diameter);
        let background = ctx.options.theme.background;
        let outline = stroke_paint(background, 2.0);

        for slice in &slices {
            let sweep = slice.sweep_deg() as f32;
            if sweep <= 0.0 {
                continue;
            }
            let fill = fill_paint(slice_color(series, slice.index, &ctx.options.palette));
            if sweep >= 360.0 {
                canvas.draw_circle(center, radius, &fill);
                canvas.draw_circle(center, radius, &outline);
                continue;
            }
            let mut wedge = skia::Path::new();
            wedge.move_to(center);
            wedge.arc_to(oval, slice.start_deg as f32, sweep, false);
            wedge.close();
            canvas.draw_path(&wedge, &fill);
            canvas.draw_path(&wedge, &outline);
        }

        if self.doughnut {
            canvas.draw_circle(center, radius * DOUGHNUT_HOLE_RATIO, &fill_paint(background));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f32, y: f32) -> skia::Point {
        skia::Point::new(x, y)
    }

    #[test]
    fn straight_segments_hit_every_point() {
        let pts = [pt(0.0, 0.0), pt(10.0, 5.0), pt(20.0, 0.0)];
        let segs = path_segments(&pts, 0.0);
        assert_eq!(segs.len(), 3);
        assert!(matches!(segs[0], PathSegment::MoveTo(_)));
        assert!(segs[1..].iter().all(|s| matches!(s, PathSegment::LineTo(_))));
        let ends: Vec<_> = segs.iter().map(PathSegment::end).collect();
        assert_eq!(ends, pts);
    }

    #[test]
    fn two_points_stay_straight_even_with_tension() {
        let segs = path_segments(&[pt(0.0, 0.0), pt(1.0, 1.0)], 0.4);
        assert!(matches!(segs[1], PathSegment::LineTo(_)));
    }

    #[test]
    fn spline_control_points_follow_neighbours() {
        let pts = [pt(0.0, 0.0), pt(6.0, 6.0), pt(12.0, 0.0)];
        let segs = path_segments(&pts, 1.0);
        match segs[1] {
            PathSegment::CubicTo { c1, c2, to } => {
                // p0 == p1 at the start: c1 = p1 + (p2 - p1)/6
                assert_eq!(c1, pt(1.0, 1.0));
                // c2 = p2 - (p3 - p1)/6 with p3 = pts[2]
                assert_eq!(c2, pt(4.0, 6.0));
                assert_eq!(to, pts[1]);
            }
            other => panic!("expected cubic, got {other:?}"),
        }
    }

    #[test]
    fn empty_input_has_no_segments() {
        assert!(path_segments(&[], 0.5).is_empty());
    }

    #[test]
    fn single_slice_is_full_circle() {
        let s = pie_slices(&[42.0]);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].start_deg, -90.0);
        assert_eq!(s[0].end_deg, 270.0);
    }

    #[test]
    fn slices_are_contiguous_and_proportional() {
        let s = pie_slices(&[1.0, 1.0, 2.0]);
        assert_eq!(s[0].start_deg, -90.0);
        assert_eq!(s[0].end_deg, s[1].start_deg);
        assert_eq!(s[1].end_deg, s[2].start_deg);
        assert!((s[2].sweep_deg() - 180.0).abs() < 1e-9);
        assert_eq!(s[2].end_deg, 270.0);
    }

    #[test]
    fn zero_total_has_no_slices() {
        assert!(pie_slices(&[0.0, -1.0]).is_empty());
        assert!(pie_slices(&[]).is_empty());
    }

    #[test]
    fn lookup_picks_strategy() {
        assert_eq!(renderer_for(ChartKind::Scatter).name(), "scatter");
        assert!(!renderer_for(ChartKind::Doughnut).has_axes());
        assert!(renderer_for(ChartKind::Bar).has_axes());
    }
}
