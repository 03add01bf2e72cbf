// File: crates/chart-core/src/chart.rs
// Summary: ChartView render orchestrator and RenderOptions.

use std::time::{Duration, Instant};

use skia_safe as skia;
use tracing::{debug, trace, warn};

use crate::color::Palette;
use crate::config::{ChartConfig, ChartKind};
use crate::debounce::Debouncer;
use crate::error::{ChartError, ChartResult};
use crate::geometry::{map_x_bar, map_x_line, map_y, PlotPoint, PlotRect};
use crate::grid::{format_tick, label_stride, value_ticks};
use crate::interaction::{
    draw_overlay, nearest_point, HitCandidate, HoverState, PointerBinding, Tooltip,
};
use crate::legend::{entries, LegendSurface};
use crate::scale::{resolve_domain, DEFAULT_DOMAIN};
use crate::series::{renderer_for, PlotContext};
use crate::surface::{RasterSurface, RgbaFrame};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::types::{
    Insets, LogicalSize, DEFAULT_POINT_RADIUS, LINE_WIDTH, MAX_X_LABELS, RESIZE_DEBOUNCE,
    SNAP_THRESHOLD, Y_TICKS,
};

const AXIS_FONT: f32 = 11.0;
const TITLE_FONT: f32 = 14.0;
const ERROR_FONT: f32 = 13.0;

/// Per-view rendering knobs. Everything here is owned by one `ChartView`.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub insets: Insets,
    pub theme: Theme,
    pub palette: Palette,
    /// When false no glyphs are drawn (axis labels, title, tooltip and error text).
    pub draw_labels: bool,
    pub line_width: f32,
    pub default_point_radius: f32,
    /// Horizontal snap distance in logical pixels.
    pub snap_threshold: f32,
    pub resize_debounce: Duration,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            insets: Insets::default(),
            theme: Theme::default(),
            palette: Palette::default(),
            draw_labels: true,
            line_width: LINE_WIDTH,
            default_point_radius: DEFAULT_POINT_RADIUS,
            snap_threshold: SNAP_THRESHOLD,
            resize_debounce: RESIZE_DEBOUNCE,
        }
    }
}

impl RenderOptions {
    pub fn with_insets(mut self, insets: Insets) -> Self {
        self.insets = insets;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_labels(mut self, draw_labels: bool) -> Self {
        self.draw_labels = draw_labels;
        self
    }

    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    pub fn with_point_radius(mut self, radius: f32) -> Self {
        self.default_point_radius = radius;
        self
    }

    pub fn with_snap_threshold(mut self, threshold: f32) -> Self {
        self.snap_threshold = threshold;
        self
    }

    pub fn with_resize_debounce(mut self, window: Duration) -> Self {
        self.resize_debounce = window;
        self
    }
}

/// One chart bound to one raster surface.
///
/// Every full render runs scale resolution, geometry, series dispatch, legend and
/// resets hover. Pointer moves repaint the base chart and draw the overlay on top.
pub struct ChartView {
    surface: RasterSurface,
    size: LogicalSize,
    dpr: f32,
    config: ChartConfig,
    options: RenderOptions,
    legend: Option<Box<dyn LegendSurface>>,
    text: TextShaper,
    binding: PointerBinding,
    mounted: bool,
    hover: HoverState,
    tooltip: Option<Tooltip>,
    resize: Debouncer<LogicalSize>,
    last_error: Option<ChartError>,
    renders: u64,
}

impl ChartView {
    /// Allocate the surface, draw once and attach pointer handling.
    pub fn mount(
        size: LogicalSize,
        dpr: f32,
        config: ChartConfig,
        legend: Option<Box<dyn LegendSurface>>,
        options: RenderOptions,
    ) -> ChartResult<Self> {
        let surface = RasterSurface::new(size, dpr)?;
        let resize = Debouncer::new(options.resize_debounce);
        let mut view = Self {
            surface,
            size,
            dpr,
            config,
            options,
            legend,
            text: TextShaper::new(),
            binding: PointerBinding::default(),
            mounted: true,
            hover: HoverState::Idle,
            tooltip: None,
            resize,
            last_error: None,
            renders: 0,
        };
        view.render()?;
        view.binding.attach();
        Ok(view)
    }

    /// Full redraw. Config problems are painted as an error indicator and kept in
    /// `last_error`; only surface failures are returned.
    pub fn render(&mut self) -> ChartResult<()> {
        if !self.surface.matches(self.size, self.dpr) {
            self.surface = RasterSurface::new(self.size, self.dpr)?;
            debug!(
                width = self.size.width,
                height = self.size.height,
                dpr = self.dpr,
                "surface reallocated"
            );
        }

        if !self.hover.is_idle() {
            trace!("hover reset by full render");
        }
        self.hover = HoverState::Idle;
        self.tooltip = None;

        self.last_error = match self.config.validate() {
            Ok(()) => None,
            Err(err) => {
                warn!(kind = %self.config.kind, error = %err, "chart config rejected");
                Some(err)
            }
        };

        self.paint_base();
        if let Some(legend) = self.legend.as_mut() {
            // A rejected config clears the legend along with the plot.
            let shown = match self.last_error {
                None => entries(&self.config, &self.options.palette),
                Some(_) => Vec::new(),
            };
            legend.present(&shown);
        }
        self.renders += 1;
        debug!(
            kind = %self.config.kind,
            series = self.config.series().len(),
            width = self.size.width,
            height = self.size.height,
            dpr = self.dpr,
            "chart rendered"
        );
        Ok(())
    }

    /// Swap the config: handlers are detached for the redraw and re-attached after.
    pub fn reconfigure(&mut self, config: ChartConfig) -> ChartResult<()> {
        let reattach = self.binding.is_attached();
        self.binding.detach();
        self.config = config;
        self.render()?;
        if reattach {
            self.binding.attach();
        }
        Ok(())
    }

    /// Pointer position in logical pixels relative to the surface.
    pub fn pointer_move(&mut self, x: f32, _y: f32) {
        if !self.binding.is_attached() || self.last_error.is_some() {
            return;
        }
        if !x.is_finite() {
            trace!("ignoring non-finite pointer position");
            return;
        }
        let points = self.paint_base();
        let hit = nearest_point(&points, x, self.options.snap_threshold)
            .map(|p| HitCandidate::from_point(p, self.config.categories()));

        match hit {
            Some(candidate) => {
                let text = self.options.draw_labels.then_some(&self.text);
                let tooltip = Tooltip::place(&candidate, self.size, text);
                let rect = self.plot_rect();
                let theme = &self.options.theme;
                draw_overlay(self.surface.canvas(), &candidate, &tooltip, &rect, theme, text);
                if self.hover.candidate() != Some(&candidate) {
                    trace!(series = candidate.series_index, point = candidate.point_index, "hover");
                }
                self.hover = HoverState::Hovering(candidate);
                self.tooltip = Some(tooltip);
            }
            None => self.clear_hover(),
        }
    }

    pub fn pointer_leave(&mut self) {
        if !self.binding.is_attached() || self.last_error.is_some() {
            return;
        }
        self.paint_base();
        self.clear_hover();
    }

    /// Queue a size change; bursts collapse into one render once `poll` sees the
    /// debounce window elapse.
    pub fn notify_resize(&mut self, size: LogicalSize, now: Instant) {
        if !self.mounted {
            return;
        }
        if !size.is_valid() {
            debug!(width = size.width, height = size.height, "ignoring degenerate resize");
            return;
        }
        self.resize.push(size, now);
    }

    /// Fire a due resize. Returns whether a render happened.
    pub fn poll(&mut self, now: Instant) -> ChartResult<bool> {
        let Some(size) = self.resize.poll(now) else {
            return Ok(false);
        };
        self.size = size;
        self.render()?;
        Ok(true)
    }

    /// Deadline of the pending resize, for hosts that schedule wakeups.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Change the device pixel ratio and redraw at the new resolution.
    pub fn set_device_pixel_ratio(&mut self, dpr: f32) -> ChartResult<()> {
        if !dpr.is_finite() || dpr <= 0.0 {
            let (width, height) = (self.size.width, self.size.height);
            return Err(ChartError::InvalidSurface { width, height, dpr });
        }
        if dpr == self.dpr {
            return Ok(());
        }
        self.dpr = dpr;
        self.render()
    }

    /// Detach handlers and drop pending resizes; the last frame stays readable.
    pub fn unmount(&mut self) {
        self.binding.detach();
        self.resize.cancel();
        self.mounted = false;
        self.hover = HoverState::Idle;
        self.tooltip = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn listeners_attached(&self) -> bool {
        self.binding.is_attached()
    }

    pub fn listener_generation(&self) -> u64 {
        self.binding.generation()
    }

    pub fn hover_state(&self) -> &HoverState {
        &self.hover
    }

    pub fn hovered(&self) -> Option<&HitCandidate> {
        self.hover.candidate()
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    pub fn last_error(&self) -> Option<&ChartError> {
        self.last_error.as_ref()
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn size(&self) -> LogicalSize {
        self.size
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    pub fn physical_size(&self) -> (i32, i32) {
        self.surface.physical_size()
    }

    pub fn plot_rect(&self) -> PlotRect {
        PlotRect::from_size(self.size, &self.options.insets)
    }

    /// Number of full renders since mount.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    pub fn pixels_rgba8(&mut self) -> ChartResult<RgbaFrame> {
        self.surface.read_rgba8()
    }

    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        self.surface.encode_png()
    }

    fn clear_hover(&mut self) {
        if !self.hover.is_idle() {
            trace!("hover cleared");
        }
        self.hover = HoverState::Idle;
        self.tooltip = None;
    }

    /// Clear and draw either the chart or the error indicator. Returns hit-test points.
    fn paint_base(&mut self) -> Vec<PlotPoint> {
        let text = self.options.draw_labels.then_some(&self.text);
        let canvas = self.surface.begin_frame(self.options.theme.background);
        match &self.last_error {
            Some(err) => {
                draw_error(canvas, err, self.size, &self.options.theme, text);
                Vec::new()
            }
            None => draw_chart(canvas, &self.config, &self.options, self.size, text),
        }
    }
}

/// Draw a validated chart in logical coordinates; returns its hit-test points.
pub fn draw_chart(
    canvas: &skia::Canvas,
    config: &ChartConfig,
    options: &RenderOptions,
    size: LogicalSize,
    text: Option<&TextShaper>,
) -> Vec<PlotPoint> {
    let renderer = renderer_for(config.kind);
    let domain = if config.kind.is_radial() {
        DEFAULT_DOMAIN
    } else {
        resolve_domain(config.kind, config.series())
    };
    let rect = PlotRect::from_size(size, &options.insets);
    let ctx = PlotContext { config, size, rect, domain, options };

    if renderer.has_axes() {
        draw_frame(canvas, &ctx, text);
    }
    renderer.draw(canvas, &ctx);

    if let (Some(shaper), Some(title)) = (text, config.title()) {
        let y = (options.insets.top / 2.0 + TITLE_FONT * 0.4).max(TITLE_FONT);
        let color = options.theme.title;
        shaper.draw(canvas, title, size.width / 2.0, y, TITLE_FONT, color, Anchor::Center, false);
    }
    renderer.plot_points(&ctx)
}

/// Horizontal grid with value ticks, the two axis lines and thinned category labels.
fn draw_frame(canvas: &skia::Canvas, ctx: &PlotContext<'_>, text: Option<&TextShaper>) {
    let theme = &ctx.options.theme;
    let r = &ctx.rect;

    let mut grid = skia::Paint::default();
    grid.set_anti_alias(true);
    grid.set_style(skia::paint::Style::Stroke);
    grid.set_stroke_width(1.0);
    grid.set_color(theme.grid);

    for value in value_ticks(ctx.domain, Y_TICKS) {
        let y = map_y(value, ctx.domain, r);
        canvas.draw_line((r.left, y), (r.right, y), &grid);
        if let Some(shaper) = text {
            let label = format_tick(value);
            let (lx, ly) = (r.left - 10.0, y + 4.0);
            shaper.draw(canvas, &label, lx, ly, AXIS_FONT, theme.axis_label, Anchor::Right, true);
        }
    }

    let mut axis = skia::Paint::default();
    axis.set_anti_alias(true);
    axis.set_style(skia::paint::Style::Stroke);
    axis.set_stroke_width(2.0);
    axis.set_color(theme.axis_line);
    canvas.draw_line((r.left, r.top), (r.left, r.bottom), &axis);
    canvas.draw_line((r.left, r.bottom), (r.right, r.bottom), &axis);

    let Some(shaper) = text else { return };
    let categories = ctx.config.categories();
    let count = categories.len();
    for (i, label) in categories.iter().enumerate().step_by(label_stride(count, MAX_X_LABELS)) {
        let x = match ctx.config.kind {
            ChartKind::Bar => map_x_bar(i, count, r),
            _ => map_x_line(i, count, r),
        };
        let y = r.bottom + 20.0;
        shaper.draw(canvas, label, x, y, AXIS_FONT, theme.axis_label, Anchor::Center, false);
    }
}

/// Bordered in-surface box describing why the chart could not be drawn.
pub fn draw_error(
    canvas: &skia::Canvas,
    err: &ChartError,
    size: LogicalSize,
    theme: &Theme,
    text: Option<&TextShaper>,
) {
    let margin = 8.0_f32.min(size.width / 4.0).min(size.height / 4.0);
    let height = 44.0_f32.min(size.height - margin * 2.0).max(0.0);
    let width = (size.width - margin * 2.0).max(0.0);
    let bx = skia::Rect::from_xywh(margin, margin, width, height);

    let mut bg = skia::Paint::default();
    bg.set_anti_alias(true);
    bg.set_color(theme.error_background);
    canvas.draw_rect(bx, &bg);

    let mut accent = skia::Paint::default();
    accent.set_color(theme.error_accent);
    canvas.draw_rect(skia::Rect::from_xywh(bx.left, bx.top, 4.0_f32.min(width), height), &accent);

    if let Some(shaper) = text {
        let message = format!("Visualization Error: {err}");
        let baseline = bx.top + height / 2.0 + ERROR_FONT * 0.35;
        let (color, x) = (theme.error_text, bx.left + 14.0);
        shaper.draw(canvas, &message, x, baseline, ERROR_FONT, color, Anchor::Left, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Series;

    fn bar_config() -> ChartConfig {
        ChartConfig::new(ChartKind::Bar)
            .with_categories(["A", "B", "C"])
            .with_series(Series::from_numbers(&[10.0, 20.0, 5.0]))
    }

    fn mount(config: ChartConfig) -> ChartView {
        let opts = RenderOptions::default().with_labels(false);
        ChartView::mount(LogicalSize::new(320.0, 200.0), 1.0, config, None, opts).expect("mount")
    }

    #[test]
    fn mount_renders_once_and_attaches() {
        let view = mount(bar_config());
        assert_eq!(view.render_count(), 1);
        assert!(view.listeners_attached());
        assert!(view.last_error().is_none());
    }

    #[test]
    fn invalid_config_is_kept_not_returned() {
        let cfg = ChartConfig::new(ChartKind::Line)
            .with_categories(["A", "B"])
            .with_series(Series::from_numbers(&[1.0]));
        let view = mount(cfg);
        assert!(matches!(view.last_error(), Some(ChartError::LengthMismatch { .. })));
    }

    #[test]
    fn dpr_change_reallocates() {
        let mut view = mount(bar_config());
        view.set_device_pixel_ratio(2.0).expect("dpr");
        assert_eq!(view.physical_size(), (640, 400));
        assert!(view.set_device_pixel_ratio(0.0).is_err());
    }

    #[test]
    fn options_builder_chains() {
        let o = RenderOptions::default().with_snap_threshold(8.0).with_theme(Theme::light());
        assert_eq!(o.snap_threshold, 8.0);
        assert_eq!(o.theme.name, "light");
        assert!(o.draw_labels);
    }
}
