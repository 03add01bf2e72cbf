// File: crates/chart-core/src/legend.rs
// Summary: Legend entries derived from a chart config, plus markup and raster legend sinks.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use skia_safe as skia;

use crate::color::{series_color, slice_color, to_css, Palette};
use crate::config::ChartConfig;
use crate::error::ChartResult;
use crate::surface::{RasterSurface, RgbaFrame};
use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;
use crate::types::LogicalSize;

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: skia::Color,
}

/// One entry per series, or one per category for pie and doughnut charts.
pub fn entries(config: &ChartConfig, palette: &Palette) -> Vec<LegendEntry> {
    let series = config.series();
    if config.kind.is_radial() {
        let Some(first) = series.first() else {
            return Vec::new();
        };
        return config
            .categories()
            .iter()
            .enumerate()
            .map(|(i, label)| LegendEntry {
                label: label.clone(),
                color: slice_color(first, i, palette),
            })
            .collect();
    }
    series
        .iter()
        .enumerate()
        .map(|(i, s)| LegendEntry {
            label: s.display_name(i).into_owned(),
            color: series_color(s, i, palette),
        })
        .collect()
}

/// Host-provided region that shows the legend next to the chart.
pub trait LegendSurface {
    fn present(&mut self, entries: &[LegendEntry]);
}

/// Lets the host keep a handle on a legend it hands to a view.
impl<T: LegendSurface> LegendSurface for Rc<RefCell<T>> {
    fn present(&mut self, entries: &[LegendEntry]) {
        self.borrow_mut().present(entries);
    }
}

/// Legend as an HTML fragment for a companion markup region.
#[derive(Debug, Default)]
pub struct MarkupLegend {
    markup: String,
    presented: usize,
}

impl MarkupLegend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// How many times the legend has been (re)built.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl LegendSurface for MarkupLegend {
    fn present(&mut self, entries: &[LegendEntry]) {
        self.markup.clear();
        for e in entries {
            // Writing into a String cannot fail.
            let _ = write!(
                self.markup,
                concat!(
                    r#"<div class="legend-item">"#,
                    r#"<span class="legend-color" style="background:{}"></span>"#,
                    r#"<span class="legend-text">{}</span></div>"#,
                ),
                to_css(e.color),
                escape_html(&e.label)
            );
        }
        self.presented += 1;
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const ROW_HEIGHT: f32 = 20.0;
const SWATCH: f32 = 12.0;
const PAD: f32 = 8.0;
const FONT_SIZE: f32 = 12.0;

/// Legend drawn into its own raster: one swatch and label per row.
pub struct RasterLegend {
    surface: RasterSurface,
    theme: Theme,
    text: TextShaper,
    draw_labels: bool,
}

impl RasterLegend {
    pub fn new(size: LogicalSize, dpr: f32, theme: Theme) -> ChartResult<Self> {
        let surface = RasterSurface::new(size, dpr)?;
        Ok(Self { surface, theme, text: TextShaper::new(), draw_labels: true })
    }

    /// Skip glyphs (swatches only); keeps pixel output independent of installed fonts.
    pub fn without_labels(mut self) -> Self {
        self.draw_labels = false;
        self
    }

    pub fn pixels_rgba8(&mut self) -> ChartResult<RgbaFrame> {
        self.surface.read_rgba8()
    }

    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        self.surface.encode_png()
    }
}

impl LegendSurface for RasterLegend {
    fn present(&mut self, entries: &[LegendEntry]) {
        let theme = self.theme;
        let draw_labels = self.draw_labels;
        let canvas = self.surface.begin_frame(theme.background);

        let mut swatch = skia::Paint::default();
        swatch.set_anti_alias(true);
        for (row, e) in entries.iter().enumerate() {
            let top = PAD + row as f32 * ROW_HEIGHT;
            swatch.set_color(e.color);
            canvas.draw_rect(skia::Rect::from_xywh(PAD, top, SWATCH, SWATCH), &swatch);
            if draw_labels {
                self.text.draw(
                    canvas,
                    &e.label,
                    PAD + SWATCH + 6.0,
                    top + SWATCH - 1.0,
                    FONT_SIZE,
                    theme.axis_label,
                    Anchor::Left,
                    false,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChartKind, ColorSpec, Series};

    #[test]
    fn series_entries_fall_back_to_ordinal_names() {
        let cfg = ChartConfig::new(ChartKind::Line)
            .with_categories(["a", "b"])
            .with_series(
                Series::from_numbers(&[1.0, 2.0]).with_name("Revenue").with_stroke("#ff0000"),
            )
            .with_series(Series::from_numbers(&[3.0, 4.0]));
        let e = entries(&cfg, &Palette::default());
        assert_eq!(e.len(), 2);
        assert_eq!(e[0].label, "Revenue");
        assert_eq!(e[0].color, skia::Color::from_argb(255, 255, 0, 0));
        assert_eq!(e[1].label, "Series 2");
        assert_eq!(e[1].color, Palette::default().color_at(1));
    }

    #[test]
    fn pie_entries_follow_categories() {
        let cfg = ChartConfig::new(ChartKind::Pie)
            .with_categories(["x", "y", "z"])
            .with_series(
                Series::from_numbers(&[1.0, 2.0, 3.0])
                    .with_fill(ColorSpec::PerItem(vec!["#000000".into()])),
            );
        let e = entries(&cfg, &Palette::default());
        let labels: Vec<_> = e.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["x", "y", "z"]);
        assert_eq!(e[0].color, skia::Color::BLACK);
        assert_eq!(e[2].color, Palette::default().color_at(2));
    }

    #[test]
    fn markup_is_escaped() {
        let mut legend = MarkupLegend::new();
        legend.present(&[LegendEntry { label: "<b>&</b>".into(), color: skia::Color::BLACK }]);
        assert!(legend.markup().contains("&lt;b&gt;&amp;&lt;/b&gt;"));
        assert!(legend.markup().starts_with(r#"<div class="legend-item">"#));
        assert_eq!(legend.presented(), 1);
    }
}
