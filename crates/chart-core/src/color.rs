// File: crates/chart-core/src/color.rs
// Summary: CSS color string parsing, default series palette and per-series color resolution.

use skia_safe as skia;
use tracing::warn;

use crate::config::Series;

/// Default series colors, cycled by series (or slice) index.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#4285f4", "#ea4335", "#34a853", "#fbbc05", "#9c27b0", "#ff9800", "#00bcd4", "#e91e63",
];

/// Ordered, non-empty list of fallback colors owned by a chart view.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<skia::Color>,
}

impl Palette {
    /// Build from CSS strings, skipping unparseable ones. Falls back to the default
    /// palette if nothing parses.
    pub fn from_css<'a>(colors: impl IntoIterator<Item = &'a str>) -> Self {
        let colors: Vec<_> = colors.into_iter().filter_map(parse_css_color).collect();
        if colors.is_empty() { Self::default() } else { Self { colors } }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `index`, cycling past the end.
    pub fn color_at(&self, index: usize) -> skia::Color {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_PALETTE.iter().filter_map(|c| parse_css_color(c)).collect() }
    }
}

/// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(...)`, `rgba(...)` or a basic
/// named color.
pub fn parse_css_color(input: &str) -> Option<skia::Color> {
    let s = input.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = s.to_ascii_lowercase();
    if let Some(body) = lower.strip_prefix("rgba(").or_else(|| lower.strip_prefix("rgb(")) {
        return parse_rgb_fn(body.strip_suffix(')')?);
    }
    named(&lower)
}

fn parse_hex(hex: &str) -> Option<skia::Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(skia::Color::from_argb(255, nib(0)?, nib(1)?, nib(2)?)),
        4 => Some(skia::Color::from_argb(nib(3)?, nib(0)?, nib(1)?, nib(2)?)),
        6 => Some(skia::Color::from_argb(255, byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(skia::Color::from_argb(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => None,
    }
}

fn parse_rgb_fn(body: &str) -> Option<skia::Color> {
    let parts: Vec<&str> = body
        .split(|c| c == ',' || c == '/')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    let parts = if parts.len() == 1 {
        // Space-separated syntax: rgb(255 0 0)
        body.split_whitespace().collect::<Vec<_>>()
    } else {
        parts
    };
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<u8> {
        if let Some(pct) = p.strip_suffix('%') {
            let v: f32 = pct.trim().parse().ok()?;
            Some((v.clamp(0.0, 100.0) * 2.55).round() as u8)
        } else {
            let v: f32 = p.parse().ok()?;
            Some(v.clamp(0.0, 255.0).round() as u8)
        }
    };
    let alpha = match parts.get(3) {
        None => 255,
        Some(p) => {
            let a: f32 = match p.strip_suffix('%') {
                Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
                None => p.parse().ok()?,
            };
            (a.clamp(0.0, 1.0) * 255.0).round() as u8
        }
    };
    Some(skia::Color::from_argb(alpha, channel(parts[0])?, channel(parts[1])?, channel(parts[2])?))
}

fn named(name: &str) -> Option<skia::Color> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "magenta" | "fuchsia" => (255, 0, 255),
        "cyan" | "aqua" => (0, 255, 255),
        "pink" => (255, 192, 203),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "transparent" => return Some(skia::Color::TRANSPARENT),
        _ => return None,
    };
    Some(skia::Color::from_argb(255, rgb.0, rgb.1, rgb.2))
}

/// Format a color the way legend markup expects it.
pub fn to_css(color: skia::Color) -> String {
    if color.a() == 255 {
        format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
    } else {
        let alpha = (color.a() as f32 / 255.0 * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", color.r(), color.g(), color.b(), alpha)
    }
}

fn parse_or_warn(raw: &str, what: &str, index: usize) -> Option<skia::Color> {
    let parsed = parse_css_color(raw);
    if parsed.is_none() {
        warn!(color = raw, what, index, "unparseable color; using palette");
    }
    parsed
}

/// Series color: stroke, else first fill, else the palette slot for `index`.
pub fn series_color(series: &Series, index: usize, palette: &Palette) -> skia::Color {
    series
        .stroke_color
        .as_deref()
        .or_else(|| series.fill_color.as_ref().and_then(|f| f.first()))
        .and_then(|raw| parse_or_warn(raw, "series", index))
        .unwrap_or_else(|| palette.color_at(index))
}

/// Bar fill: explicit fill first, then the series color.
pub fn bar_fill(series: &Series, index: usize, palette: &Palette) -> skia::Color {
    series
        .fill_color
        .as_ref()
        .and_then(|f| f.first())
        .and_then(|raw| parse_or_warn(raw, "bar", index))
        .unwrap_or_else(|| series_color(series, index, palette))
}

/// Pie slice color: per-item fill, else the palette slot for the slice.
pub fn slice_color(series: &Series, slice: usize, palette: &Palette) -> skia::Color {
    series
        .fill_color
        .as_ref()
        .and_then(|f| f.get(slice))
        .and_then(|raw| parse_or_warn(raw, "slice", slice))
        .unwrap_or_else(|| palette.color_at(slice))
}
