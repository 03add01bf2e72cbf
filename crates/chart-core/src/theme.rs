// File: crates/chart-core/src/theme.rs
// Summary: Dark/Light theming for chart frame, hover overlay and error indicator colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub title: skia::Color,
    pub crosshair: skia::Color,
    pub highlight: skia::Color,
    pub tooltip_background: skia::Color,
    pub tooltip_border: skia::Color,
    pub tooltip_text: skia::Color,
    pub error_background: skia::Color,
    pub error_accent: skia::Color,
    pub error_text: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 13, 13, 13),
            grid: skia::Color::from_argb(38, 255, 255, 255),
            axis_line: skia::Color::from_argb(255, 102, 102, 102),
            axis_label: skia::Color::from_argb(255, 170, 170, 170),
            title: skia::Color::from_argb(255, 235, 235, 245),
            crosshair: skia::Color::from_argb(128, 255, 255, 255),
            highlight: skia::Color::from_argb(255, 255, 255, 255),
            tooltip_background: skia::Color::from_argb(242, 20, 20, 22),
            tooltip_border: skia::Color::from_argb(255, 68, 68, 68),
            tooltip_text: skia::Color::from_argb(255, 255, 255, 255),
            error_background: skia::Color::from_argb(255, 58, 20, 22),
            error_accent: skia::Color::from_argb(255, 234, 67, 53),
            error_text: skia::Color::from_argb(255, 255, 205, 205),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 80, 80, 90),
            title: skia::Color::from_argb(255, 20, 20, 30),
            crosshair: skia::Color::from_argb(128, 30, 30, 40),
            highlight: skia::Color::from_argb(255, 30, 120, 240),
            tooltip_background: skia::Color::from_argb(242, 255, 255, 255),
            tooltip_border: skia::Color::from_argb(255, 200, 200, 210),
            tooltip_text: skia::Color::from_argb(255, 20, 20, 30),
            error_background: skia::Color::from_argb(255, 253, 236, 234),
            error_accent: skia::Color::from_argb(255, 200, 60, 60),
            error_text: skia::Color::from_argb(255, 120, 20, 20),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    presets()
        .into_iter()
        .find(|t| t.name.eq_ignore_ascii_case(name))
        .unwrap_or_else(Theme::dark)
}
