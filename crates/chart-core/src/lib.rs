// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the config model, renderers and ChartView.

pub mod chart;
pub mod color;
pub mod config;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod legend;
pub mod scale;
pub mod series;
pub mod surface;
pub mod telemetry;
pub mod text;
pub mod theme;
pub mod types;

pub use chart::{ChartView, RenderOptions};
pub use color::Palette;
pub use config::{ChartConfig, ChartKind, ColorSpec, DataValue, Series};
pub use error::{ChartError, ChartResult};
pub use interaction::{HitCandidate, HoverState, Tooltip};
pub use legend::{LegendEntry, LegendSurface, MarkupLegend, RasterLegend};
pub use scale::Domain;
pub use series::{renderer_for, SeriesRenderer};
pub use surface::RgbaFrame;
pub use text::TextShaper;
pub use theme::Theme;
pub use types::{Insets, LogicalSize};
