// File: crates/chart-core/src/error.rs
// Summary: Error taxonomy for config parsing, validation, surfaces and export.

use thiserror::Error;

use crate::config::ChartKind;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid chart JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("chart config has no {0}")]
    MissingData(&'static str),

    #[error(
        "{kind} series {series_index} has {values} values but there are {categories} categories"
    )]
    LengthMismatch {
        kind: ChartKind,
        series_index: usize,
        values: usize,
        categories: usize,
    },

    #[error("invalid surface: width={width}, height={height}, dpr={dpr}")]
    InvalidSurface { width: f32, height: f32, dpr: f32 },

    #[error("failed to allocate a {width}x{height} raster surface")]
    SurfaceAllocation { width: i32, height: i32 },

    #[error("failed to read back surface pixels")]
    PixelReadback,

    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    /// True for errors caused by the chart description rather than the host environment.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ChartError::Parse(_) | ChartError::MissingData(_) | ChartError::LengthMismatch { .. }
        )
    }
}
