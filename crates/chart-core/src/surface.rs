// File: crates/chart-core/src/surface.rs
// Summary: Device-pixel-ratio aware CPU raster surface with RGBA8 readback and PNG export.

use skia_safe as skia;

use crate::error::{ChartError, ChartResult};
use crate::types::LogicalSize;

/// Tightly packed RGBA8 pixels of a rendered frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub stride: usize,
}

impl RgbaFrame {
    /// RGBA of the physical pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = y as usize * self.stride + x as usize * 4;
        self.pixels.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Raster surface sized `ceil(logical * dpr)` physical pixels. All drawing happens in
/// logical coordinates; `begin_frame` installs the scale.
pub struct RasterSurface {
    surface: skia::Surface,
    logical: LogicalSize,
    dpr: f32,
}

impl RasterSurface {
    pub fn new(logical: LogicalSize, dpr: f32) -> ChartResult<Self> {
        if !logical.is_valid() || !dpr.is_finite() || dpr <= 0.0 {
            return Err(ChartError::InvalidSurface {
                width: logical.width,
                height: logical.height,
                dpr,
            });
        }
        let (width, height) = physical_size(logical, dpr);
        let surface = skia::surfaces::raster_n32_premul((width, height))
            .ok_or(ChartError::SurfaceAllocation { width, height })?;
        Ok(Self { surface, logical, dpr })
    }

    pub fn logical_size(&self) -> LogicalSize {
        self.logical
    }

    pub fn dpr(&self) -> f32 {
        self.dpr
    }

    pub fn physical_size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    /// True when the backing buffer already matches this size and ratio.
    pub fn matches(&self, logical: LogicalSize, dpr: f32) -> bool {
        self.logical == logical && self.dpr == dpr
    }

    /// Reset transform, clear to `background`, and scale to logical units.
    pub fn begin_frame(&mut self, background: skia::Color) -> &skia::Canvas {
        let dpr = self.dpr;
        let canvas = self.surface.canvas();
        canvas.restore_to_count(1);
        canvas.reset_matrix();
        canvas.clear(background);
        canvas.scale((dpr, dpr));
        canvas
    }

    /// Canvas with whatever transform the last `begin_frame` installed.
    pub fn canvas(&mut self) -> &skia::Canvas {
        self.surface.canvas()
    }

    pub fn read_rgba8(&mut self) -> ChartResult<RgbaFrame> {
        let (w, h) = self.physical_size();
        let info = skia::ImageInfo::new(
            (w, h),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !self.surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            return Err(ChartError::PixelReadback);
        }
        Ok(RgbaFrame { pixels, width: w as u32, height: h as u32, stride })
    }

    pub fn encode_png(&mut self) -> ChartResult<Vec<u8>> {
        let frame = self.read_rgba8()?;
        encode_png(&frame)
    }
}

/// Physical buffer size for a logical size at a device pixel ratio (at least 1x1).
pub fn physical_size(logical: LogicalSize, dpr: f32) -> (i32, i32) {
    let w = (logical.width * dpr).ceil().max(1.0) as i32;
    let h = (logical.height * dpr).ceil().max(1.0) as i32;
    (w, h)
}

pub fn encode_png(frame: &RgbaFrame) -> ChartResult<Vec<u8>> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::write_buffer_with_format(
        &mut out,
        &frame.pixels,
        frame.width,
        frame.height,
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physical_size_rounds_up() {
        assert_eq!(physical_size(LogicalSize::new(100.0, 50.0), 1.0), (100, 50));
        assert_eq!(physical_size(LogicalSize::new(100.0, 50.0), 2.0), (200, 100));
        assert_eq!(physical_size(LogicalSize::new(100.5, 50.0), 1.5), (151, 75));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(RasterSurface::new(LogicalSize::new(0.0, 10.0), 1.0).is_err());
        assert!(RasterSurface::new(LogicalSize::new(10.0, 10.0), 0.0).is_err());
        assert!(RasterSurface::new(LogicalSize::new(f32::NAN, 10.0), 1.0).is_err());
    }

    #[test]
    fn clears_to_background() {
        let mut s = RasterSurface::new(LogicalSize::new(8.0, 4.0), 2.0).expect("surface");
        s.begin_frame(skia::Color::from_argb(255, 10, 20, 30));
        let frame = s.read_rgba8().expect("read");
        assert_eq!((frame.width, frame.height), (16, 8));
        assert_eq!(frame.pixel(15, 7), Some([10, 20, 30, 255]));
        assert_eq!(frame.pixel(16, 0), None);
    }

    #[test]
    fn png_has_signature() {
        let mut s = RasterSurface::new(LogicalSize::new(4.0, 4.0), 1.0).expect("surface");
        s.begin_frame(skia::Color::BLACK);
        let bytes = s.encode_png().expect("png");
        assert!(bytes.starts_with(&[137, 80, 78, 71]));
    }
}
