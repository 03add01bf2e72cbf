// File: crates/window-demo/src/main.rs
// Summary: Windowed demo driving a ChartView with live window events, blitted via softbuffer.

use std::num::NonZeroU32;
use std::time::Instant;

use anyhow::{Context, Result};
use inline_chart_core::telemetry::init_default_tracing;
use inline_chart_core::{ChartConfig, ChartView, LogicalSize, RenderOptions, RgbaFrame};
use tracing::{error, info};
use winit::event::{ElementState, Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const SAMPLES: [&str; 5] = [
    r##"{ "type": "line",
          "data": { "labels": ["Jan","Feb","Mar","Apr","May","Jun","Jul","Aug"],
                    "datasets": [ { "label": "Smooth", "data": [3, 7, 4, 9, 6, 11, 8, 12], "tension": 0.4, "showPoints": true },
                                  { "label": "Straight", "data": [1, 2, 6, 3, 5, 4, 7, 6] } ] },
          "options": { "title": { "text": "Line (any key for next chart)" } } }"##,
    r##"{ "type": "bar",
          "data": { "labels": ["North","South","East","West"],
                    "datasets": [ { "label": "2024", "data": [10, 20, 5, 14] },
                                  { "label": "2025", "data": [12, 17, 9, -4], "backgroundColor": "#34a853" } ] },
          "options": { "title": { "text": "Grouped bars" } } }"##,
    r##"{ "type": "scatter",
          "data": { "datasets": [ { "label": "Samples", "data": [{"x":1,"y":2},{"x":2,"y":-1},{"x":3,"y":4},{"x":4,"y":3},{"x":5,"y":6}], "pointRadius": 6 } ] },
          "options": { "title": { "text": "Scatter" } } }"##,
    r##"{ "type": "pie",
          "data": { "labels": ["Rust","Go","Zig"], "datasets": [ { "data": [60, 30, 10] } ] },
          "options": { "title": { "text": "Pie" } } }"##,
    r##"{ "type": "doughnut",
          "data": { "labels": ["Done","Doing","Todo"], "datasets": [ { "data": [5, 3, 8], "backgroundColor": ["#34a853","#fbbc05","#ea4335"] } ] },
          "options": { "title": { "text": "Doughnut" } } }"##,
];

fn main() -> Result<()> {
    let _ = init_default_tracing();

    // Arg: optional chart JSON file shown first
    let mut configs = Vec::new();
    if let Some(path) = std::env::args().nth(1) {
        let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
        configs.push(ChartConfig::from_json(&text).with_context(|| format!("parsing {path}"))?);
    }
    for sample in SAMPLES {
        configs.push(ChartConfig::from_json(sample).context("parsing built-in sample")?);
    }

    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Inline Chart - Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(720.0, 400.0))
        .build(&event_loop)
        .context("building window")?;

    let context = unsafe { softbuffer::Context::new(&window) }
        .map_err(|e| anyhow::anyhow!("softbuffer context: {e}"))?;
    let mut surface = unsafe { softbuffer::Surface::new(&context, &window) }
        .map_err(|e| anyhow::anyhow!("softbuffer surface: {e}"))?;

    let mut scale = window.scale_factor();
    let mut idx = 0usize;
    let mut view = ChartView::mount(
        logical_size(window.inner_size(), scale),
        scale as f32,
        configs[0].clone(),
        None,
        RenderOptions::default(),
    )
    .context("mounting chart view")?;
    info!(charts = configs.len(), "window demo ready");

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    view.unmount();
                    *control_flow = ControlFlow::Exit;
                    return;
                }
                WindowEvent::Resized(new_size) => {
                    view.notify_resize(logical_size(new_size, scale), Instant::now());
                }
                WindowEvent::ScaleFactorChanged { scale_factor, new_inner_size } => {
                    scale = scale_factor;
                    view.notify_resize(logical_size(*new_inner_size, scale), Instant::now());
                    if let Err(e) = view.set_device_pixel_ratio(scale as f32) {
                        error!(error = %e, "scale change failed");
                    }
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    // Pointer arrives in physical pixels; the view wants logical ones.
                    view.pointer_move((position.x / scale) as f32, (position.y / scale) as f32);
                    window.request_redraw();
                }
                WindowEvent::CursorLeft { .. } => {
                    view.pointer_leave();
                    window.request_redraw();
                }
                WindowEvent::KeyboardInput { input, .. }
                    if input.state == ElementState::Pressed =>
                {
                    idx = (idx + 1) % configs.len();
                    if let Err(e) = view.reconfigure(configs[idx].clone()) {
                        error!(error = %e, "reconfigure failed");
                    }
                    window.request_redraw();
                }
                _ => {}
            },
            Event::MainEventsCleared => match view.poll(Instant::now()) {
                Ok(true) => window.request_redraw(),
                Ok(false) => {}
                Err(e) => error!(error = %e, "resize render failed"),
            },
            Event::RedrawRequested(_) => {
                if let Err(e) = present(&mut view, &mut surface) {
                    error!(error = %e, "present failed");
                }
            }
            _ => {}
        }

        *control_flow = match view.next_deadline() {
            Some(deadline) => ControlFlow::WaitUntil(deadline),
            None => ControlFlow::Wait,
        };
    });
}

fn logical_size(physical: winit::dpi::PhysicalSize<u32>, scale: f64) -> LogicalSize {
    let logical = physical.to_logical::<f64>(scale);
    LogicalSize::new(logical.width.max(1.0) as f32, logical.height.max(1.0) as f32)
}

fn present(view: &mut ChartView, surface: &mut softbuffer::Surface) -> Result<()> {
    let frame = view.pixels_rgba8()?;
    let (Some(w), Some(h)) = (NonZeroU32::new(frame.width), NonZeroU32::new(frame.height)) else {
        return Ok(());
    };
    surface.resize(w, h).map_err(|e| anyhow::anyhow!("resize buffer: {e}"))?;
    let mut buffer = surface.buffer_mut().map_err(|e| anyhow::anyhow!("buffer: {e}"))?;
    blit(&frame, &mut buffer);
    buffer.present().map_err(|e| anyhow::anyhow!("present: {e}"))?;
    Ok(())
}

/// RGBA8 rows into softbuffer's 0RGB words.
fn blit(frame: &RgbaFrame, out: &mut [u32]) {
    let w = frame.width as usize;
    for (dst_row, src_row) in out.chunks_exact_mut(w).zip(frame.pixels.chunks_exact(frame.stride)) {
        for (dst, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
            *dst = (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_valid() {
        for s in SAMPLES {
            let cfg = ChartConfig::from_json(s).expect("sample parses");
            assert!(cfg.validate().is_ok(), "{:?}", cfg.kind);
        }
    }

    #[test]
    fn blit_packs_rgb() {
        let pixels = vec![1, 2, 3, 255, 10, 20, 30, 255];
        let frame = RgbaFrame { pixels, width: 2, height: 1, stride: 8 };
        let mut out = vec![0u32; 2];
        blit(&frame, &mut out);
        assert_eq!(out, [0x010203, 0x0a141e]);
    }
}
