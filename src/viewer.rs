use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::WindowConfig;
use crate::error::{GaugeError, ViewerError};
use crate::gauge::AttitudeGauge;
use crate::raster::PixelCanvas;

/// Places tried when no font path is given.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loads a TTF/OTF font for labels, trying `path` first and then a few
/// common system locations. Returns `None` when nothing usable is found.
pub fn load_font(path: Option<&Path>) -> Option<Font<'static>> {
    let candidates: Vec<PathBuf> = match path {
        Some(path) => vec![path.to_path_buf()],
        None => FALLBACK_FONTS.iter().map(PathBuf::from).collect(),
    };
    for candidate in candidates {
        match std::fs::read(&candidate) {
            Ok(data) => match Font::try_from_vec(data) {
                Some(font) => {
                    info!("using font {}", candidate.display());
                    return Some(font);
                }
                None => warn!("{} is not a usable font", candidate.display()),
            },
            Err(err) => debug!("font {} unavailable: {}", candidate.display(), err),
        }
    }
    warn!("no font found, labels will not be drawn");
    None
}

/// Opens a window and keeps the gauge painted until it is closed.
///
/// The gauge is redrawn only when the window system asks for it.
pub fn show(
    gauge: &AttitudeGauge,
    window_config: &WindowConfig,
    font: Option<&Font<'static>>,
) -> Result<(), ViewerError> {
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title(&window_config.title)
        .with_inner_size(LogicalSize::new(
            window_config.width as f64,
            window_config.height as f64,
        ))
        .build(&event_loop)?;

    let window = std::sync::Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let mut fb_width = size.width as usize;
    let mut fb_height = size.height as usize;
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    window.request_redraw();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Wait);
        if let Event::WindowEvent { event, .. } = event {
            match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width == 0 || new_size.height == 0 {
                        return;
                    }
                    fb_width = new_size.width as usize;
                    fb_height = new_size.height as usize;
                    if let Err(err) = pixels.resize_buffer(new_size.width, new_size.height) {
                        error!("failed to resize pixel buffer: {}", err);
                    }
                    if let Err(err) = pixels.resize_surface(new_size.width, new_size.height) {
                        error!("failed to resize surface: {}", err);
                    }
                    window_clone.request_redraw();
                }
                WindowEvent::RedrawRequested => {
                    let frame = pixels.frame_mut();
                    let painted = PixelCanvas::new(frame, fb_width, fb_height)
                        .map_err(GaugeError::from)
                        .and_then(|mut canvas| {
                            if let Some(font) = font {
                                canvas = canvas.with_font(font);
                            }
                            gauge.draw(&mut canvas)
                        });
                    if let Err(err) = painted {
                        error!("redraw failed: {}", err);
                        window_target.exit();
                        return;
                    }
                    if let Err(err) = pixels.render() {
                        error!("render failed: {}", err);
                        window_target.exit();
                    }
                }
                _ => {}
            }
        }
    })?;

    Ok(())
}
