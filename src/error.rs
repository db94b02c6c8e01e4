use thiserror::Error;

/// Failures reported by a drawing surface.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    #[error("surface is detached")]
    Detached,

    #[error("surface {width}x{height} is too small to hold the gauge")]
    TooSmall { width: f64, height: f64 },

    #[error("frame buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the gauge API
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GaugeError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("pixel buffer error: {0}")]
    Pixels(#[from] pixels::Error),

    #[error(transparent)]
    Gauge(#[from] GaugeError),
}
