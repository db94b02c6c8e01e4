//! The drawing surface the gauge paints onto.
//!
//! The trait mirrors a 2D canvas context: a transform stack, path construction,
//! stroke/fill with solid or gradient paint, and centered text. Any backend that
//! can express these operations can host the gauge.

use crate::config::Color;
use crate::error::SurfaceError;

pub type SurfaceResult = Result<(), SurfaceError>;

/// A color stop of a linear gradient. Offsets lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: Color,
}

/// Linear gradient between two points in user space.
///
/// Stops sharing an offset produce a hard edge: the later stop wins from that
/// offset on.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0,
            y0,
            x1,
            y1,
            stops: Vec::new(),
        }
    }

    pub fn with_stop(mut self, offset: f64, color: Color) -> Self {
        self.stops.push(ColorStop {
            offset: offset.clamp(0.0, 1.0),
            color,
        });
        self
    }

    /// Color at parameter `t` along the gradient axis.
    pub fn color_at(&self, t: f64) -> Color {
        let Some(first) = self.stops.first() else {
            return Color::new(0, 0, 0);
        };
        if t < first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (s0, s1) = (pair[0], pair[1]);
            if t < s1.offset {
                let span = s1.offset - s0.offset;
                if span <= 0.0 {
                    return s1.color;
                }
                return s0.color.lerp(s1.color, (t - s0.offset) / span);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// Stroke or fill source
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(color: Color) -> Self {
        Paint::Solid(color)
    }
}

impl From<LinearGradient> for Paint {
    fn from(gradient: LinearGradient) -> Self {
        Paint::Linear(gradient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font selection: a pixel size and a family name.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub size_px: f32,
    pub family: String,
}

impl FontSpec {
    pub fn new(size_px: f32, family: &str) -> Self {
        Self {
            size_px,
            family: family.to_string(),
        }
    }
}

/// Primitive operations the gauge issues. Angles are radians, arcs run
/// clockwise in screen space (y grows downwards).
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    /// False once the surface has been detached or destroyed.
    fn is_attached(&self) -> bool {
        true
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> SurfaceResult;

    fn save(&mut self) -> SurfaceResult;
    fn restore(&mut self) -> SurfaceResult;
    fn translate(&mut self, dx: f64, dy: f64) -> SurfaceResult;
    fn rotate(&mut self, radians: f64) -> SurfaceResult;

    fn begin_path(&mut self) -> SurfaceResult;
    fn move_to(&mut self, x: f64, y: f64) -> SurfaceResult;
    fn line_to(&mut self, x: f64, y: f64) -> SurfaceResult;
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> SurfaceResult;

    fn set_stroke_style(&mut self, paint: Paint) -> SurfaceResult;
    fn set_fill_style(&mut self, paint: Paint) -> SurfaceResult;
    fn set_line_width(&mut self, width: f64) -> SurfaceResult;
    fn stroke(&mut self) -> SurfaceResult;
    fn fill(&mut self) -> SurfaceResult;

    fn set_font(&mut self, font: FontSpec) -> SurfaceResult;
    fn set_text_align(&mut self, align: TextAlign) -> SurfaceResult;
    /// Draws `text` with its baseline at `y`, aligned on `x`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> SurfaceResult;
}
