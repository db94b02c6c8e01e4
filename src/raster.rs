//! Software rendering of [`Surface`] calls into an RGBA8 frame.
//!
//! Paths are flattened into device-space polylines as they are built, so the
//! transform in effect at `move_to`/`line_to`/`arc` time is the one that counts.
//! Gradients are resolved with the transform in effect at `fill`/`stroke` time.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::Color;
use crate::error::SurfaceError;
use crate::surface::{FontSpec, Paint, Surface, SurfaceResult, TextAlign};

// ============================================================================
// TRANSFORM & STATE
// ============================================================================

/// 2D affine transform: `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    const IDENTITY: Transform = Transform {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let (a, b, c, d) = (self.a, self.b, self.c, self.d);
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }

    /// Uniform scale factor, used to pick arc tessellation density.
    fn scale(&self) -> f64 {
        (self.a * self.d - self.b * self.c).abs().sqrt()
    }
}

#[derive(Debug, Clone)]
struct DrawState {
    transform: Transform,
    stroke: Paint,
    fill: Paint,
    line_width: f64,
    font_px: f32,
    align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            stroke: Paint::Solid(Color::new(0, 0, 0)),
            fill: Paint::Solid(Color::new(0, 0, 0)),
            line_width: 1.0,
            font_px: 10.0,
            align: TextAlign::Left,
        }
    }
}

// ============================================================================
// CANVAS
// ============================================================================

/// A [`Surface`] backed by an RGBA8 frame buffer (4 bytes per pixel, row major).
pub struct PixelCanvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    font: Option<&'a Font<'static>>,
    state: DrawState,
    stack: Vec<DrawState>,
    // Flattened subpaths in device space
    path: Vec<Vec<(f64, f64)>>,
}

impl<'a> PixelCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Result<Self, SurfaceError> {
        let expected = width * height * 4;
        if frame.len() != expected {
            return Err(SurfaceError::BufferSizeMismatch {
                expected,
                actual: frame.len(),
            });
        }
        Ok(Self {
            frame,
            width,
            height,
            font: None,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        })
    }

    /// Text is skipped unless a font is supplied.
    pub fn with_font(mut self, font: &'a Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let mut rgba = [0u8; 4];
        rgba.copy_from_slice(&self.frame[idx..idx + 4]);
        Some(rgba)
    }

    fn current_subpath(&mut self) -> &mut Vec<(f64, f64)> {
        if self.path.is_empty() {
            self.path.push(Vec::new());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }

    fn paint_color(&self, paint: &Paint, x: f64, y: f64) -> Color {
        match paint {
            Paint::Solid(color) => *color,
            Paint::Linear(gradient) => {
                let t = &self.state.transform;
                let (x0, y0) = t.apply(gradient.x0, gradient.y0);
                let (x1, y1) = t.apply(gradient.x1, gradient.y1);
                let (dx, dy) = (x1 - x0, y1 - y0);
                let len_sq = dx * dx + dy * dy;
                if len_sq <= f64::EPSILON {
                    return gradient.color_at(0.0);
                }
                gradient.color_at(((x - x0) * dx + (y - y0) * dy) / len_sq)
            }
        }
    }

    fn text_width(font: &Font<'static>, text: &str, scale: Scale) -> f32 {
        let glyphs: Vec<PositionedGlyph> = font.layout(text, scale, point(0.0, 0.0)).collect();
        match (glyphs.first(), glyphs.last()) {
            (Some(first), Some(last)) => {
                last.position().x - first.position().x
                    + last.unpositioned().h_metrics().advance_width
            }
            _ => 0.0,
        }
    }
}

impl Surface for PixelCanvas<'_> {
    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> SurfaceResult {
        let t = self.state.transform;
        let corners = [
            t.apply(x, y),
            t.apply(x + width, y),
            t.apply(x, y + height),
            t.apply(x + width, y + height),
        ];
        let (min_x, max_x, min_y, max_y) = corners.iter().fold(
            (f64::MAX, f64::MIN, f64::MAX, f64::MIN),
            |(min_x, max_x, min_y, max_y), &(px, py)| {
                (min_x.min(px), max_x.max(px), min_y.min(py), max_y.max(py))
            },
        );
        let x0 = min_x.round().clamp(0.0, self.width as f64) as usize;
        let x1 = max_x.round().clamp(0.0, self.width as f64) as usize;
        let y0 = min_y.round().clamp(0.0, self.height as f64) as usize;
        let y1 = max_y.round().clamp(0.0, self.height as f64) as usize;
        for row in y0..y1 {
            let start = (row * self.width + x0) * 4;
            let end = (row * self.width + x1) * 4;
            self.frame[start..end].fill(0);
        }
        Ok(())
    }

    fn save(&mut self) -> SurfaceResult {
        self.stack.push(self.state.clone());
        Ok(())
    }

    fn restore(&mut self) -> SurfaceResult {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
        Ok(())
    }

    fn translate(&mut self, dx: f64, dy: f64) -> SurfaceResult {
        self.state.transform.translate(dx, dy);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> SurfaceResult {
        if radians.is_finite() {
            self.state.transform.rotate(radians);
        }
        Ok(())
    }

    fn begin_path(&mut self) -> SurfaceResult {
        self.path.clear();
        Ok(())
    }

    fn move_to(&mut self, x: f64, y: f64) -> SurfaceResult {
        let p = self.state.transform.apply(x, y);
        self.path.push(vec![p]);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> SurfaceResult {
        let p = self.state.transform.apply(x, y);
        self.current_subpath().push(p);
        Ok(())
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> SurfaceResult {
        if radius < 0.0 {
            return Err(SurfaceError::Backend(format!("negative arc radius {radius}")));
        }
        let tau = std::f64::consts::TAU;
        let mut sweep = end - start;
        if sweep >= tau {
            sweep = tau;
        } else if sweep < 0.0 {
            sweep = sweep.rem_euclid(tau);
        }
        let device_radius = radius * self.state.transform.scale();
        let segments = ((sweep * device_radius / 2.0).ceil() as usize).clamp(8, 720);
        let transform = self.state.transform;
        let points: Vec<(f64, f64)> = (0..=segments)
            .map(|i| {
                let angle = start + sweep * i as f64 / segments as f64;
                transform.apply(cx + angle.cos() * radius, cy + angle.sin() * radius)
            })
            .collect();
        self.current_subpath().extend(points);
        Ok(())
    }

    fn set_stroke_style(&mut self, paint: Paint) -> SurfaceResult {
        self.state.stroke = paint;
        Ok(())
    }

    fn set_fill_style(&mut self, paint: Paint) -> SurfaceResult {
        self.state.fill = paint;
        Ok(())
    }

    fn set_line_width(&mut self, width: f64) -> SurfaceResult {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
        Ok(())
    }

    fn stroke(&mut self) -> SurfaceResult {
        let thickness = (self.state.line_width * self.state.transform.scale()) as f32;
        let segments: Vec<((f64, f64), (f64, f64))> = self
            .path
            .iter()
            .flat_map(|subpath| subpath.windows(2).map(|w| (w[0], w[1])))
            .collect();
        for ((x0, y0), (x1, y1)) in segments {
            let color = self.paint_color(&self.state.stroke, (x0 + x1) / 2.0, (y0 + y1) / 2.0);
            draw_thick_line_aa(
                self.frame,
                self.width,
                x0 as f32,
                y0 as f32,
                x1 as f32,
                y1 as f32,
                thickness,
                color,
            );
        }
        Ok(())
    }

    fn fill(&mut self) -> SurfaceResult {
        let polygons: Vec<&Vec<(f64, f64)>> = self.path.iter().filter(|p| p.len() >= 3).collect();
        if polygons.is_empty() {
            return Ok(());
        }
        let min_y = polygons
            .iter()
            .flat_map(|p| p.iter().map(|&(_, y)| y))
            .fold(f64::MAX, f64::min);
        let max_y = polygons
            .iter()
            .flat_map(|p| p.iter().map(|&(_, y)| y))
            .fold(f64::MIN, f64::max);
        let row_start = min_y.floor().max(0.0) as usize;
        let row_end = (max_y.ceil().max(0.0) as usize).min(self.height);

        let mut spans: Vec<(usize, usize, usize)> = Vec::new();
        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for row in row_start..row_end {
            let yc = row as f64 + 0.5;
            crossings.clear();
            for polygon in &polygons {
                let n = polygon.len();
                for i in 0..n {
                    let (x0, y0) = polygon[i];
                    let (x1, y1) = polygon[(i + 1) % n];
                    if (y0 <= yc && y1 > yc) || (y1 <= yc && y0 > yc) {
                        let x = x0 + (yc - y0) / (y1 - y0) * (x1 - x0);
                        crossings.push((x, if y1 > y0 { 1 } else { -1 }));
                    }
                }
            }
            crossings.sort_by(|a, b| a.0.total_cmp(&b.0));

            // non-zero winding
            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                let start = ((pair[0].0 - 0.5).ceil().max(0.0) as usize).min(self.width);
                let end = ((pair[1].0 - 0.5).ceil().max(0.0) as usize).min(self.width);
                if start < end {
                    spans.push((row, start, end));
                }
            }
        }

        for (row, start, end) in spans {
            for x in start..end {
                let color = self.paint_color(&self.state.fill, x as f64 + 0.5, row as f64 + 0.5);
                set_pixel(self.frame, self.width, x, row, color, 1.0);
            }
        }
        Ok(())
    }

    fn set_font(&mut self, font: FontSpec) -> SurfaceResult {
        if font.size_px > 0.0 {
            self.state.font_px = font.size_px;
        }
        Ok(())
    }

    fn set_text_align(&mut self, align: TextAlign) -> SurfaceResult {
        self.state.align = align;
        Ok(())
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> SurfaceResult {
        let Some(font) = self.font else {
            return Ok(());
        };
        let scale = Scale::uniform(self.state.font_px);
        let (ox, oy) = self.state.transform.apply(x, y);
        let width = Self::text_width(font, text, scale) as f64;
        let left = match self.state.align {
            TextAlign::Left => ox,
            TextAlign::Center => ox - width / 2.0,
            TextAlign::Right => ox - width,
        };
        let color = self.paint_color(&self.state.fill, ox, oy);
        draw_text(
            self.frame,
            self.width,
            self.height,
            left as f32,
            oy as f32,
            text,
            font,
            scale,
            color,
        );
        Ok(())
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, color: Color, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let a = alpha.clamp(0.0, 1.0);
        let src = [color.r as f32, color.g as f32, color.b as f32];
        let dst = [frame[idx] as f32, frame[idx + 1] as f32, frame[idx + 2] as f32];
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_thick_line_aa(
    frame: &mut [u8],
    width: usize,
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
    thickness: f32,
    color: Color,
) {
    let pad = thickness.ceil() + 1.0;
    let min_x = (x0.min(x1) - pad).floor().max(0.0) as i32;
    let max_x = (x0.max(x1) + pad).ceil() as i32;
    let min_y = (y0.min(y1) - pad).floor().max(0.0) as i32;
    let max_y = (y0.max(y1) + pad).ceil() as i32;
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            // sample at the pixel center
            let px = x as f32 + 0.5 - x0;
            let py = y as f32 + 0.5 - y0;
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let lx = t * dx;
            let ly = t * dy;
            let dist = ((lx - px).powi(2) + (ly - py).powi(2)).sqrt();
            let aa = (1.0 - (dist - thickness / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(frame, width, x as usize, y as usize, color, aa);
            }
        }
    }
}

fn draw_text(
    frame: &mut [u8],
    width: usize,
    height: usize,
    left: f32,
    baseline: f32,
    text: &str,
    font: &Font<'static>,
    scale: Scale,
    color: Color,
) {
    for glyph in font.layout(text, scale, point(left, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = bb.min.x + gx as i32;
                let py = bb.min.y + gy as i32;
                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 {
                    set_pixel(frame, width, px as usize, py as usize, color, v);
                }
            });
        }
    }
}
