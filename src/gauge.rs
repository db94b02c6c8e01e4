use log::{debug, trace, warn};

use crate::config::{Color, GaugeConfig};
use crate::error::{GaugeError, SurfaceError};
use crate::surface::{FontSpec, LinearGradient, Surface, SurfaceResult, TextAlign};

// ============================================================================
// LAYOUT CONSTANTS
// ============================================================================

/// Space kept between the dial and the surface edge for the heading labels.
pub const LABEL_MARGIN: f64 = 20.0;

const OUTLINE_WIDTH: f64 = 2.0;
const HORIZON_WIDTH: f64 = 2.0;
const SCALE_WIDTH: f64 = 1.0;

const LADDER_HALF_LENGTH: f64 = 20.0;
const LADDER_LABEL_GAP: f64 = 15.0;
const LADDER_LABEL_NUDGE: f64 = 4.0;
const LADDER_FONT_PX: f32 = 12.0;

const CARDINAL_TICK_LENGTH: f64 = 15.0;
const CARDINAL_LABEL_OFFSET: f64 = 25.0;
const MINOR_TICK_LENGTH: f64 = 10.0;
const HEADING_LABEL_NUDGE: f64 = 5.0;
const HEADING_FONT_PX: f32 = 14.0;
const CARDINALS: [(f64, &str); 4] = [(0.0, "N"), (90.0, "E"), (180.0, "S"), (270.0, "W")];

const MARKER_WING_INNER: f64 = 10.0;
const MARKER_WING_OUTER: f64 = 50.0;
const MARKER_WING_WIDTH: f64 = 2.0;
const MARKER_CENTER_HALF_LENGTH: f64 = 2.0;
const MARKER_CENTER_WIDTH: f64 = 5.0;
/// The aircraft symbol sits one degree of pitch below center.
const MARKER_PITCH_DEGREES: f64 = 1.0;

const FONT_FAMILY: &str = "Arial";

// ============================================================================
// GEOMETRY
// ============================================================================

/// Wraps a yaw angle into [0, 360).
pub fn normalize_yaw(yaw: f64) -> f64 {
    ((yaw % 360.0) + 360.0) % 360.0
}

/// Vertical pixel shift for `pitch`, mapping +-90 degrees onto +-radius.
pub fn pitch_offset(pitch: f64, radius: f64) -> f64 {
    pitch * (radius / 90.0)
}

/// Compass-convention point: 0 degrees is up, angles grow clockwise.
fn compass_point(cx: f64, cy: f64, degrees: f64, distance: f64) -> (f64, f64) {
    let angle = degrees.to_radians();
    (cx + angle.sin() * distance, cy - angle.cos() * distance)
}

/// Where the dial sits on a surface of the given size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Dial {
    pub fn new(width: f64, height: f64) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        Self {
            cx,
            cy,
            radius: cx.min(cy) - LABEL_MARGIN,
        }
    }

    /// Vertical position of the fixed aircraft marker.
    pub fn marker_y(&self) -> f64 {
        self.cy + pitch_offset(MARKER_PITCH_DEGREES, self.radius)
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Current attitude, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GaugeState {
    pub yaw: f64,
    pub pitch: f64,
}

/// Attitude/heading indicator
#[derive(Debug, Clone)]
pub struct AttitudeGauge {
    config: GaugeConfig,
    state: GaugeState,
}

impl AttitudeGauge {
    pub fn new(config: GaugeConfig) -> Result<Self, GaugeError> {
        config.validate()?;
        Ok(Self {
            config,
            state: GaugeState::default(),
        })
    }

    /// Builds a gauge after checking that `surface` can host it.
    pub fn for_surface<S: Surface + ?Sized>(
        surface: &S,
        config: GaugeConfig,
    ) -> Result<Self, GaugeError> {
        if !surface.is_attached() {
            return Err(GaugeError::Configuration(
                "drawing surface is detached".to_string(),
            ));
        }
        let (width, height) = (surface.width(), surface.height());
        if !(width > 0.0 && height > 0.0) {
            return Err(GaugeError::Configuration(format!(
                "drawing surface has no extent ({width}x{height})"
            )));
        }
        Self::new(config)
    }

    pub fn config(&self) -> &GaugeConfig {
        &self.config
    }

    pub fn state(&self) -> GaugeState {
        self.state
    }

    pub fn yaw(&self) -> f64 {
        self.state.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.state.pitch
    }

    pub fn set_yaw(&mut self, angle: f64) {
        if angle.is_nan() {
            warn!("ignoring NaN yaw");
            return;
        }
        self.state.yaw = angle.clamp(self.config.min_angle, self.config.max_angle);
    }

    pub fn set_pitch(&mut self, angle: f64) {
        if angle.is_nan() {
            warn!("ignoring NaN pitch");
            return;
        }
        self.state.pitch = angle.clamp(self.config.min_pitch, self.config.max_pitch);
    }

    /// Clears `surface` and repaints the whole instrument.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), GaugeError> {
        if !surface.is_attached() {
            return Err(SurfaceError::Detached.into());
        }
        let (width, height) = (surface.width(), surface.height());
        let dial = Dial::new(width, height);
        if !(dial.radius >= 0.0) {
            return Err(SurfaceError::TooSmall { width, height }.into());
        }
        debug!(
            "drawing gauge: yaw {:.2} pitch {:.2} on {}x{} (radius {:.1})",
            self.state.yaw, self.state.pitch, width, height, dial.radius
        );

        surface.clear_rect(0.0, 0.0, width, height)?;
        self.draw_outer_circle(surface, &dial)?;
        self.draw_horizon(surface, &dial)?;
        self.draw_heading_ring(surface, &dial)?;
        self.draw_pitch_ladder(surface, &dial)?;
        self.draw_fixed_markers(surface, &dial)?;
        Ok(())
    }
}

// ============================================================================
// LAYERS
// ============================================================================

impl AttitudeGauge {
    fn draw_outer_circle<S: Surface + ?Sized>(&self, surface: &mut S, dial: &Dial) -> SurfaceResult {
        trace!("outer circle");
        surface.begin_path()?;
        surface.arc(dial.cx, dial.cy, dial.radius, 0.0, std::f64::consts::TAU)?;
        surface.set_stroke_style(self.config.scale_color.into())?;
        surface.set_line_width(OUTLINE_WIDTH)?;
        surface.stroke()
    }

    fn draw_horizon<S: Surface + ?Sized>(&self, surface: &mut S, dial: &Dial) -> SurfaceResult {
        let yaw = normalize_yaw(self.state.yaw);
        let offset = pitch_offset(self.state.pitch, dial.radius);
        trace!("horizon: rotation {:.2} offset {:.2}", -yaw, offset);

        surface.save()?;
        surface.translate(dial.cx, dial.cy)?;
        surface.rotate(-yaw.to_radians())?;

        let gradient = LinearGradient::new(0.0, -dial.radius + offset, 0.0, dial.radius + offset)
            .with_stop(0.0, self.config.sky_color)
            .with_stop(0.5, self.config.sky_color)
            .with_stop(0.5, self.config.ground_color)
            .with_stop(1.0, self.config.ground_color);

        surface.begin_path()?;
        surface.arc(0.0, 0.0, dial.radius, 0.0, std::f64::consts::TAU)?;
        surface.set_fill_style(gradient.into())?;
        surface.fill()?;

        surface.begin_path()?;
        surface.move_to(-dial.radius, offset)?;
        surface.line_to(dial.radius, offset)?;
        surface.set_stroke_style(self.config.scale_color.into())?;
        surface.set_line_width(HORIZON_WIDTH)?;
        surface.stroke()?;

        surface.restore()
    }

    fn begin_scale_text<S: Surface + ?Sized>(&self, surface: &mut S, font_px: f32) -> SurfaceResult {
        surface.set_stroke_style(self.config.scale_color.into())?;
        surface.set_line_width(SCALE_WIDTH)?;
        surface.set_font(FontSpec::new(font_px, FONT_FAMILY))?;
        surface.set_fill_style(self.config.scale_color.into())?;
        surface.set_text_align(TextAlign::Center)
    }

    fn draw_heading_ring<S: Surface + ?Sized>(&self, surface: &mut S, dial: &Dial) -> SurfaceResult {
        trace!("heading ring");
        surface.save()?;
        self.begin_scale_text(surface, HEADING_FONT_PX)?;

        for (degrees, label) in CARDINALS {
            let (x0, y0) = compass_point(dial.cx, dial.cy, degrees, dial.radius - CARDINAL_TICK_LENGTH);
            let (x1, y1) = compass_point(dial.cx, dial.cy, degrees, dial.radius);
            let (lx, ly) = compass_point(
                dial.cx,
                dial.cy,
                degrees,
                dial.radius + CARDINAL_LABEL_OFFSET / 2.0,
            );
            surface.begin_path()?;
            surface.move_to(x0, y0)?;
            surface.line_to(x1, y1)?;
            surface.stroke()?;
            surface.fill_text(label, lx, ly + HEADING_LABEL_NUDGE)?;
        }

        for degrees in (0..360).step_by(30).filter(|d| d % 90 != 0) {
            let (x0, y0) = compass_point(dial.cx, dial.cy, degrees as f64, dial.radius + MINOR_TICK_LENGTH);
            let (x1, y1) = compass_point(dial.cx, dial.cy, degrees as f64, dial.radius);
            surface.begin_path()?;
            surface.move_to(x0, y0)?;
            surface.line_to(x1, y1)?;
            surface.stroke()?;
            surface.fill_text(&(degrees / 10).to_string(), x0, y0 + HEADING_LABEL_NUDGE)?;
        }

        surface.restore()
    }

    fn draw_pitch_ladder<S: Surface + ?Sized>(&self, surface: &mut S, dial: &Dial) -> SurfaceResult {
        trace!("pitch ladder: {} rungs", self.config.pitch_lines);
        surface.save()?;
        self.begin_scale_text(surface, LADDER_FONT_PX)?;

        for i in 1..=self.config.pitch_lines {
            let step = i as f64 * self.config.line_spacing;
            self.draw_rung(surface, dial.cx, dial.cy - step, i)?;
            self.draw_rung(surface, dial.cx, dial.cy + step, i)?;
        }

        surface.restore()
    }

    fn draw_rung<S: Surface + ?Sized>(&self, surface: &mut S, cx: f64, y: f64, i: u32) -> SurfaceResult {
        surface.begin_path()?;
        if i % 2 == 1 {
            let half = LADDER_HALF_LENGTH / 2.0 - 5.0;
            surface.move_to(cx - half, y)?;
            surface.line_to(cx + half, y)?;
        } else {
            let label = (i * 10).to_string();
            let label_x = LADDER_HALF_LENGTH + LADDER_LABEL_GAP;
            surface.move_to(cx - LADDER_HALF_LENGTH, y)?;
            surface.line_to(cx + LADDER_HALF_LENGTH, y)?;
            surface.fill_text(&label, cx + label_x, y + LADDER_LABEL_NUDGE)?;
            surface.fill_text(&label, cx - label_x, y + LADDER_LABEL_NUDGE)?;
        }
        surface.stroke()
    }

    fn draw_fixed_markers<S: Surface + ?Sized>(&self, surface: &mut S, dial: &Dial) -> SurfaceResult {
        let y = dial.marker_y();
        trace!("fixed markers at y {:.2}", y);

        surface.save()?;
        surface.set_stroke_style(Color::RED.into())?;
        surface.set_line_width(MARKER_WING_WIDTH)?;

        surface.begin_path()?;
        surface.move_to(dial.cx - MARKER_WING_OUTER, y)?;
        surface.line_to(dial.cx - MARKER_WING_INNER, y)?;
        surface.move_to(dial.cx + MARKER_WING_INNER, y)?;
        surface.line_to(dial.cx + MARKER_WING_OUTER, y)?;
        surface.stroke()?;

        surface.begin_path()?;
        surface.set_line_width(MARKER_CENTER_WIDTH)?;
        surface.move_to(dial.cx, y + MARKER_CENTER_HALF_LENGTH)?;
        surface.line_to(dial.cx, y - MARKER_CENTER_HALF_LENGTH)?;
        surface.set_stroke_style(Color::YELLOW.into())?;
        surface.stroke()?;

        surface.restore()
    }
}
