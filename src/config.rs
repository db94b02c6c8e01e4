use bon::Builder;

use crate::error::GaugeError;

/// Color representation for gauge elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const SKY_BLUE: Color = Color::new(0x87, 0xce, 0xeb);
    pub const SADDLE_BROWN: Color = Color::new(0x8b, 0x45, 0x13);
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);
    pub const RED: Color = Color::new(0xff, 0x00, 0x00);
    pub const YELLOW: Color = Color::new(0xff, 0xff, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses `#rgb` or `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let mut channels = digits
                    .chars()
                    .map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Self::new(
                    channels.next()??,
                    channels.next()??,
                    channels.next()??,
                ))
            }
            6 => Some(Self::new(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            _ => None,
        }
    }

    /// Linear blend towards `other`, `t` in [0, 1].
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

/// Gauge options. Every key falls back to its documented default.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GaugeConfig {
    // Yaw bounds, degrees
    #[builder(default = -360.0)]
    pub min_angle: f64,
    #[builder(default = 360.0)]
    pub max_angle: f64,

    // Pitch bounds, degrees
    #[builder(default = -90.0)]
    pub min_pitch: f64,
    #[builder(default = 90.0)]
    pub max_pitch: f64,

    // Colors
    #[builder(default = Color::SKY_BLUE)]
    pub sky_color: Color,
    #[builder(default = Color::SADDLE_BROWN)]
    pub ground_color: Color,
    #[builder(default = Color::WHITE)]
    pub scale_color: Color,

    // Pitch ladder
    #[builder(default = 6)]
    pub pitch_lines: u32,
    #[builder(default = 10.0)]
    pub line_spacing: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GaugeConfig {
    /// Checks the bound invariants `f64::clamp` relies on.
    pub fn validate(&self) -> Result<(), GaugeError> {
        if !(self.min_angle <= self.max_angle) {
            return Err(GaugeError::Configuration(format!(
                "yaw bounds inverted or NaN: min_angle {} > max_angle {}",
                self.min_angle, self.max_angle
            )));
        }
        if !(self.min_pitch <= self.max_pitch) {
            return Err(GaugeError::Configuration(format!(
                "pitch bounds inverted or NaN: min_pitch {} > max_pitch {}",
                self.min_pitch, self.max_pitch
            )));
        }
        if !self.line_spacing.is_finite() || self.line_spacing < 0.0 {
            return Err(GaugeError::Configuration(format!(
                "line_spacing must be a finite, non-negative pixel count (got {})",
                self.line_spacing
            )));
        }
        Ok(())
    }
}

/// Configuration for the viewer window
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            title: "Attitude".to_string(),
        }
    }
}
