// ============================================================================
// RETAINED MODE RECORDING
// ============================================================================

use crate::error::SurfaceError;
use crate::surface::{FontSpec, Paint, Surface, SurfaceResult, TextAlign};

/// One recorded surface call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Save,
    Restore,
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate(f64),
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    StrokeStyle(Paint),
    FillStyle(Paint),
    LineWidth(f64),
    Stroke,
    Fill,
    Font(FontSpec),
    TextAlign(TextAlign),
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
}

/// A surface that keeps every call instead of rasterizing it.
///
/// Two frames are identical when their command lists compare equal.
#[derive(Debug, Clone)]
pub struct Scene {
    width: f64,
    height: f64,
    attached: bool,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            attached: true,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Simulates the backing surface going away; later calls fail.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Labels drawn with `fill_text`, in order.
    pub fn texts(&self) -> impl Iterator<Item = (&str, f64, f64)> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText { text, x, y } => Some((text.as_str(), *x, *y)),
            _ => None,
        })
    }

    fn add_command(&mut self, command: DrawCommand) -> SurfaceResult {
        if !self.attached {
            return Err(SurfaceError::Detached);
        }
        self.commands.push(command);
        Ok(())
    }
}

impl Surface for Scene {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> SurfaceResult {
        self.add_command(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        })
    }

    fn save(&mut self) -> SurfaceResult {
        self.add_command(DrawCommand::Save)
    }

    fn restore(&mut self) -> SurfaceResult {
        self.add_command(DrawCommand::Restore)
    }

    fn translate(&mut self, dx: f64, dy: f64) -> SurfaceResult {
        self.add_command(DrawCommand::Translate { dx, dy })
    }

    fn rotate(&mut self, radians: f64) -> SurfaceResult {
        self.add_command(DrawCommand::Rotate(radians))
    }

    fn begin_path(&mut self) -> SurfaceResult {
        self.add_command(DrawCommand::BeginPath)
    }

    fn move_to(&mut self, x: f64, y: f64) -> SurfaceResult {
        self.add_command(DrawCommand::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f64, y: f64) -> SurfaceResult {
        self.add_command(DrawCommand::LineTo { x, y })
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) -> SurfaceResult {
        self.add_command(DrawCommand::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        })
    }

    fn set_stroke_style(&mut self, paint: Paint) -> SurfaceResult {
        self.add_command(DrawCommand::StrokeStyle(paint))
    }

    fn set_fill_style(&mut self, paint: Paint) -> SurfaceResult {
        self.add_command(DrawCommand::FillStyle(paint))
    }

    fn set_line_width(&mut self, width: f64) -> SurfaceResult {
        self.add_command(DrawCommand::LineWidth(width))
    }

    fn stroke(&mut self) -> SurfaceResult {
        self.add_command(DrawCommand::Stroke)
    }

    fn fill(&mut self) -> SurfaceResult {
        self.add_command(DrawCommand::Fill)
    }

    fn set_font(&mut self, font: FontSpec) -> SurfaceResult {
        self.add_command(DrawCommand::Font(font))
    }

    fn set_text_align(&mut self, align: TextAlign) -> SurfaceResult {
        self.add_command(DrawCommand::TextAlign(align))
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> SurfaceResult {
        self.add_command(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
        })
    }
}
