use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, RenderRect, TextPrimitive};

/// One recorded surface operation with the state it resolved against.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    SetGlobalAlpha(f64),
    FillRect(RenderRect),
    FillText(TextPrimitive),
}

/// Backend-agnostic recording of one draw pass.
///
/// `RenderFrame` is itself a [`DrawingSurface`]: renderers draw into it and a
/// backend replays it later, which keeps the drawing code testable without a
/// real canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
    fill_color: Color,
    font: FontSpec,
    global_alpha: f64,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            fill_color: Color::TRANSPARENT,
            font: FontSpec::new(10.0, "sans-serif"),
            global_alpha: 1.0,
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = &RenderRect> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillRect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::FillText(text) => Some(text),
            _ => None,
        })
    }

    #[must_use]
    pub fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.global_alpha = 1.0;
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for command in &self.commands {
            match command {
                DrawCommand::SetGlobalAlpha(alpha) => validate_alpha(*alpha)?,
                DrawCommand::FillRect(rect) => rect.validate()?,
                DrawCommand::FillText(text) => text.validate()?,
            }
        }
        Ok(())
    }

    /// Re-issues every recorded command on `surface`, in order.
    pub fn replay<S: DrawingSurface + ?Sized>(&self, surface: &mut S) -> ChartResult<()> {
        for command in &self.commands {
            match command {
                DrawCommand::SetGlobalAlpha(alpha) => surface.set_global_alpha(*alpha),
                DrawCommand::FillRect(rect) => {
                    surface.fill_render_rect(rect)?;
                }
                DrawCommand::FillText(text) => {
                    surface.set_fill_color(text.color);
                    surface.set_font(&text.font);
                    surface.fill_text_centered(&text.text, text.x, text.y)?;
                }
            }
        }
        Ok(())
    }
}

impl DrawingSurface for RenderFrame {
    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, left: i64, top: i64, right: i64, bottom: i64) -> ChartResult<()> {
        let rect = RenderRect::new(left, top, right, bottom, self.fill_color);
        if rect.is_degenerate() {
            return Err(ChartError::InvalidData(format!(
                "refusing to record negative-extent rect at ({left}, {top})"
            )));
        }
        self.commands.push(DrawCommand::FillRect(rect));
        Ok(())
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn fill_text_centered(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let primitive = TextPrimitive::new(text, x, y, self.font.clone(), self.fill_color);
        primitive.validate()?;
        self.commands.push(DrawCommand::FillText(primitive));
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha;
        self.commands.push(DrawCommand::SetGlobalAlpha(alpha));
    }
}

pub(crate) fn validate_alpha(alpha: f64) -> ChartResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(ChartError::InvalidData(
            "global alpha must be finite and in [0, 1]".to_owned(),
        ));
    }
    Ok(())
}
