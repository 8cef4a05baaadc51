use cairo::{Context, Format, ImageSurface};
use pango::FontDescription;

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, RenderFrame, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// [`DrawingSurface`] over a borrowed Cairo context, for example inside a GTK
/// `DrawingArea` draw callback.
pub struct CairoSurface<'a> {
    context: &'a Context,
    fill_color: Color,
    font: FontSpec,
    global_alpha: f64,
    stats: CairoRenderStats,
}

impl<'a> CairoSurface<'a> {
    #[must_use]
    pub fn new(context: &'a Context) -> Self {
        Self {
            context,
            fill_color: Color::TRANSPARENT,
            font: FontSpec::new(10.0, "Sans"),
            global_alpha: 1.0,
            stats: CairoRenderStats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> CairoRenderStats {
        self.stats
    }

    fn apply_fill(&self) {
        let color = self.fill_color.with_alpha_factor(self.global_alpha);
        self.context
            .set_source_rgba(color.red, color.green, color.blue, color.alpha);
    }
}

impl DrawingSurface for CairoSurface<'_> {
    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn fill_rect(&mut self, left: i64, top: i64, right: i64, bottom: i64) -> ChartResult<()> {
        if left > right || top > bottom {
            return Ok(());
        }
        self.apply_fill();
        self.context.rectangle(
            left as f64,
            top as f64,
            (right - left + 1) as f64,
            (bottom - top + 1) as f64,
        );
        self.context
            .fill()
            .map_err(|err| map_backend_error("failed to fill rectangle", err))?;
        self.stats.rects_drawn += 1;
        Ok(())
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn fill_text_centered(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()> {
        let layout = pangocairo::functions::create_layout(self.context);
        let mut description = FontDescription::from_string(&self.font.family);
        description.set_absolute_size(self.font.size_px * f64::from(pango::SCALE));
        layout.set_font_description(Some(&description));
        layout.set_text(text);

        let (text_width, text_height) = layout.pixel_size();
        self.apply_fill();
        self.context.move_to(
            x - f64::from(text_width) / 2.0,
            y - f64::from(text_height) / 2.0,
        );
        pangocairo::functions::show_layout(self.context, &layout);
        self.stats.texts_drawn += 1;
        Ok(())
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }
}

/// Offscreen renderer replaying a [`RenderFrame`] onto an ARGB32 image.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidViewport {
                width: width.max(0) as u32,
                height: height.max(0) as u32,
            });
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::rgb(0.0, 0.0, 0.0),
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;

        let clear = self.clear_color;
        context.set_source_rgba(clear.red, clear.green, clear.blue, clear.alpha);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut surface = CairoSurface::new(&context);
        frame.replay(&mut surface)?;
        self.last_stats = surface.stats();
        Ok(())
    }
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::InvalidData(format!("{prefix}: {err}"))
}
