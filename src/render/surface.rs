use crate::error::ChartResult;
use crate::render::{Color, FontSpec, RenderRect};

/// Minimal 2D drawing capability the renderers draw through.
///
/// Coordinates are device pixels with translation already applied. Nothing
/// beyond flat fills and centered text is required.
pub trait DrawingSurface {
    fn set_fill_color(&mut self, color: Color);

    /// Fills the inclusive rectangle `[left, right] x [top, bottom]` with the
    /// current fill color.
    fn fill_rect(&mut self, left: i64, top: i64, right: i64, bottom: i64) -> ChartResult<()>;

    fn set_font(&mut self, font: &FontSpec);

    /// Draws `text` centered horizontally and vertically on `(x, y)` with the
    /// current fill color and font.
    fn fill_text_centered(&mut self, text: &str, x: f64, y: f64) -> ChartResult<()>;

    /// Opacity multiplier applied to subsequent fills.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Sets the fill color from `rect` and fills it; degenerate rectangles
    /// are skipped and reported as `false`.
    fn fill_render_rect(&mut self, rect: &RenderRect) -> ChartResult<bool> {
        if rect.is_degenerate() {
            return Ok(false);
        }
        self.set_fill_color(rect.fill_color);
        self.fill_rect(rect.left, rect.top, rect.right, rect.bottom)?;
        Ok(true)
    }
}
