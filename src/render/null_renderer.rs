use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// No-op renderer used by tests and headless usage.
///
/// It still validates frame content so tests catch invalid geometry without a
/// real backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_rect_count: usize,
    pub last_text_count: usize,
    pub frames_rendered: u64,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.last_rect_count = frame.rects().count();
        self.last_text_count = frame.texts().count();
        self.frames_rendered += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NullRenderer;
    use crate::core::Viewport;
    use crate::render::{Color, DrawingSurface, RenderFrame, Renderer};

    #[test]
    fn counts_primitives_of_valid_frames() {
        let mut frame = RenderFrame::new(Viewport::new(20, 20));
        frame.set_fill_color(Color::rgb(0.1, 0.2, 0.3));
        frame.fill_rect(0, 0, 4, 4).expect("rect");

        let mut renderer = NullRenderer::default();
        renderer.render(&frame).expect("render");
        assert_eq!(renderer.last_rect_count, 1);
        assert_eq!(renderer.frames_rendered, 1);
    }

    #[test]
    fn rejects_zero_sized_viewport() {
        let frame = RenderFrame::new(Viewport::new(0, 20));
        let mut renderer = NullRenderer::default();
        assert!(renderer.render(&frame).is_err());
    }
}
