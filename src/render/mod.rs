mod frame;
mod null_renderer;
mod primitives;
mod surface;

pub use frame::{DrawCommand, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, FontSpec, RenderRect, TextPrimitive};
pub use surface::DrawingSurface;

pub(crate) use frame::validate_alpha;

use crate::error::ChartResult;

/// Contract implemented by any backend that consumes a recorded frame.
///
/// Renderers draw through [`DrawingSurface`]; a `Renderer` takes the finished
/// [`RenderFrame`] and presents it.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoRenderStats, CairoRenderer, CairoSurface};
