//! Integer pixel snapping for bar columns.
//!
//! Everything here works in device pixels. Spans are inclusive on both ends,
//! so a one-pixel column has `left == right`.

use smallvec::SmallVec;

use crate::render::{Color, RenderRect};

/// Nominal border width in media pixels.
pub const BAR_BORDER_WIDTH: f64 = 1.0;

/// Device coordinates are clamped to `[-MAX_DEVICE_COORDINATE, MAX_DEVICE_COORDINATE]`
/// so span and rect arithmetic on far off-screen input stays in range.
pub const MAX_DEVICE_COORDINATE: i64 = 1 << 40;

/// Scales a media-pixel coordinate to a rounded, clamped device pixel.
/// Returns `None` for non-finite input.
#[must_use]
pub fn to_device_px(value: f64, pixel_ratio: f64) -> Option<i64> {
    let scaled = (value * pixel_ratio).round();
    if !scaled.is_finite() {
        return None;
    }
    let limit = MAX_DEVICE_COORDINATE as f64;
    Some(scaled.clamp(-limit, limit) as i64)
}

/// Inclusive horizontal pixel span `[left, right]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizontalSpan {
    pub left: i64,
    pub right: i64,
}

impl HorizontalSpan {
    /// Span of `width` pixels whose center pixel is `center_x`.
    #[must_use]
    pub fn centered(center_x: i64, width: i64) -> Self {
        let width = width.clamp(1, MAX_DEVICE_COORDINATE);
        let center_x = center_x.clamp(-MAX_DEVICE_COORDINATE, MAX_DEVICE_COORDINATE);
        let left = center_x - width.div_euclid(2);
        Self {
            left,
            right: left + width - 1,
        }
    }

    #[must_use]
    pub fn width(self) -> i64 {
        self.right - self.left + 1
    }
}

/// Right edge of the previously placed span during one left-to-right pass.
///
/// A cursor is created per pass and threaded through it by value; it is never
/// stored between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCursor {
    prev_edge: Option<i64>,
}

impl LayoutCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn previous_edge(self) -> Option<i64> {
        self.prev_edge
    }

    /// Places a centered span so that it starts after the previous one.
    ///
    /// If pushing `left` past the previous edge would invert the span, `left`
    /// collapses onto `right` and the span stays one pixel wide.
    #[must_use]
    pub fn place(self, center_x: i64, width: i64) -> (HorizontalSpan, Self) {
        let mut span = HorizontalSpan::centered(center_x, width);
        if let Some(prev_edge) = self.prev_edge {
            span.left = span.left.max(prev_edge.saturating_add(1)).min(span.right);
        }
        (
            span,
            Self {
                prev_edge: Some(span.right),
            },
        )
    }
}

/// Lightweight Charts candlestick width curve in device pixels.
#[must_use]
pub fn optimal_candlestick_width(bar_spacing: f64, pixel_ratio: f64) -> i64 {
    let min_width = pixel_ratio.floor().max(1.0);
    if !bar_spacing.is_finite() || bar_spacing <= 0.0 || !pixel_ratio.is_finite() {
        return min_width as i64;
    }

    let special_from = 2.5;
    let special_to = 4.0;
    let special_coeff = 3.0;
    if (special_from..=special_to).contains(&bar_spacing) {
        return (special_coeff * pixel_ratio).floor().max(min_width) as i64;
    }

    let reducing_coeff = 0.2;
    let coeff = 1.0
        - reducing_coeff * (bar_spacing.max(special_to) - special_to).atan()
            / (std::f64::consts::PI * 0.5);
    let res = (bar_spacing * coeff * pixel_ratio).floor();
    let scaled_spacing = (bar_spacing * pixel_ratio).floor();
    res.min(scaled_spacing).max(min_width) as i64
}

/// Body width in device pixels.
///
/// Grid and crosshair lines are `floor(pixel_ratio)` wide, so the body keeps
/// the same parity to stay symmetric under them.
#[must_use]
pub fn resolve_body_width(bar_spacing: f64, pixel_ratio: f64, align_edges: bool) -> i64 {
    let mut width = if align_edges {
        (bar_spacing * pixel_ratio).floor() as i64 - 1
    } else {
        optimal_candlestick_width(bar_spacing, pixel_ratio)
    }
    .max(1);

    if width >= 2 {
        let line_width = pixel_ratio.floor() as i64;
        if line_width % 2 != width % 2 {
            width -= 1;
        }
    }
    width
}

/// Wick width: `floor(pixel_ratio)`, capped by the spacing and the body.
#[must_use]
pub fn resolve_wick_width(bar_spacing: f64, pixel_ratio: f64, body_width: i64) -> i64 {
    let min_width = pixel_ratio.floor().max(1.0) as i64;
    let spacing_cap = (bar_spacing * pixel_ratio).floor() as i64;
    let width = min_width.min(spacing_cap);
    width.min(body_width).max(min_width)
}

/// Border width for a body of `body_width` device pixels.
///
/// Narrow bodies get a thinner border that still leaves an interior; when no
/// border fits at all the nominal width is returned and the caller fills the
/// whole body instead.
#[must_use]
pub fn resolve_border_width(body_width: i64, pixel_ratio: f64) -> i64 {
    let min_width = pixel_ratio.floor().max(1.0) as i64;
    let nominal = (BAR_BORDER_WIDTH * pixel_ratio).floor() as i64;

    let mut border_width = nominal;
    if body_width <= 2 * border_width {
        border_width = (body_width - 1).div_euclid(2);
    }
    let constrained = border_width.max(min_width);
    if body_width <= constrained * 2 {
        return nominal.max(min_width);
    }
    constrained
}

/// Four strips (top, bottom, left, right) tracing the inside edge of `rect`.
#[must_use]
pub fn inner_border_rects(
    rect: &RenderRect,
    border_width: i64,
    color: Color,
) -> SmallVec<[RenderRect; 4]> {
    let (left, top, right, bottom) = (rect.left, rect.top, rect.right, rect.bottom);
    let border = border_width.max(1);
    [
        RenderRect::new(left + border, top, right - border, top + border - 1, color),
        RenderRect::new(left + border, bottom - border + 1, right - border, bottom, color),
        RenderRect::new(left, top, left + border - 1, bottom, color),
        RenderRect::new(right - border + 1, top, right, bottom, color),
    ]
    .into_iter()
    .filter(|strip| !strip.is_degenerate())
    .collect()
}
