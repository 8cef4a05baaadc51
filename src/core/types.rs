use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Device-pixel size of the drawing target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Half-open range `[from, to)` of series item indices visible in the pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    pub from: usize,
    pub to: usize,
}

impl VisibleRange {
    #[must_use]
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.from >= self.to
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.to.saturating_sub(self.from)
    }

    /// Restricts the range to `[0, len)` of the backing data.
    #[must_use]
    pub fn clamped_to(self, len: usize) -> Self {
        let to = self.to.min(len);
        Self {
            from: self.from.min(to),
            to,
        }
    }
}

/// Validates a device-pixel ratio (device pixels per media pixel).
pub fn validate_pixel_ratio(pixel_ratio: f64) -> ChartResult<f64> {
    if !pixel_ratio.is_finite() || pixel_ratio <= 0.0 {
        return Err(ChartError::InvalidData(
            "pixel ratio must be finite and > 0".to_owned(),
        ));
    }
    Ok(pixel_ratio)
}
