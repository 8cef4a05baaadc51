use serde::{Deserialize, Serialize};

use crate::core::{DensityTable, MAX_DEVICE_COORDINATE};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

const DENSITY_THRESHOLDS: [f64; 5] = [3_000_000.0, 5_000_000.0, 8_000_000.0, 10_000_000.0, 15_000_000.0];

const DENSITY_COLORS: [Color; 5] = [
    Color::rgb8(0x45, 0x75, 0xB4),
    Color::rgb8(0xCD, 0x47, 0x3E),
    Color::rgb8(0xAB, 0xD9, 0xE9),
    Color::rgb8(0xF4, 0xAA, 0x73),
    Color::rgb8(0xFF, 0xFF, 0xBF),
];

#[must_use]
pub fn default_density_tiers() -> DensityTable {
    DensityTable::from_parallel(&DENSITY_THRESHOLDS, &DENSITY_COLORS).unwrap_or_default()
}

/// Resolved style for one heatmap series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeatmapStyleOptions {
    pub tiers: DensityTable,
    /// Block height in media pixels.
    pub block_size_y: f64,
    /// Global alpha applied to every block.
    pub alpha: f64,
}

impl Default for HeatmapStyleOptions {
    fn default() -> Self {
        Self {
            tiers: default_density_tiers(),
            block_size_y: 10.0,
            alpha: 1.0,
        }
    }
}

impl HeatmapStyleOptions {
    #[must_use]
    pub fn with_block_size_y(mut self, block_size_y: f64) -> Self {
        self.block_size_y = block_size_y;
        self
    }

    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    #[must_use]
    pub fn with_tiers(mut self, tiers: DensityTable) -> Self {
        self.tiers = tiers;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.block_size_y.is_finite() || self.block_size_y <= 0.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "block size must be finite and > 0, got {}",
                self.block_size_y
            )));
        }
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(ChartError::InvalidConfiguration(format!(
                "heatmap alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Block height in device pixels, at least one.
    #[must_use]
    pub fn block_height_px(&self, pixel_ratio: f64) -> i64 {
        ((self.block_size_y * pixel_ratio).round() as i64).clamp(1, MAX_DEVICE_COORDINATE)
    }
}
