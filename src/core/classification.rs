use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// One cluster threshold with the colors used when the buy or the sell side
/// dominates above it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdTier {
    pub threshold: f64,
    pub buy_color: Color,
    pub sell_color: Color,
}

impl ThresholdTier {
    #[must_use]
    pub const fn new(threshold: f64, buy_color: Color, sell_color: Color) -> Self {
        Self {
            threshold,
            buy_color,
            sell_color,
        }
    }
}

/// Ordered cluster thresholds, expected ascending.
///
/// Lookup walks the tiers from last to first in the stored order, so an
/// unsorted table still classifies deterministically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<ThresholdTier>", into = "Vec<ThresholdTier>")]
pub struct ThresholdTable {
    tiers: Vec<ThresholdTier>,
}

impl ThresholdTable {
    pub fn new(tiers: Vec<ThresholdTier>) -> ChartResult<Self> {
        for tier in &tiers {
            validate_threshold(tier.threshold)?;
        }
        Ok(Self { tiers })
    }

    /// Builds a table from separate threshold and color lists of equal length.
    pub fn from_parallel(
        thresholds: &[f64],
        buy_colors: &[Color],
        sell_colors: &[Color],
    ) -> ChartResult<Self> {
        if thresholds.len() != buy_colors.len() || thresholds.len() != sell_colors.len() {
            return Err(ChartError::InvalidConfiguration(format!(
                "threshold/color lists differ in length: thresholds={}, buy={}, sell={}",
                thresholds.len(),
                buy_colors.len(),
                sell_colors.len()
            )));
        }
        Self::new(
            thresholds
                .iter()
                .zip(buy_colors.iter().zip(sell_colors))
                .map(|(&threshold, (&buy, &sell))| ThresholdTier::new(threshold, buy, sell))
                .collect(),
        )
    }

    #[must_use]
    pub fn tiers(&self) -> &[ThresholdTier] {
        &self.tiers
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Same thresholds with buy and sell colors exchanged.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            tiers: self
                .tiers
                .iter()
                .map(|tier| ThresholdTier::new(tier.threshold, tier.sell_color, tier.buy_color))
                .collect(),
        }
    }
}

impl TryFrom<Vec<ThresholdTier>> for ThresholdTable {
    type Error = ChartError;

    fn try_from(tiers: Vec<ThresholdTier>) -> ChartResult<Self> {
        Self::new(tiers)
    }
}

impl From<ThresholdTable> for Vec<ThresholdTier> {
    fn from(table: ThresholdTable) -> Self {
        table.tiers
    }
}

/// Color for a buy/sell pair: the dominant side's color at the highest tier
/// it strictly exceeds, or `default` when neither side dominates above any
/// tier.
#[must_use]
pub fn classify(buy: f64, sell: f64, table: &ThresholdTable, default: Color) -> Color {
    for tier in table.tiers.iter().rev() {
        if buy > sell && buy > tier.threshold {
            return tier.buy_color;
        }
        if sell > buy && sell > tier.threshold {
            return tier.sell_color;
        }
    }
    default
}

/// Single-sided threshold used by density heatmaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityTier {
    pub threshold: f64,
    pub color: Color,
}

impl DensityTier {
    #[must_use]
    pub const fn new(threshold: f64, color: Color) -> Self {
        Self { threshold, color }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<DensityTier>", into = "Vec<DensityTier>")]
pub struct DensityTable {
    tiers: Vec<DensityTier>,
}

impl DensityTable {
    pub fn new(tiers: Vec<DensityTier>) -> ChartResult<Self> {
        for tier in &tiers {
            validate_threshold(tier.threshold)?;
        }
        Ok(Self { tiers })
    }

    pub fn from_parallel(thresholds: &[f64], colors: &[Color]) -> ChartResult<Self> {
        if thresholds.len() != colors.len() {
            return Err(ChartError::InvalidConfiguration(format!(
                "threshold/color lists differ in length: thresholds={}, colors={}",
                thresholds.len(),
                colors.len()
            )));
        }
        Self::new(
            thresholds
                .iter()
                .zip(colors)
                .map(|(&threshold, &color)| DensityTier::new(threshold, color))
                .collect(),
        )
    }

    #[must_use]
    pub fn tiers(&self) -> &[DensityTier] {
        &self.tiers
    }
}

impl TryFrom<Vec<DensityTier>> for DensityTable {
    type Error = ChartError;

    fn try_from(tiers: Vec<DensityTier>) -> ChartResult<Self> {
        Self::new(tiers)
    }
}

impl From<DensityTable> for Vec<DensityTier> {
    fn from(table: DensityTable) -> Self {
        table.tiers
    }
}

/// Color of the highest tier `value` strictly exceeds; `None` means
/// transparent (nothing is drawn).
#[must_use]
pub fn classify_density(value: f64, table: &DensityTable) -> Option<Color> {
    table
        .tiers
        .iter()
        .rev()
        .find(|tier| value > tier.threshold)
        .map(|tier| tier.color)
}

fn validate_threshold(threshold: f64) -> ChartResult<()> {
    if !threshold.is_finite() {
        return Err(ChartError::InvalidConfiguration(
            "classification thresholds must be finite".to_owned(),
        ));
    }
    Ok(())
}
