use serde::{Deserialize, Serialize};

use crate::core::bucket::validate_bucket_height;
use crate::core::ThresholdTable;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Text drawn inside sufficiently large bucket rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClusterTextType {
    /// Buy plus sell notional.
    Volume,
    /// Buy minus sell notional.
    Delta,
    /// `sell   buy` pair.
    #[default]
    BidAsk,
}

/// Colors used by the volume-profile overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VolumeProfileColors {
    pub poc_color: Color,
    pub buy_color: Color,
    pub sell_color: Color,
    pub neutral_color: Color,
}

impl Default for VolumeProfileColors {
    fn default() -> Self {
        Self {
            poc_color: Color::rgb8(0xF4, 0xAA, 0x73),
            buy_color: Color::rgb8(0x3A, 0x82, 0xC4),
            sell_color: Color::rgb8(0xCD, 0x47, 0x3E),
            neutral_color: Color::rgba8(120, 123, 134, 0.6),
        }
    }
}

/// How bucket rows are painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "clusterType", rename_all = "kebab-case")]
pub enum ClusterMode {
    /// Full-width rows colored by buy/sell notional dominance.
    Cluster {
        #[serde(default = "default_cluster_tiers")]
        tiers: ThresholdTable,
    },
    /// Rows whose width is proportional to their volume relative to the point
    /// of control.
    VolumeProfile(VolumeProfileColors),
}

impl Default for ClusterMode {
    fn default() -> Self {
        Self::Cluster {
            tiers: default_cluster_tiers(),
        }
    }
}

const CLUSTER_THRESHOLDS: [f64; 5] = [3_000_000.0, 5_000_000.0, 8_000_000.0, 10_000_000.0, 15_000_000.0];

const CLUSTER_BUY_COLORS: [Color; 5] = [
    Color::rgb8(0xCF, 0xEA, 0xFA),
    Color::rgb8(0x9F, 0xD0, 0xF1),
    Color::rgb8(0x69, 0xAC, 0xDE),
    Color::rgb8(0x3A, 0x82, 0xC4),
    Color::rgb8(0xD7, 0x30, 0x27),
];

const CLUSTER_SELL_COLORS: [Color; 5] = [
    Color::rgb8(0xFF, 0xFF, 0xBF),
    Color::rgb8(0xF4, 0xAA, 0x73),
    Color::rgb8(0xAB, 0xD9, 0xE9),
    Color::rgb8(0xCD, 0x47, 0x3E),
    Color::rgb8(0x45, 0x75, 0xB4),
];

#[must_use]
pub fn default_cluster_tiers() -> ThresholdTable {
    ThresholdTable::from_parallel(&CLUSTER_THRESHOLDS, &CLUSTER_BUY_COLORS, &CLUSTER_SELL_COLORS)
        .unwrap_or_default()
}

/// Resolved style for one footprint series.
///
/// Deserialization also accepts the flat `clusterType`, `clusterThresholds`,
/// `clusterBuyColors` and `clusterSellColors` keys in place of `clusterMode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FootprintStyleOptionsWire")]
pub struct FootprintStyleOptions {
    pub align_edges: bool,

    pub candle_up_color: Color,
    pub candle_down_color: Color,
    pub candle_wick_visible: bool,
    pub candle_border_visible: bool,
    pub candle_body_visible: bool,

    pub cluster_visible: bool,
    /// Fill for rows no threshold classifies.
    pub cluster_color: Color,
    pub cluster_text_color: Color,
    pub cluster_text_type: ClusterTextType,
    /// Bucket height in price units.
    pub cluster_size_y: f64,
    pub cluster_mode: ClusterMode,
}

impl Default for FootprintStyleOptions {
    fn default() -> Self {
        Self {
            align_edges: true,
            candle_up_color: Color::rgb8(0xC5, 0xFF, 0x48),
            candle_down_color: Color::rgb8(0xFF, 0x3B, 0x64),
            candle_wick_visible: true,
            candle_border_visible: true,
            candle_body_visible: false,
            cluster_visible: true,
            cluster_color: Color::rgba8(15, 10, 30, 0.8),
            cluster_text_color: Color::rgb(1.0, 1.0, 1.0),
            cluster_text_type: ClusterTextType::BidAsk,
            cluster_size_y: 5.0,
            cluster_mode: ClusterMode::default(),
        }
    }
}

/// `clusterType` value of the flat option layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ClusterModeKind {
    Cluster,
    VolumeProfile,
}

/// Accepted JSON shape of [`FootprintStyleOptions`]. Missing keys take their
/// defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(super) struct FootprintStyleOptionsWire {
    align_edges: bool,
    candle_up_color: Color,
    candle_down_color: Color,
    candle_wick_visible: bool,
    candle_border_visible: bool,
    candle_body_visible: bool,
    cluster_visible: bool,
    cluster_color: Color,
    cluster_text_color: Color,
    cluster_text_type: ClusterTextType,
    cluster_size_y: f64,
    cluster_mode: Option<ClusterMode>,
    cluster_type: Option<ClusterModeKind>,
    cluster_thresholds: Option<Vec<f64>>,
    cluster_buy_colors: Option<Vec<Color>>,
    cluster_sell_colors: Option<Vec<Color>>,
}

impl Default for FootprintStyleOptionsWire {
    fn default() -> Self {
        let defaults = FootprintStyleOptions::default();
        Self {
            align_edges: defaults.align_edges,
            candle_up_color: defaults.candle_up_color,
            candle_down_color: defaults.candle_down_color,
            candle_wick_visible: defaults.candle_wick_visible,
            candle_border_visible: defaults.candle_border_visible,
            candle_body_visible: defaults.candle_body_visible,
            cluster_visible: defaults.cluster_visible,
            cluster_color: defaults.cluster_color,
            cluster_text_color: defaults.cluster_text_color,
            cluster_text_type: defaults.cluster_text_type,
            cluster_size_y: defaults.cluster_size_y,
            cluster_mode: None,
            cluster_type: None,
            cluster_thresholds: None,
            cluster_buy_colors: None,
            cluster_sell_colors: None,
        }
    }
}

impl FootprintStyleOptionsWire {
    fn has_flat_cluster_keys(&self) -> bool {
        self.cluster_type.is_some()
            || self.cluster_thresholds.is_some()
            || self.cluster_buy_colors.is_some()
            || self.cluster_sell_colors.is_some()
    }

    fn resolve_cluster_mode(self) -> ChartResult<ClusterMode> {
        if !self.has_flat_cluster_keys() {
            return Ok(self.cluster_mode.unwrap_or_default());
        }
        if self.cluster_mode.is_some() {
            return Err(ChartError::InvalidConfiguration(
                "clusterMode cannot be combined with flat clusterType/clusterThresholds keys"
                    .to_owned(),
            ));
        }

        let has_tiers = self.cluster_thresholds.is_some()
            || self.cluster_buy_colors.is_some()
            || self.cluster_sell_colors.is_some();
        let tiers = if has_tiers {
            Some(ThresholdTable::from_parallel(
                &self.cluster_thresholds.unwrap_or_default(),
                &self.cluster_buy_colors.unwrap_or_default(),
                &self.cluster_sell_colors.unwrap_or_default(),
            )?)
        } else {
            None
        };

        Ok(match self.cluster_type.unwrap_or(ClusterModeKind::Cluster) {
            ClusterModeKind::Cluster => ClusterMode::Cluster {
                tiers: tiers.unwrap_or_else(default_cluster_tiers),
            },
            ClusterModeKind::VolumeProfile => {
                ClusterMode::VolumeProfile(VolumeProfileColors::default())
            }
        })
    }
}

impl TryFrom<FootprintStyleOptionsWire> for FootprintStyleOptions {
    type Error = ChartError;

    fn try_from(wire: FootprintStyleOptionsWire) -> ChartResult<Self> {
        Ok(Self {
            align_edges: wire.align_edges,
            candle_up_color: wire.candle_up_color,
            candle_down_color: wire.candle_down_color,
            candle_wick_visible: wire.candle_wick_visible,
            candle_border_visible: wire.candle_border_visible,
            candle_body_visible: wire.candle_body_visible,
            cluster_visible: wire.cluster_visible,
            cluster_color: wire.cluster_color,
            cluster_text_color: wire.cluster_text_color,
            cluster_text_type: wire.cluster_text_type,
            cluster_size_y: wire.cluster_size_y,
            cluster_mode: wire.resolve_cluster_mode()?,
        })
    }
}

impl FootprintStyleOptions {
    #[must_use]
    pub fn with_cluster_size_y(mut self, cluster_size_y: f64) -> Self {
        self.cluster_size_y = cluster_size_y;
        self
    }

    #[must_use]
    pub fn with_cluster_mode(mut self, cluster_mode: ClusterMode) -> Self {
        self.cluster_mode = cluster_mode;
        self
    }

    #[must_use]
    pub fn with_cluster_text_type(mut self, text_type: ClusterTextType) -> Self {
        self.cluster_text_type = text_type;
        self
    }

    /// Candle color for a bar: up when `open <= close`.
    #[must_use]
    pub fn candle_color(&self, bullish: bool) -> Color {
        if bullish {
            self.candle_up_color
        } else {
            self.candle_down_color
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_bucket_height(self.cluster_size_y)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClusterMode, FootprintStyleOptions};
    use crate::error::ChartError;

    #[test]
    fn defaults_mirror_cluster_palette() {
        let options = FootprintStyleOptions::default();
        let ClusterMode::Cluster { tiers } = &options.cluster_mode else {
            panic!("default mode is cluster");
        };
        assert_eq!(tiers.tiers().len(), 5);
        assert_eq!(tiers.tiers()[0].threshold, 3_000_000.0);
        assert_eq!(options.cluster_size_y, 5.0);
        options.validate().expect("defaults are valid");
    }

    #[test]
    fn non_positive_bucket_height_is_rejected() {
        for size in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = FootprintStyleOptions::default()
                .with_cluster_size_y(size)
                .validate()
                .expect_err("invalid bucket height");
            assert!(matches!(err, ChartError::InvalidConfiguration(_)));
        }
    }
}
