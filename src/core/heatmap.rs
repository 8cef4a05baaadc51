use serde::{Deserialize, Serialize};

/// Density value observed at one price inside a heatmap column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSample {
    pub price: f64,
    pub value: f64,
}

impl HeatmapSample {
    #[must_use]
    pub const fn new(price: f64, value: f64) -> Self {
        Self { price, value }
    }
}

/// All density samples sharing one time index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapColumn {
    pub time_index: i64,
    #[serde(default)]
    pub samples: Vec<HeatmapSample>,
}

impl HeatmapColumn {
    #[must_use]
    pub fn new(time_index: i64, samples: Vec<HeatmapSample>) -> Self {
        Self {
            time_index,
            samples,
        }
    }
}

/// Inclusive price window used to skip samples outside the visible scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceWindow {
    pub min: f64,
    pub max: f64,
}

impl PriceWindow {
    /// Orders the bounds so `min <= max`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn contains(self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}
