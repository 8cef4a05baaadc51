use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, ensure_finite};
use crate::error::ChartResult;

/// Aggregated trades at one price level inside a bar.
///
/// Several records may share a price; aggregation sums them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRecord {
    pub price: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
}

impl TradeRecord {
    #[must_use]
    pub const fn new(price: f64, buy_volume: f64, sell_volume: f64) -> Self {
        Self {
            price,
            buy_volume,
            sell_volume,
        }
    }

    pub fn from_decimal(
        price: Decimal,
        buy_volume: Decimal,
        sell_volume: Decimal,
    ) -> ChartResult<Self> {
        Ok(Self::new(
            decimal_to_f64(price, "price")?,
            decimal_to_f64(buy_volume, "buy volume")?,
            decimal_to_f64(sell_volume, "sell volume")?,
        ))
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.price.is_finite() && self.buy_volume.is_finite() && self.sell_volume.is_finite()
    }
}

/// One time interval: OHLC summary plus the raw per-price trade records.
///
/// `high >= open, close >= low` is expected from upstream but not enforced;
/// a violation only changes the drawn extents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootprintBar {
    pub time_index: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub records: Vec<TradeRecord>,
}

impl FootprintBar {
    /// Builds a bar, rejecting non-finite OHLC values.
    pub fn new(
        time_index: i64,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        records: Vec<TradeRecord>,
    ) -> ChartResult<Self> {
        Ok(Self {
            time_index,
            open: ensure_finite(open, "open")?,
            high: ensure_finite(high, "high")?,
            low: ensure_finite(low, "low")?,
            close: ensure_finite(close, "close")?,
            records,
        })
    }

    pub fn from_decimal(
        time_index: i64,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        records: Vec<TradeRecord>,
    ) -> ChartResult<Self> {
        Self::new(
            time_index,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            records,
        )
    }

    #[must_use]
    pub fn with_record(mut self, record: TradeRecord) -> Self {
        self.records.push(record);
        self
    }

    /// `true` when the bar closed at or above its open.
    #[must_use]
    pub fn is_bullish(&self) -> bool {
        self.open <= self.close
    }

    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.records
            .iter()
            .filter(|record| record.is_finite())
            .map(|record| record.buy_volume + record.sell_volume)
            .sum()
    }
}
