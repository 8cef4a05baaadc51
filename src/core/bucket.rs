use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::footprint::FootprintBar;
use crate::core::math::{QUOTIENT_EPSILON, round_down, round_up, step_quotient};
use crate::error::{ChartError, ChartResult};

/// Upper bound on buckets produced for a single bar.
///
/// A tiny bucket height against a wide bar would otherwise allocate millions
/// of rows per frame.
pub const MAX_BUCKETS_PER_BAR: usize = 10_000;

/// Volume summary for one fixed-height price slice of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBucket {
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub buy_volume: f64,
    pub sell_volume: f64,
    pub buy_notional: f64,
    pub sell_notional: f64,
    pub is_point_of_control: bool,
}

impl PriceBucket {
    fn empty(lower_bound: f64, upper_bound: f64) -> Self {
        Self {
            lower_bound,
            upper_bound,
            buy_volume: 0.0,
            sell_volume: 0.0,
            buy_notional: 0.0,
            sell_notional: 0.0,
            is_point_of_control: false,
        }
    }

    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.buy_volume + self.sell_volume
    }

    #[must_use]
    pub fn volume_delta(&self) -> f64 {
        self.buy_volume - self.sell_volume
    }

    #[must_use]
    pub fn total_notional(&self) -> f64 {
        self.buy_notional + self.sell_notional
    }

    #[must_use]
    pub fn notional_delta(&self) -> f64 {
        self.buy_notional - self.sell_notional
    }
}

/// Snapped price band `[lower, upper]` of one bar, split into `count` rows of
/// `step` height. Row 0 is the topmost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucketBand {
    pub lower: f64,
    pub upper: f64,
    pub step: f64,
    pub count: usize,
}

impl BucketBand {
    pub fn for_bar(bar: &FootprintBar, bucket_height: f64) -> ChartResult<Self> {
        let step = validate_bucket_height(bucket_height)?;
        if !bar.high.is_finite() || !bar.low.is_finite() {
            return Err(ChartError::InvalidData(format!(
                "bar {} has non-finite high/low",
                bar.time_index
            )));
        }

        let upper = round_up(bar.high.max(bar.low), step);
        let mut lower = round_down(bar.high.min(bar.low), step);
        let rows = step_quotient(upper - lower, step).ceil();
        if rows > MAX_BUCKETS_PER_BAR as f64 {
            return Err(ChartError::InvalidConfiguration(format!(
                "bucket height {step} yields {rows} buckets for bar {} (max {MAX_BUCKETS_PER_BAR})",
                bar.time_index
            )));
        }
        if rows < 1.0 {
            lower = upper - step;
        }

        Ok(Self {
            lower,
            upper,
            step,
            count: (rows as usize).max(1),
        })
    }

    /// Bounds of row `index`; the last row ends exactly on `lower`.
    #[must_use]
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        let upper_bound = self.upper - self.step * index as f64;
        let lower_bound = if index + 1 >= self.count {
            self.lower
        } else {
            self.upper - self.step * (index + 1) as f64
        };
        (lower_bound, upper_bound)
    }

    /// Row holding `price`. Rows are closed at the top and open at the
    /// bottom, except the last row which also includes `lower`.
    #[must_use]
    pub fn bucket_index(&self, price: f64) -> Option<usize> {
        if !price.is_finite() {
            return None;
        }
        let offset = step_quotient(self.upper - price, self.step);
        // Snapping `upper` may leave `high` a few ulps above it.
        let slack = QUOTIENT_EPSILON * (self.upper.abs() / self.step).max(1.0);
        if offset < -slack || offset > self.count as f64 + slack {
            return None;
        }
        Some((offset.max(0.0).floor() as usize).min(self.count - 1))
    }
}

pub fn validate_bucket_height(bucket_height: f64) -> ChartResult<f64> {
    if !bucket_height.is_finite() || bucket_height <= 0.0 {
        return Err(ChartError::InvalidConfiguration(format!(
            "bucket height must be finite and > 0, got {bucket_height}"
        )));
    }
    Ok(bucket_height)
}

/// Splits a bar's trade records into fixed-height price buckets, top to
/// bottom, and marks the point of control.
///
/// Records outside the snapped band or with non-finite fields are ignored.
pub fn aggregate(bar: &FootprintBar, bucket_height: f64) -> ChartResult<Vec<PriceBucket>> {
    let band = BucketBand::for_bar(bar, bucket_height)?;
    let mut buckets: Vec<PriceBucket> = (0..band.count)
        .map(|index| {
            let (lower_bound, upper_bound) = band.bounds(index);
            PriceBucket::empty(lower_bound, upper_bound)
        })
        .collect();

    let mut dropped = 0_usize;
    for record in &bar.records {
        let slot = if record.is_finite() {
            band.bucket_index(record.price)
        } else {
            None
        };
        let Some(index) = slot else {
            dropped += 1;
            continue;
        };

        let bucket = &mut buckets[index];
        bucket.buy_volume += record.buy_volume;
        bucket.sell_volume += record.sell_volume;
        bucket.buy_notional += record.buy_volume * record.price;
        bucket.sell_notional += record.sell_volume * record.price;
    }
    if dropped > 0 {
        trace!(
            time_index = bar.time_index,
            dropped, "trade records outside bucket band ignored"
        );
    }

    if let Some(poc) = point_of_control(&buckets) {
        buckets[poc].is_point_of_control = true;
    }
    Ok(buckets)
}

/// Index of the bucket with the largest `buy + sell` volume.
///
/// Ties go to the lowest index (the highest price). Returns `None` when every
/// bucket is empty.
#[must_use]
pub fn point_of_control(buckets: &[PriceBucket]) -> Option<usize> {
    if buckets.iter().all(|bucket| bucket.total_volume() == 0.0) {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for (index, bucket) in buckets.iter().enumerate() {
        let volume = bucket.total_volume();
        match best {
            Some((_, best_volume)) if volume <= best_volume => {}
            _ => best = Some((index, volume)),
        }
    }
    best.map(|(index, _)| index)
}
