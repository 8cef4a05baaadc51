use crate::core::primitives::ensure_finite;
use crate::error::{ChartError, ChartResult};

/// Price/time to media-pixel mapping supplied by the host price and time
/// scales.
///
/// Implementations must be monotonic: later indices map to larger `x`, and
/// price order maps consistently onto `y`. Inputs outside the viewport just
/// produce off-canvas coordinates.
pub trait CoordinateMapper {
    fn price_to_y(&self, price: f64) -> f64;
    fn index_to_x(&self, index: i64) -> f64;
}

impl<M: CoordinateMapper + ?Sized> CoordinateMapper for &M {
    fn price_to_y(&self, price: f64) -> f64 {
        (**self).price_to_y(price)
    }

    fn index_to_x(&self, index: i64) -> f64 {
        (**self).index_to_x(index)
    }
}

/// Adapter over two closures, for hosts that already expose scale functions.
#[derive(Debug, Clone, Copy)]
pub struct FnCoordinateMapper<P, X> {
    price_to_y: P,
    index_to_x: X,
}

impl<P, X> FnCoordinateMapper<P, X>
where
    P: Fn(f64) -> f64,
    X: Fn(i64) -> f64,
{
    #[must_use]
    pub fn new(price_to_y: P, index_to_x: X) -> Self {
        Self {
            price_to_y,
            index_to_x,
        }
    }
}

impl<P, X> CoordinateMapper for FnCoordinateMapper<P, X>
where
    P: Fn(f64) -> f64,
    X: Fn(i64) -> f64,
{
    fn price_to_y(&self, price: f64) -> f64 {
        (self.price_to_y)(price)
    }

    fn index_to_x(&self, index: i64) -> f64 {
        (self.index_to_x)(index)
    }
}

/// Linear price axis (inverted Y) plus uniform bar spacing on the time axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearCoordinateMapper {
    price_min: f64,
    price_max: f64,
    pane_height_px: f64,
    base_index: i64,
    base_x: f64,
    bar_spacing: f64,
}

impl LinearCoordinateMapper {
    /// `price_min` lands on the bottom pixel row, `price_max` on row zero.
    /// Index `base_index` is centered at `base_x`.
    pub fn new(
        price_range: (f64, f64),
        pane_height_px: f64,
        base_index: i64,
        base_x: f64,
        bar_spacing: f64,
    ) -> ChartResult<Self> {
        let (price_min, price_max) = price_range;
        ensure_finite(price_min, "price min")?;
        ensure_finite(price_max, "price max")?;
        ensure_finite(base_x, "base x")?;
        if price_min >= price_max {
            return Err(ChartError::InvalidData(
                "price range must satisfy min < max".to_owned(),
            ));
        }
        if !pane_height_px.is_finite() || pane_height_px <= 1.0 {
            return Err(ChartError::InvalidData(
                "pane height must be finite and > 1".to_owned(),
            ));
        }
        if !bar_spacing.is_finite() || bar_spacing <= 0.0 {
            return Err(ChartError::InvalidData(
                "bar spacing must be finite and > 0".to_owned(),
            ));
        }

        Ok(Self {
            price_min,
            price_max,
            pane_height_px,
            base_index,
            base_x,
            bar_spacing,
        })
    }

    #[must_use]
    pub fn bar_spacing(self) -> f64 {
        self.bar_spacing
    }

    /// Same price axis, different horizontal spacing (for example after a
    /// resize or zoom).
    #[must_use]
    pub fn with_bar_spacing(mut self, bar_spacing: f64) -> Self {
        if bar_spacing.is_finite() && bar_spacing > 0.0 {
            self.bar_spacing = bar_spacing;
        }
        self
    }
}

impl CoordinateMapper for LinearCoordinateMapper {
    fn price_to_y(&self, price: f64) -> f64 {
        let span = self.price_max - self.price_min;
        let normalized = (price - self.price_min) / span;
        (self.pane_height_px - 1.0) * (1.0 - normalized)
    }

    fn index_to_x(&self, index: i64) -> f64 {
        self.base_x + (index - self.base_index) as f64 * self.bar_spacing
    }
}
