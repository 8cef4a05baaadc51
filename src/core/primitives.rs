use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ChartError, ChartResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Rejects NaN/inf values for a named input field.
pub fn ensure_finite(value: f64, field_name: &str) -> ChartResult<f64> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData(format!("{field_name} must be finite")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{decimal_to_f64, ensure_finite};

    #[test]
    fn decimal_conversion_keeps_value() {
        let value = Decimal::new(10525, 2);
        assert_eq!(decimal_to_f64(value, "price").expect("convert"), 105.25);
    }

    #[test]
    fn ensure_finite_names_the_field() {
        let err = ensure_finite(f64::INFINITY, "high").expect_err("inf rejected");
        assert!(err.to_string().contains("high"));
    }
}
