/// Relative tolerance used when a price/step quotient is treated as integral.
pub(crate) const QUOTIENT_EPSILON: f64 = 1e-9;

#[must_use]
pub fn clamp(value: f64, min_value: f64, max_value: f64) -> f64 {
    value.max(min_value).min(max_value)
}

/// Snaps `value / step` to the nearest integer when floating-point noise is
/// the only thing keeping it off one (`1.3 / 0.1 = 13.000000000000002`).
#[must_use]
pub fn step_quotient(value: f64, step: f64) -> f64 {
    let quotient = value / step;
    let nearest = quotient.round();
    if (quotient - nearest).abs() <= QUOTIENT_EPSILON * nearest.abs().max(1.0) {
        nearest
    } else {
        quotient
    }
}

/// Rounds `value` up to the next multiple of `step`.
#[must_use]
pub fn round_up(value: f64, step: f64) -> f64 {
    step_quotient(value, step).ceil() * step
}

/// Rounds `value` down to the previous multiple of `step`.
#[must_use]
pub fn round_down(value: f64, step: f64) -> f64 {
    step_quotient(value, step).floor() * step
}

/// Compact amount label: `6.5M`, `150K`, `1.2K`, `12.50`.
#[must_use]
pub fn format_amount(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = (amount.abs() * 1_000_000_000.0).ceil() / 1_000_000_000.0;

    let body = if amount >= 1_000_000.0 {
        format!("{}M", fixed_trimmed(amount / 1_000_000.0, 1))
    } else if amount >= 100_000.0 {
        format!("{}K", fixed_trimmed(amount / 1_000.0, 0))
    } else if amount >= 1_000.0 {
        format!("{}K", fixed_trimmed(amount / 1_000.0, 1))
    } else {
        format!("{amount:.2}")
    };

    if negative { format!("-{body}") } else { body }
}

fn fixed_trimmed(value: f64, decimals: usize) -> String {
    let text = format!("{value:.decimals$}");
    if !text.contains('.') {
        return text;
    }
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::{clamp, format_amount, round_down, round_up, step_quotient};

    #[test]
    fn rounding_follows_step_multiples() {
        assert_eq!(round_up(109.0, 5.0), 110.0);
        assert_eq!(round_down(100.0, 5.0), 100.0);
        assert_eq!(round_down(104.99, 5.0), 100.0);
        assert_eq!(round_up(-3.0, 2.0), -2.0);
    }

    #[test]
    fn rounding_absorbs_decimal_step_noise() {
        assert_eq!(step_quotient(1.3, 0.1), 13.0);
        assert!((round_up(1.3, 0.1) - 1.3).abs() < 1e-12);
        assert!((round_down(1.3, 0.1) - 1.3).abs() < 1e-12);
    }

    #[test]
    fn clamp_keeps_value_inside_bounds() {
        assert_eq!(clamp(5.0, 1.0, 3.0), 3.0);
        assert_eq!(clamp(0.0, 1.0, 3.0), 1.0);
    }

    #[test]
    fn amounts_use_compact_suffixes() {
        assert_eq!(format_amount(6_000_000.0), "6M");
        assert_eq!(format_amount(6_540_000.0), "6.5M");
        assert_eq!(format_amount(150_400.0), "150K");
        assert_eq!(format_amount(1_500.0), "1.5K");
        assert_eq!(format_amount(2_000.0), "2K");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_amount(0.0), "0.00");
        assert_eq!(format_amount(-2_500.0), "-2.5K");
    }
}
