use approx::assert_relative_eq;
use footprint_rs::ChartError;
use footprint_rs::core::{BucketBand, FootprintBar, TradeRecord, aggregate, point_of_control};
use rust_decimal::Decimal;

fn bar(low: f64, high: f64, records: Vec<TradeRecord>) -> FootprintBar {
    FootprintBar::new(7, low, high, low, high, records).expect("valid bar")
}

#[test]
fn five_point_buckets_split_nine_point_bar_in_two() {
    let buckets = aggregate(&bar(100.0, 109.0, vec![TradeRecord::new(105.0, 3.0, 1.0)]), 5.0)
        .expect("aggregate");

    assert_eq!(buckets.len(), 2);
    assert_eq!((buckets[0].lower_bound, buckets[0].upper_bound), (105.0, 110.0));
    assert_eq!((buckets[1].lower_bound, buckets[1].upper_bound), (100.0, 105.0));
    assert_eq!(buckets[0].total_volume(), 0.0);
    assert_eq!(buckets[1].buy_volume, 3.0);
    assert_eq!(buckets[1].sell_volume, 1.0);
}

#[test]
fn trades_on_band_edges_are_kept() {
    let records = vec![
        TradeRecord::new(110.0, 1.0, 0.0),
        TradeRecord::new(100.0, 0.0, 2.0),
    ];
    let buckets = aggregate(&bar(100.0, 110.0, records), 5.0).expect("aggregate");

    assert_eq!(buckets.len(), 2);
    assert_eq!(buckets[0].buy_volume, 1.0);
    assert_eq!(buckets[1].sell_volume, 2.0);
}

#[test]
fn records_sharing_a_price_are_summed() {
    let records = vec![
        TradeRecord::new(107.0, 1.5, 0.5),
        TradeRecord::new(107.0, 2.5, 1.0),
    ];
    let buckets = aggregate(&bar(100.0, 109.0, records), 5.0).expect("aggregate");

    assert_relative_eq!(buckets[0].buy_volume, 4.0);
    assert_relative_eq!(buckets[0].sell_volume, 1.5);
    assert_relative_eq!(buckets[0].buy_notional, 4.0 * 107.0);
    assert_relative_eq!(buckets[0].sell_notional, 1.5 * 107.0);
    assert_relative_eq!(buckets[0].volume_delta(), 2.5);
}

#[test]
fn empty_records_cover_range_without_point_of_control() {
    let buckets = aggregate(&bar(100.0, 109.0, Vec::new()), 5.0).expect("aggregate");

    assert_eq!(buckets.len(), 2);
    assert!(buckets.iter().all(|bucket| bucket.total_volume() == 0.0));
    assert!(buckets.iter().all(|bucket| !bucket.is_point_of_control));
    assert_eq!(point_of_control(&buckets), None);
}

#[test]
fn point_of_control_marks_heaviest_bucket() {
    let records = vec![
        TradeRecord::new(108.0, 1.0, 1.0),
        TradeRecord::new(102.0, 4.0, 3.0),
    ];
    let buckets = aggregate(&bar(100.0, 109.0, records), 5.0).expect("aggregate");

    assert!(!buckets[0].is_point_of_control);
    assert!(buckets[1].is_point_of_control);
    assert_eq!(point_of_control(&buckets), Some(1));
}

#[test]
fn out_of_band_and_non_finite_records_are_ignored() {
    let records = vec![
        TradeRecord::new(250.0, 9.0, 9.0),
        TradeRecord::new(f64::NAN, 9.0, 9.0),
        TradeRecord::new(104.0, f64::INFINITY, 0.0),
        TradeRecord::new(104.0, 1.0, 0.0),
    ];
    let buckets = aggregate(&bar(100.0, 109.0, records), 5.0).expect("aggregate");

    let total: f64 = buckets.iter().map(|bucket| bucket.total_volume()).sum();
    assert_eq!(total, 1.0);
}

#[test]
fn decimal_bucket_height_does_not_drift() {
    let buckets = aggregate(&bar(1.0, 1.3, vec![TradeRecord::new(1.2, 1.0, 0.0)]), 0.1)
        .expect("aggregate");

    assert_eq!(buckets.len(), 3);
    assert_relative_eq!(buckets[0].upper_bound, 1.3, epsilon = 1e-12);
    assert_relative_eq!(buckets[2].lower_bound, 1.0, epsilon = 1e-12);
    assert_eq!(buckets[1].buy_volume, 1.0);
}

#[test]
fn invalid_bucket_heights_fail_fast() {
    let sample = bar(100.0, 109.0, Vec::new());
    for height in [0.0, -1.0, f64::NAN, f64::NEG_INFINITY] {
        let err = aggregate(&sample, height).expect_err("must fail");
        assert!(matches!(err, ChartError::InvalidConfiguration(_)));
    }
}

#[test]
fn band_exposes_bounds_and_lookup() {
    let band = BucketBand::for_bar(&bar(100.0, 109.0, Vec::new()), 5.0).expect("band");
    assert_eq!(band.count, 2);
    assert_eq!(band.bounds(0), (105.0, 110.0));
    assert_eq!(band.bucket_index(109.99), Some(0));
    assert_eq!(band.bucket_index(99.0), None);
}

#[test]
fn decimal_inputs_are_accepted() {
    let record = TradeRecord::from_decimal(
        Decimal::new(10_525, 2),
        Decimal::new(15, 1),
        Decimal::new(5, 1),
    )
    .expect("record");
    let bar = FootprintBar::from_decimal(
        1,
        Decimal::new(101, 0),
        Decimal::new(109, 0),
        Decimal::new(100, 0),
        Decimal::new(108, 0),
        vec![record],
    )
    .expect("bar");

    let buckets = aggregate(&bar, 5.0).expect("aggregate");
    assert_relative_eq!(buckets[0].buy_volume, 1.5);
    assert_relative_eq!(buckets[0].buy_notional, 1.5 * 105.25);
}
