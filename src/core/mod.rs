pub mod bucket;
pub mod classification;
pub mod coordinate;
pub mod footprint;
pub mod heatmap;
pub mod layout;
pub mod math;
pub mod primitives;
pub mod types;

pub use bucket::{BucketBand, MAX_BUCKETS_PER_BAR, PriceBucket, aggregate, point_of_control};
pub use classification::{
    DensityTable, DensityTier, ThresholdTable, ThresholdTier, classify, classify_density,
};
pub use coordinate::{CoordinateMapper, FnCoordinateMapper, LinearCoordinateMapper};
pub use footprint::{FootprintBar, TradeRecord};
pub use heatmap::{HeatmapColumn, HeatmapSample, PriceWindow};
pub use layout::{HorizontalSpan, LayoutCursor, MAX_DEVICE_COORDINATE, to_device_px};
pub use types::{Viewport, VisibleRange};
