use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::layout::{
    MAX_DEVICE_COORDINATE, inner_border_rects, resolve_body_width, resolve_border_width,
    resolve_wick_width, to_device_px,
};
use crate::core::math::format_amount;
use crate::core::types::validate_pixel_ratio;
use crate::core::{
    CoordinateMapper, FootprintBar, HorizontalSpan, LayoutCursor, PriceBucket, VisibleRange,
    aggregate, classify,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, DrawingSurface, FontSpec, RenderRect};

use super::{ClusterMode, ClusterTextType, FootprintStyleOptions};

const LABEL_FONT_FAMILY: &str = "Helvetica";
const LABEL_MIN_ROW_HEIGHT: f64 = 20.0;
const LABEL_MIN_ROW_WIDTH: i64 = 60;

/// Per-frame input handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintRenderData {
    pub bars: Arc<[FootprintBar]>,
    /// `None` until the host has resolved which bars are on screen.
    pub visible_range: Option<VisibleRange>,
    /// Distance between neighboring bar centers in media pixels.
    pub bar_spacing: f64,
    pub options: FootprintStyleOptions,
}

impl FootprintRenderData {
    #[must_use]
    pub fn new(
        bars: impl Into<Arc<[FootprintBar]>>,
        bar_spacing: f64,
        options: FootprintStyleOptions,
    ) -> Self {
        Self {
            bars: bars.into(),
            visible_range: None,
            bar_spacing,
            options,
        }
    }

    #[must_use]
    pub fn with_visible_range(mut self, visible_range: VisibleRange) -> Self {
        self.visible_range = Some(visible_range);
        self
    }
}

/// Counters collected during one [`FootprintRenderer::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FootprintDrawStats {
    pub bars_visited: usize,
    /// Bars whose projected coordinates were not finite.
    pub bars_skipped: usize,
    pub bodies_drawn: usize,
    pub buckets_drawn: usize,
    pub labels_drawn: usize,
    pub wicks_drawn: usize,
    pub borders_drawn: usize,
    pub degenerate_skipped: usize,
}

/// Device-pixel projection of one visible bar.
#[derive(Debug, Clone, Copy)]
struct ProjectedBar {
    index: usize,
    center_x: i64,
    body_top: i64,
    body_bottom: i64,
    wick_top: i64,
    wick_bottom: i64,
    color: Color,
}

/// Widths shared by every bar of one frame.
#[derive(Debug, Clone, Copy)]
struct FrameMetrics {
    pixel_ratio: f64,
    bar_spacing: f64,
    body_width: i64,
    wick_width: i64,
    border_width: i64,
}

/// Draws footprint bars: candle bodies, bucket rows with labels, wicks and
/// borders, in that order.
#[derive(Debug, Default)]
pub struct FootprintRenderer {
    data: Option<FootprintRenderData>,
}

impl FootprintRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_data(&mut self, data: FootprintRenderData) -> ChartResult<()> {
        data.options.validate()?;
        if !data.bar_spacing.is_finite() || data.bar_spacing <= 0.0 {
            return Err(ChartError::InvalidConfiguration(format!(
                "bar spacing must be finite and > 0, got {}",
                data.bar_spacing
            )));
        }
        debug!(
            bars = data.bars.len(),
            bar_spacing = data.bar_spacing,
            visible = ?data.visible_range,
            "footprint data set"
        );
        self.data = Some(data);
        Ok(())
    }

    pub fn clear_data(&mut self) {
        self.data = None;
    }

    #[must_use]
    pub fn data(&self) -> Option<&FootprintRenderData> {
        self.data.as_ref()
    }

    /// Draws the visible bars onto `surface`.
    ///
    /// Missing data or an empty visible range draws nothing. A bar whose
    /// geometry degenerates is skipped without affecting its neighbors.
    pub fn draw<S, M>(
        &self,
        surface: &mut S,
        mapper: &M,
        pixel_ratio: f64,
    ) -> ChartResult<FootprintDrawStats>
    where
        S: DrawingSurface + ?Sized,
        M: CoordinateMapper + ?Sized,
    {
        let mut stats = FootprintDrawStats::default();
        let Some(data) = self.data.as_ref() else {
            return Ok(stats);
        };
        let Some(range) = data.visible_range.map(|range| range.clamped_to(data.bars.len())) else {
            return Ok(stats);
        };
        if range.is_empty() {
            return Ok(stats);
        }
        let pixel_ratio = validate_pixel_ratio(pixel_ratio)?;

        let options = &data.options;
        let body_width = resolve_body_width(data.bar_spacing, pixel_ratio, options.align_edges)
            .min(MAX_DEVICE_COORDINATE);
        let metrics = FrameMetrics {
            pixel_ratio,
            bar_spacing: data.bar_spacing,
            body_width,
            wick_width: resolve_wick_width(data.bar_spacing, pixel_ratio, body_width),
            border_width: resolve_border_width(body_width, pixel_ratio),
        };

        let mut projected = Vec::with_capacity(range.len());
        for index in range.from..range.to {
            stats.bars_visited += 1;
            match project_bar(&data.bars[index], index, mapper, options, pixel_ratio) {
                Some(bar) => projected.push(bar),
                None => stats.bars_skipped += 1,
            }
        }

        // Bucket-cap errors abort the frame, so every visible bar is
        // aggregated before anything reaches the surface.
        let clusters = if options.cluster_visible {
            aggregate_visible(&projected, &data.bars, options.cluster_size_y)?
        } else {
            Vec::new()
        };

        if options.candle_body_visible {
            draw_bodies(surface, &projected, &metrics, options, &mut stats)?;
        }
        if options.cluster_visible {
            draw_clusters(surface, &projected, &clusters, mapper, &metrics, options, &mut stats)?;
        }
        if options.candle_wick_visible {
            draw_wicks(surface, &projected, &metrics, &mut stats)?;
        }
        if options.candle_border_visible {
            draw_borders(surface, &projected, &metrics, &mut stats)?;
        }

        trace!(
            from = range.from,
            to = range.to,
            body_width,
            bodies = stats.bodies_drawn,
            buckets = stats.buckets_drawn,
            labels = stats.labels_drawn,
            skipped = stats.bars_skipped,
            degenerate = stats.degenerate_skipped,
            "footprint frame drawn"
        );
        Ok(stats)
    }
}

/// Buckets of every projected bar, in the same order. Bars without trades or
/// with unusable extents get `None`; a bucket height that yields too many
/// buckets fails the whole frame.
fn aggregate_visible(
    bars: &[ProjectedBar],
    source: &[FootprintBar],
    bucket_height: f64,
) -> ChartResult<Vec<Option<Vec<PriceBucket>>>> {
    bars.iter()
        .map(|projected| {
            let bar = &source[projected.index];
            if bar.records.is_empty() {
                return Ok(None);
            }
            match aggregate(bar, bucket_height) {
                Ok(buckets) => Ok(Some(buckets)),
                Err(ChartError::InvalidData(reason)) => {
                    warn!(time_index = bar.time_index, %reason, "footprint bar skipped");
                    Ok(None)
                }
                Err(err) => Err(err),
            }
        })
        .collect()
}

fn project_bar<M: CoordinateMapper + ?Sized>(
    bar: &FootprintBar,
    index: usize,
    mapper: &M,
    options: &FootprintStyleOptions,
    pixel_ratio: f64,
) -> Option<ProjectedBar> {
    let center_x = to_device_px(mapper.index_to_x(bar.time_index), pixel_ratio)?;
    let open_y = to_device_px(mapper.price_to_y(bar.open), pixel_ratio)?;
    let close_y = to_device_px(mapper.price_to_y(bar.close), pixel_ratio)?;
    let high_y = to_device_px(mapper.price_to_y(bar.high), pixel_ratio)?;
    let low_y = to_device_px(mapper.price_to_y(bar.low), pixel_ratio)?;

    Some(ProjectedBar {
        index,
        center_x,
        body_top: open_y.min(close_y),
        body_bottom: open_y.max(close_y),
        wick_top: high_y.min(low_y),
        wick_bottom: high_y.max(low_y),
        color: options.candle_color(bar.is_bullish()),
    })
}

fn draw_bodies<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    bars: &[ProjectedBar],
    metrics: &FrameMetrics,
    options: &FootprintStyleOptions,
    stats: &mut FootprintDrawStats,
) -> ChartResult<()> {
    let inset = if options.candle_border_visible {
        metrics.border_width
    } else {
        0
    };

    let mut cursor = LayoutCursor::new();
    for bar in bars {
        let (span, next) = cursor.place(bar.center_x, metrics.body_width);
        cursor = next;
        let rect = RenderRect::new(
            span.left + inset,
            bar.body_top + inset,
            span.right - inset,
            bar.body_bottom - inset,
            bar.color,
        );
        if surface.fill_render_rect(&rect)? {
            stats.bodies_drawn += 1;
        } else {
            stats.degenerate_skipped += 1;
        }
    }
    Ok(())
}

fn draw_clusters<S, M>(
    surface: &mut S,
    bars: &[ProjectedBar],
    clusters: &[Option<Vec<PriceBucket>>],
    mapper: &M,
    metrics: &FrameMetrics,
    options: &FootprintStyleOptions,
    stats: &mut FootprintDrawStats,
) -> ChartResult<()>
where
    S: DrawingSurface + ?Sized,
    M: CoordinateMapper + ?Sized,
{
    let mut cursor = LayoutCursor::new();
    for (projected, buckets) in bars.iter().zip(clusters) {
        let (span, next) = cursor.place(projected.center_x, metrics.body_width);
        cursor = next;
        let Some(buckets) = buckets else {
            continue;
        };
        let (Some(first), Some(last)) = (buckets.first(), buckets.last()) else {
            continue;
        };
        let high_y = to_device_px(mapper.price_to_y(first.upper_bound), metrics.pixel_ratio);
        let low_y = to_device_px(mapper.price_to_y(last.lower_bound), metrics.pixel_ratio);
        let (Some(high_y), Some(low_y)) = (high_y, low_y) else {
            stats.degenerate_skipped += 1;
            continue;
        };
        // Bucket 0 holds the highest prices; on an upward price axis it is
        // the bottom row.
        let upward = high_y > low_y;
        let band = BandRows::new(high_y.min(low_y), high_y.max(low_y), buckets.len());
        let last_row = buckets.len() - 1;
        let poc_volume = buckets
            .iter()
            .find(|bucket| bucket.is_point_of_control)
            .map(PriceBucket::total_volume);

        for (index, bucket) in buckets.iter().enumerate() {
            let row = if upward { last_row - index } else { index };
            let Some((row_top, row_bottom)) = band.row(row) else {
                stats.degenerate_skipped += 1;
                continue;
            };

            let filled = match &options.cluster_mode {
                ClusterMode::Cluster { tiers } => {
                    let color = classify(
                        bucket.buy_notional,
                        bucket.sell_notional,
                        tiers,
                        options.cluster_color,
                    );
                    Some(RenderRect::new(span.left, row_top, span.right, row_bottom, color))
                }
                ClusterMode::VolumeProfile(colors) => {
                    profile_row(span, row_top, row_bottom, bucket, poc_volume).map(|(left, right)| {
                        let color = if bucket.is_point_of_control {
                            colors.poc_color
                        } else if bucket.buy_volume > bucket.sell_volume {
                            colors.buy_color
                        } else if bucket.sell_volume > bucket.buy_volume {
                            colors.sell_color
                        } else {
                            colors.neutral_color
                        };
                        RenderRect::new(left, row_top, right, row_bottom, color)
                    })
                }
            };
            let drawn = match filled {
                Some(rect) => surface.fill_render_rect(&rect)?,
                None => false,
            };
            if !drawn {
                continue;
            }
            stats.buckets_drawn += 1;

            if band.row_height > LABEL_MIN_ROW_HEIGHT && span.width() > LABEL_MIN_ROW_WIDTH {
                let font = FontSpec::new(label_font_size(band.row_height), LABEL_FONT_FAMILY);
                surface.set_font(&font);
                surface.set_fill_color(options.cluster_text_color);
                surface.fill_text_centered(
                    &bucket_label(bucket, options.cluster_text_type),
                    span.left as f64 + span.width() as f64 / 2.0,
                    row_top as f64 + band.row_height / 2.0,
                )?;
                stats.labels_drawn += 1;
            }
        }
    }
    Ok(())
}

/// Vertical split of a bar's price band into equally sized bucket rows.
#[derive(Debug, Clone, Copy)]
struct BandRows {
    top: i64,
    row_height: f64,
}

impl BandRows {
    fn new(top: i64, bottom: i64, rows: usize) -> Self {
        let height = (bottom - top + 1) as f64;
        Self {
            top,
            row_height: height / rows.max(1) as f64,
        }
    }

    /// Inclusive pixel rows of bucket `row`. Rows of two or more pixels keep
    /// a one-pixel gap at their bottom.
    fn row(self, row: usize) -> Option<(i64, i64)> {
        let row_top = self.top + (row as f64 * self.row_height).round() as i64;
        let next_top = self.top + ((row + 1) as f64 * self.row_height).round() as i64;
        let mut row_bottom = next_top - 1;
        if row_bottom < row_top {
            return None;
        }
        if row_bottom > row_top {
            row_bottom -= 1;
        }
        Some((row_top, row_bottom))
    }
}

/// Left-anchored horizontal extent of a volume-profile row, proportional to
/// the bucket volume relative to the point of control.
fn profile_row(
    span: HorizontalSpan,
    row_top: i64,
    row_bottom: i64,
    bucket: &PriceBucket,
    poc_volume: Option<f64>,
) -> Option<(i64, i64)> {
    let poc_volume = poc_volume.filter(|volume| *volume > 0.0)?;
    let volume = bucket.total_volume();
    if volume <= 0.0 || row_top > row_bottom {
        return None;
    }
    let ratio = (volume / poc_volume).min(1.0);
    let width = ((span.width() as f64 * ratio).round() as i64).max(1);
    Some((span.left, span.left + width - 1))
}

fn label_font_size(row_height: f64) -> f64 {
    if row_height < 25.0 {
        9.0
    } else if row_height < 30.0 {
        10.0
    } else if row_height < 40.0 {
        11.0
    } else {
        12.0
    }
}

fn bucket_label(bucket: &PriceBucket, text_type: ClusterTextType) -> String {
    match text_type {
        ClusterTextType::Volume => format_amount(bucket.total_notional()),
        ClusterTextType::Delta => format_amount(bucket.notional_delta()),
        ClusterTextType::BidAsk => format!(
            "{}   {}",
            format_amount(bucket.sell_notional),
            format_amount(bucket.buy_notional)
        ),
    }
}

fn draw_wicks<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    bars: &[ProjectedBar],
    metrics: &FrameMetrics,
    stats: &mut FootprintDrawStats,
) -> ChartResult<()> {
    let mut cursor = LayoutCursor::new();
    for bar in bars {
        let (span, next) = cursor.place(bar.center_x, metrics.wick_width);
        cursor = next;
        let upper = RenderRect::new(span.left, bar.wick_top, span.right, bar.body_top - 1, bar.color);
        let lower = RenderRect::new(
            span.left,
            bar.body_bottom + 1,
            span.right,
            bar.wick_bottom,
            bar.color,
        );
        for stub in [upper, lower] {
            if surface.fill_render_rect(&stub)? {
                stats.wicks_drawn += 1;
            }
        }
    }
    Ok(())
}

fn draw_borders<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    bars: &[ProjectedBar],
    metrics: &FrameMetrics,
    stats: &mut FootprintDrawStats,
) -> ChartResult<()> {
    let hollow = metrics.bar_spacing * metrics.pixel_ratio > 2.0 * metrics.border_width as f64;

    let mut cursor = LayoutCursor::new();
    for bar in bars {
        let (span, next) = cursor.place(bar.center_x, metrics.body_width);
        cursor = next;
        let outline = RenderRect::new(span.left, bar.body_top, span.right, bar.body_bottom, bar.color);
        if outline.is_degenerate() {
            stats.degenerate_skipped += 1;
            continue;
        }

        if hollow {
            for strip in inner_border_rects(&outline, metrics.border_width, bar.color) {
                surface.fill_render_rect(&strip)?;
            }
        } else {
            surface.fill_render_rect(&outline)?;
        }
        stats.borders_drawn += 1;
    }
    Ok(())
}
