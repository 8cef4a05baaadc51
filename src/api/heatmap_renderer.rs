use std::sync::Arc;

use ordered_float::OrderedFloat;
use tracing::{debug, trace};

use crate::core::types::validate_pixel_ratio;
use crate::core::{
    CoordinateMapper, HeatmapColumn, HorizontalSpan, PriceWindow, VisibleRange, classify_density,
    to_device_px,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{DrawingSurface, RenderRect};

use super::HeatmapStyleOptions;

/// Per-frame input handed over by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapRenderData {
    pub columns: Arc<[HeatmapColumn]>,
    pub visible_range: Option<VisibleRange>,
    /// Distance between neighboring column centers in media pixels.
    pub bar_spacing: f64,
    /// Samples outside this window are not drawn.
    pub price_window: Option<PriceWindow>,
    pub options: HeatmapStyleOptions,
}

impl HeatmapRenderData {
    #[must_use]
    pub fn new(
        columns: impl Into<Arc<[HeatmapColumn]>>,
        bar_spacing: f64,
        options: HeatmapStyleOptions,
    ) -> Self {
        Self {
            columns: columns.into(),
            visible_range: None,
            bar_spacing,
            price_window: None,
            options,
        }
    }

    #[must_use]
    pub fn with_visible_range(mut self, visible_range: VisibleRange) -> Self {
        self.visible_range = Some(visible_range);
        self
    }

    #[must_use]
    pub fn with_price_window(mut self, price_window: PriceWindow) -> Self {
        self.price_window = Some(price_window);
        self
    }
}

/// Cached horizontal placement of one visible column, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnGeometry {
    /// Position of the column in [`HeatmapRenderData::columns`].
    pub index: usize,
    pub time_index: i64,
    pub left: i64,
    pub right: i64,
    pub center_x: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeatmapDrawStats {
    pub columns_visited: usize,
    pub blocks_drawn: usize,
    /// Samples outside the price window or above the top edge.
    pub samples_clipped: usize,
    /// Samples below every density threshold.
    pub samples_unclassified: usize,
    pub geometry_rebuilt: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GeometryKey {
    visible_range: VisibleRange,
    bar_spacing: OrderedFloat<f64>,
    pixel_ratio: OrderedFloat<f64>,
}

#[derive(Debug, Clone)]
struct GeometryCache {
    key: GeometryKey,
    columns: Vec<ColumnGeometry>,
}

/// Draws one block per density sample, reusing column geometry across
/// frames until the viewport changes.
///
/// Column x positions are read from the mapper only when the cache is
/// rebuilt; callers that move the time axis without changing the visible
/// range or spacing must call [`HeatmapRenderer::invalidate_geometry`].
#[derive(Debug, Default)]
pub struct HeatmapRenderer {
    data: Option<HeatmapRenderData>,
    cache: Option<GeometryCache>,
    cache_builds: u64,
}

impl HeatmapRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole data set and drops cached geometry.
    pub fn set_data(&mut self, data: HeatmapRenderData) -> ChartResult<()> {
        data.options.validate()?;
        validate_bar_spacing(data.bar_spacing)?;
        debug!(
            columns = data.columns.len(),
            bar_spacing = data.bar_spacing,
            visible = ?data.visible_range,
            "heatmap data set"
        );
        self.data = Some(data);
        self.cache = None;
        Ok(())
    }

    pub fn clear_data(&mut self) {
        self.data = None;
        self.cache = None;
    }

    #[must_use]
    pub fn data(&self) -> Option<&HeatmapRenderData> {
        self.data.as_ref()
    }

    /// Restyles the series. Geometry is unaffected.
    pub fn set_options(&mut self, options: HeatmapStyleOptions) -> ChartResult<()> {
        options.validate()?;
        if let Some(data) = self.data.as_mut() {
            data.options = options;
        }
        Ok(())
    }

    /// Swaps in new sample values. Geometry survives when the columns keep
    /// their time indices.
    pub fn update_samples(&mut self, columns: impl Into<Arc<[HeatmapColumn]>>) {
        let columns = columns.into();
        let Some(data) = self.data.as_mut() else {
            return;
        };
        let same_layout = data.columns.len() == columns.len()
            && data
                .columns
                .iter()
                .zip(columns.iter())
                .all(|(old, new)| old.time_index == new.time_index);
        if !same_layout {
            trace!("heatmap column layout changed");
            self.cache = None;
        }
        data.columns = columns;
    }

    /// Moves the viewport. Geometry is dropped only if range or spacing
    /// actually changed.
    pub fn set_viewport(
        &mut self,
        visible_range: Option<VisibleRange>,
        bar_spacing: f64,
    ) -> ChartResult<()> {
        validate_bar_spacing(bar_spacing)?;
        let Some(data) = self.data.as_mut() else {
            return Ok(());
        };
        if data.visible_range != visible_range || data.bar_spacing != bar_spacing {
            data.visible_range = visible_range;
            data.bar_spacing = bar_spacing;
            self.cache = None;
        }
        Ok(())
    }

    pub fn set_price_window(&mut self, price_window: Option<PriceWindow>) {
        if let Some(data) = self.data.as_mut() {
            data.price_window = price_window;
        }
    }

    pub fn invalidate_geometry(&mut self) {
        self.cache = None;
    }

    /// Geometry cached by the last draw; empty when invalidated.
    #[must_use]
    pub fn column_geometry(&self) -> &[ColumnGeometry] {
        match &self.cache {
            Some(cache) => &cache.columns,
            None => &[],
        }
    }

    /// Number of times column geometry has been computed.
    #[must_use]
    pub fn cache_builds(&self) -> u64 {
        self.cache_builds
    }

    pub fn draw<S, M>(
        &mut self,
        surface: &mut S,
        mapper: &M,
        pixel_ratio: f64,
    ) -> ChartResult<HeatmapDrawStats>
    where
        S: DrawingSurface + ?Sized,
        M: CoordinateMapper + ?Sized,
    {
        let mut stats = HeatmapDrawStats::default();
        let Some(data) = self.data.as_ref() else {
            return Ok(stats);
        };
        let Some(range) = data
            .visible_range
            .map(|range| range.clamped_to(data.columns.len()))
        else {
            return Ok(stats);
        };
        if range.is_empty() {
            return Ok(stats);
        }
        let pixel_ratio = validate_pixel_ratio(pixel_ratio)?;

        let key = GeometryKey {
            visible_range: range,
            bar_spacing: OrderedFloat(data.bar_spacing),
            pixel_ratio: OrderedFloat(pixel_ratio),
        };
        if self.cache.as_ref().is_none_or(|cache| cache.key != key) {
            let columns = build_geometry(data, range, mapper, pixel_ratio);
            debug!(
                from = range.from,
                to = range.to,
                columns = columns.len(),
                bar_spacing = data.bar_spacing,
                pixel_ratio,
                "heatmap column geometry rebuilt"
            );
            self.cache = Some(GeometryCache { key, columns });
            self.cache_builds += 1;
            stats.geometry_rebuilt = true;
        }
        let Some(cache) = self.cache.as_ref() else {
            return Ok(stats);
        };

        let options = &data.options;
        let block_height = options.block_height_px(pixel_ratio);
        for geometry in &cache.columns {
            stats.columns_visited += 1;
            for sample in &data.columns[geometry.index].samples {
                if data
                    .price_window
                    .is_some_and(|window| !window.contains(sample.price))
                {
                    stats.samples_clipped += 1;
                    continue;
                }
                let Some(color) = classify_density(sample.value, &options.tiers) else {
                    stats.samples_unclassified += 1;
                    continue;
                };
                let Some(y) = to_device_px(mapper.price_to_y(sample.price), pixel_ratio)
                    .filter(|y| *y > 0)
                else {
                    stats.samples_clipped += 1;
                    continue;
                };

                let top = y - block_height.div_euclid(2);
                let block = RenderRect::new(
                    geometry.left,
                    top,
                    geometry.right,
                    top + block_height - 1,
                    color,
                );
                surface.set_global_alpha(options.alpha);
                if surface.fill_render_rect(&block)? {
                    stats.blocks_drawn += 1;
                }
            }
        }
        if stats.blocks_drawn > 0 {
            surface.set_global_alpha(1.0);
        }

        trace!(
            columns = stats.columns_visited,
            blocks = stats.blocks_drawn,
            clipped = stats.samples_clipped,
            "heatmap frame drawn"
        );
        Ok(stats)
    }
}

fn validate_bar_spacing(bar_spacing: f64) -> ChartResult<()> {
    if !bar_spacing.is_finite() || bar_spacing <= 0.0 {
        return Err(ChartError::InvalidConfiguration(format!(
            "bar spacing must be finite and > 0, got {bar_spacing}"
        )));
    }
    Ok(())
}

fn build_geometry<M: CoordinateMapper + ?Sized>(
    data: &HeatmapRenderData,
    range: VisibleRange,
    mapper: &M,
    pixel_ratio: f64,
) -> Vec<ColumnGeometry> {
    let width = ((data.bar_spacing * pixel_ratio).round() as i64).max(1);
    (range.from..range.to)
        .filter_map(|index| {
            let column = &data.columns[index];
            let center_x = to_device_px(mapper.index_to_x(column.time_index), pixel_ratio)?;
            let span = HorizontalSpan::centered(center_x, width);
            Some(ColumnGeometry {
                index,
                time_index: column.time_index,
                left: span.left,
                right: span.right,
                center_x,
            })
        })
        .collect()
}
