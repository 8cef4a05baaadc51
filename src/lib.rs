//! footprint-rs: order-flow footprint and density heatmap rendering.
//!
//! Raw per-price trades are bucketed per bar, classified against threshold
//! tables and snapped to integer device pixels before being drawn through a
//! minimal [`render::DrawingSurface`].

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{
    FootprintRenderData, FootprintRenderer, FootprintStyleOptions, HeatmapRenderData,
    HeatmapRenderer, HeatmapStyleOptions,
};
pub use error::{ChartError, ChartResult};
