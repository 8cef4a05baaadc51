//! Stateful renderers and their style options.

mod footprint_options;
mod footprint_renderer;
mod heatmap_options;
mod heatmap_renderer;
mod json_contract;

pub use footprint_options::{
    ClusterMode, ClusterTextType, FootprintStyleOptions, VolumeProfileColors,
    default_cluster_tiers,
};
pub use footprint_renderer::{FootprintDrawStats, FootprintRenderData, FootprintRenderer};
pub use heatmap_options::{HeatmapStyleOptions, default_density_tiers};
pub use heatmap_renderer::{
    ColumnGeometry, HeatmapDrawStats, HeatmapRenderData, HeatmapRenderer,
};
pub use json_contract::{
    FOOTPRINT_OPTIONS_JSON_SCHEMA_V1, FootprintOptionsJsonContractV1,
    HEATMAP_OPTIONS_JSON_SCHEMA_V1, HeatmapOptionsJsonContractV1,
};
