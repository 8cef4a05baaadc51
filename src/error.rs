use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Hard failures surfaced by aggregation, option validation and backends.
///
/// Missing data, degenerate geometry and classification misses are not
/// errors; draws skip them and report them in their stats.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Style/option values the renderers refuse to work with (for example a
    /// non-positive bucket height). Never clamped to a fallback.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid frame size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    /// Malformed input values: non-finite prices, unparsable colors, bad JSON.
    #[error("invalid input: {0}")]
    InvalidData(String),
}
