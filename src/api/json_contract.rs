use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::footprint_options::FootprintStyleOptionsWire;
use super::{FootprintStyleOptions, HeatmapStyleOptions};

pub const FOOTPRINT_OPTIONS_JSON_SCHEMA_V1: u32 = 1;
pub const HEATMAP_OPTIONS_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintOptionsJsonContractV1 {
    pub schema_version: u32,
    pub options: FootprintStyleOptions,
}

/// Parse-side contract that keeps option resolution errors typed.
#[derive(Debug, Deserialize)]
struct FootprintOptionsWireContractV1 {
    schema_version: u32,
    options: FootprintStyleOptionsWire,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapOptionsJsonContractV1 {
    pub schema_version: u32,
    pub options: HeatmapStyleOptions,
}

impl FootprintStyleOptions {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize footprint options json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = FootprintOptionsJsonContractV1 {
            schema_version: FOOTPRINT_OPTIONS_JSON_SCHEMA_V1,
            options: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!(
                "failed to serialize footprint options contract v1: {e}"
            ))
        })
    }

    /// Parses bare options or a versioned contract, then validates them.
    /// Missing fields take their defaults.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let wire = if let Ok(payload) =
            serde_json::from_str::<FootprintOptionsWireContractV1>(input)
        {
            if payload.schema_version != FOOTPRINT_OPTIONS_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported footprint options schema version: {}",
                    payload.schema_version
                )));
            }
            payload.options
        } else {
            serde_json::from_str::<FootprintStyleOptionsWire>(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse footprint options json: {e}"))
            })?
        };
        let options = Self::try_from(wire)?;
        options.validate()?;
        Ok(options)
    }
}

impl HeatmapStyleOptions {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize heatmap options json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = HeatmapOptionsJsonContractV1 {
            schema_version: HEATMAP_OPTIONS_JSON_SCHEMA_V1,
            options: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize heatmap options contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        let options = if let Ok(payload) =
            serde_json::from_str::<HeatmapOptionsJsonContractV1>(input)
        {
            if payload.schema_version != HEATMAP_OPTIONS_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported heatmap options schema version: {}",
                    payload.schema_version
                )));
            }
            payload.options
        } else {
            serde_json::from_str::<Self>(input).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse heatmap options json: {e}"))
            })?
        };
        options.validate()?;
        Ok(options)
    }
}
