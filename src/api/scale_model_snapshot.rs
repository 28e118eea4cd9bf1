use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Domain, ViewExtent, ViewKey};
use crate::error::{ScaleError, ScaleResult};

use super::LinearScaleConfig;

pub const SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleModelSnapshot {
    pub config: LinearScaleConfig,
    pub domain: Domain,
    /// Per-view extents in registration order.
    pub views: IndexMap<ViewKey, ViewExtent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaleModelSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ScaleModelSnapshot,
}

impl ScaleModelSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ScaleResult<String> {
        let payload = ScaleModelSnapshotJsonContractV1 {
            schema_version: SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScaleError::Serialization(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ScaleResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ScaleModelSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ScaleModelSnapshotJsonContractV1 =
            serde_json::from_str(input).map_err(|e| {
                ScaleError::Serialization(format!("failed to parse snapshot json payload: {e}"))
            })?;
        if payload.schema_version != SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ScaleError::Serialization(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
