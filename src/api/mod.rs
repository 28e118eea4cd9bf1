mod scale_model;
mod scale_model_config;
mod scale_model_snapshot;

pub use scale_model::LinearScaleModel;
pub use scale_model_config::LinearScaleConfig;
pub use scale_model_snapshot::{
    SCALE_MODEL_SNAPSHOT_JSON_SCHEMA_V1, ScaleModelSnapshot, ScaleModelSnapshotJsonContractV1,
};
