use thiserror::Error;

pub type ScaleResult<T> = Result<T, ScaleError>;

#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid output range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("inverted bounds rejected in strict mode: low={low}, high={high}")]
    InvertedBounds { low: f64, high: f64 },

    #[error("scale domain is empty")]
    EmptyDomain,

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("figure host error: {0}")]
    Figure(String),
}
