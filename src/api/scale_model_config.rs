use serde::{Deserialize, Serialize};

use crate::core::{FixedBounds, ValidationMode};
use crate::error::{ScaleError, ScaleResult};

/// Public linear scale configuration.
///
/// Mirrors the attributes a host widget exposes (`min`, `max`, `reverse`).
/// It is serializable so hosts can persist/load scale setup as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LinearScaleConfig {
    /// Fixed lower bound; `None` derives it from view data.
    #[serde(default, with = "crate::core::non_finite_f64::option")]
    pub min: Option<f64>,
    /// Fixed upper bound; `None` derives it from view data.
    #[serde(default, with = "crate::core::non_finite_f64::option")]
    pub max: Option<f64>,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub validation: ValidationMode,
}

impl LinearScaleConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    #[must_use]
    pub fn fixed_bounds(self) -> FixedBounds {
        FixedBounds::new(self.min, self.max)
    }

    pub fn from_json_str(input: &str) -> ScaleResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ScaleError::Serialization(format!("failed to parse scale config json: {e}"))
        })
    }

    pub fn to_json_pretty(self) -> ScaleResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ScaleError::Serialization(format!("failed to serialize scale config json: {e}"))
        })
    }
}
