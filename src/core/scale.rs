use serde::{Deserialize, Serialize};

use crate::core::types::Domain;
use crate::error::{ScaleError, ScaleResult};

/// Visual interval a scale maps its domain onto.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    pub start: f64,
    pub end: f64,
}

impl OutputRange {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Left-to-right pixel range `[0, width]`.
    #[must_use]
    pub fn horizontal(width: u32) -> Self {
        Self::new(0.0, f64::from(width))
    }

    /// Bottom-to-top pixel range `[height, 0]` (screen Y grows downwards).
    #[must_use]
    pub fn vertical(height: u32) -> Self {
        Self::new(f64::from(height), 0.0)
    }

    #[must_use]
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    fn validate(self) -> ScaleResult<Self> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start == self.end {
            return Err(ScaleError::InvalidRange {
                start: self.start,
                end: self.end,
            });
        }
        Ok(self)
    }
}

/// Linear mapping from a data domain onto an output range.
///
/// The domain is taken positionally: a reversed domain `(high, low)` maps
/// `high` onto `range.start`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range: OutputRange,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64, range: OutputRange) -> ScaleResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ScaleError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range: range.validate()?,
        })
    }

    /// Builds a scale from a reconciled domain.
    pub fn from_domain(domain: Domain, range: OutputRange) -> ScaleResult<Self> {
        let (first, second) = domain.pair().ok_or(ScaleError::EmptyDomain)?;
        Self::new(first, second, range)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> OutputRange {
        self.range
    }

    pub fn map(self, value: f64) -> ScaleResult<f64> {
        if !value.is_finite() {
            return Err(ScaleError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range.start + normalized * self.range.span())
    }

    pub fn invert(self, pixel: f64) -> ScaleResult<f64> {
        if !pixel.is_finite() {
            return Err(ScaleError::InvalidData("pixel must be finite".to_owned()));
        }

        let normalized = (pixel - self.range.start) / self.range.span();
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }
}
