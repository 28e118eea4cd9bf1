use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identity of one data-consuming view (typically one mark/series).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewKey(String);

impl ViewKey {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ViewKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&ViewKey> for ViewKey {
    fn from(value: &ViewKey) -> Self {
        value.clone()
    }
}

/// Interval a single view currently occupies in data space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ViewExtent {
    /// The view has no data yet (or its data was cleared).
    #[default]
    Empty,
    Span {
        #[serde(with = "crate::core::non_finite_f64")]
        start: f64,
        #[serde(with = "crate::core::non_finite_f64")]
        end: f64,
    },
}

impl ViewExtent {
    #[must_use]
    pub fn new(start: f64, end: f64) -> Self {
        Self::Span { start, end }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn start(self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Span { start, .. } => Some(start),
        }
    }

    #[must_use]
    pub fn end(self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Span { end, .. } => Some(end),
        }
    }
}

impl From<(f64, f64)> for ViewExtent {
    fn from((start, end): (f64, f64)) -> Self {
        Self::Span { start, end }
    }
}

impl From<[f64; 2]> for ViewExtent {
    fn from([start, end]: [f64; 2]) -> Self {
        Self::Span { start, end }
    }
}

/// Merged, possibly reversed, interval used to map data onto a visual range.
///
/// `Span(first, second)` keeps positional order: for a reversed scale
/// `first` is the high bound.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Domain {
    #[default]
    Empty,
    Span(
        #[serde(with = "crate::core::non_finite_f64")] f64,
        #[serde(with = "crate::core::non_finite_f64")] f64,
    ),
}

impl Domain {
    #[must_use]
    pub fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    #[must_use]
    pub fn pair(self) -> Option<(f64, f64)> {
        match self {
            Self::Empty => None,
            Self::Span(first, second) => Some((first, second)),
        }
    }

    /// Value stored at position `index` (0 or 1).
    #[must_use]
    pub fn at(self, index: usize) -> Option<f64> {
        match (self, index) {
            (Self::Span(first, _), 0) => Some(first),
            (Self::Span(_, second), 1) => Some(second),
            _ => None,
        }
    }

    /// Same bounds with positions swapped.
    #[must_use]
    pub fn swapped(self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Span(first, second) => Self::Span(second, first),
        }
    }
}

/// Raw numeric samples reported by one view.
///
/// `Nested` carries several series of the same view; extents are taken over
/// all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Samples {
    Flat(Vec<f64>),
    Nested(Vec<Vec<f64>>),
}

impl Samples {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Flat(values) => values.is_empty(),
            Self::Nested(series) => series.is_empty(),
        }
    }

    /// Number of scalar samples across all series.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(values) => values.len(),
            Self::Nested(series) => series.iter().map(Vec::len).sum(),
        }
    }
}

impl From<Vec<f64>> for Samples {
    fn from(values: Vec<f64>) -> Self {
        Self::Flat(values)
    }
}

impl From<&[f64]> for Samples {
    fn from(values: &[f64]) -> Self {
        Self::Flat(values.to_vec())
    }
}

impl From<Vec<Vec<f64>>> for Samples {
    fn from(series: Vec<Vec<f64>>) -> Self {
        Self::Nested(series)
    }
}

/// User-fixed overrides for either side of the merged domain.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FixedBounds {
    #[serde(default, with = "crate::core::non_finite_f64::option")]
    pub min: Option<f64>,
    #[serde(default, with = "crate::core::non_finite_f64::option")]
    pub max: Option<f64>,
}

impl FixedBounds {
    #[must_use]
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn min_from_data(self) -> bool {
        self.min.is_none()
    }

    #[must_use]
    pub fn max_from_data(self) -> bool {
        self.max.is_none()
    }
}

/// Input validation policy applied by the reconciler setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Accept every input; degenerate input yields a degenerate domain.
    #[default]
    Permissive,
    /// Reject non-finite values and inverted pairs.
    Strict,
}
