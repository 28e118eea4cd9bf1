//! plotscale: reactive scale models for interactive plots.
//!
//! Several views (marks, series) report their data extents to a shared
//! [`crate::core::DomainReconciler`], which merges them into one domain honoring
//! fixed bounds and reversal and notifies subscribers only on real changes.
//! [`crate::api::LinearScaleModel`] wraps it with a serializable configuration, and
//! [`crate::interaction::Toolbar`] drives pan/zoom, reset and save on a figure.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{LinearScaleConfig, LinearScaleModel};
pub use error::{ScaleError, ScaleResult};
