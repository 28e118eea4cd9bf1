pub mod domain_reconciler;
pub mod non_finite_f64;
pub mod scale;
pub mod types;

pub use domain_reconciler::{
    DomainReconciler, SENTINEL_HIGH, SENTINEL_LOW, SubscriptionId, extent_from_samples,
};
pub use scale::{LinearScale, OutputRange};
pub use types::{Domain, FixedBounds, Samples, ValidationMode, ViewExtent, ViewKey};
