use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;
use tracing::{debug, trace};

#[cfg(feature = "parallel-samples")]
use rayon::prelude::*;

use crate::core::types::{Domain, FixedBounds, Samples, ValidationMode, ViewExtent, ViewKey};
use crate::error::{ScaleError, ScaleResult};

/// Identity of the max fold: a view without data reports this as its end.
pub const SENTINEL_LOW: f64 = f64::NEG_INFINITY;
/// Identity of the min fold: a view without data reports this as its start.
pub const SENTINEL_HIGH: f64 = f64::INFINITY;

#[cfg(feature = "parallel-samples")]
const PARALLEL_SAMPLE_THRESHOLD: usize = 16_384;

/// Handle returned by [`DomainReconciler::on_domain_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type DomainHandler = Box<dyn FnMut(&Domain)>;

/// Merges per-view extents into one shared scale domain.
///
/// The stored domain is always the pure function of the current view
/// extents, fixed bounds and reversal flag. Subscribers are only notified
/// when the recomputed pair differs from the stored one, except for
/// [`set_reversed`](Self::set_reversed) which always notifies once a domain
/// exists.
pub struct DomainReconciler {
    views: IndexMap<ViewKey, ViewExtent>,
    fixed: FixedBounds,
    reversed: bool,
    domain: Domain,
    validation: ValidationMode,
    subscribers: SmallVec<[(SubscriptionId, DomainHandler); 2]>,
    next_subscription: u64,
}

impl std::fmt::Debug for DomainReconciler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomainReconciler")
            .field("views", &self.views)
            .field("fixed", &self.fixed)
            .field("reversed", &self.reversed)
            .field("domain", &self.domain)
            .field("validation", &self.validation)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for DomainReconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::with_validation(ValidationMode::Permissive)
    }

    #[must_use]
    pub fn with_validation(validation: ValidationMode) -> Self {
        Self {
            views: IndexMap::new(),
            fixed: FixedBounds::default(),
            reversed: false,
            domain: Domain::Empty,
            validation,
            subscribers: SmallVec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.domain
    }

    #[must_use]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub fn fixed_bounds(&self) -> FixedBounds {
        self.fixed
    }

    #[must_use]
    pub fn validation_mode(&self) -> ValidationMode {
        self.validation
    }

    /// Switches the validation policy for subsequent calls.
    ///
    /// Already stored state is not re-validated.
    pub fn set_validation_mode(&mut self, validation: ValidationMode) {
        self.validation = validation;
    }

    #[must_use]
    pub fn view_extent(&self, key: &ViewKey) -> Option<ViewExtent> {
        self.views.get(key).copied()
    }

    #[must_use]
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn views(&self) -> impl Iterator<Item = (&ViewKey, ViewExtent)> {
        self.views.iter().map(|(key, extent)| (key, *extent))
    }

    /// `true` when no registered view has data and no fixed bound is set.
    ///
    /// In that state the merged pair degenerates to
    /// `[SENTINEL_HIGH, SENTINEL_LOW]`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fixed.min.is_none()
            && self.fixed.max.is_none()
            && self.views.values().all(|extent| extent.is_empty())
    }

    /// Registers a domain-changed handler. Handlers run in registration order.
    pub fn on_domain_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&Domain) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler. Returns `true` when it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        if let Some(position) = self
            .subscribers
            .iter()
            .position(|(entry, _)| *entry == id)
        {
            self.subscribers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Sets or clears the fixed overrides. `None` derives that side from data.
    pub fn set_fixed_bounds(&mut self, min: Option<f64>, max: Option<f64>) -> ScaleResult<()> {
        if self.validation == ValidationMode::Strict {
            validate_fixed_bounds(min, max)?;
        }
        self.store_fixed_bounds(FixedBounds::new(min, max));
        Ok(())
    }

    /// Derives both sides from data again. Valid under every validation mode.
    pub fn clear_fixed_bounds(&mut self) {
        self.store_fixed_bounds(FixedBounds::default());
    }

    fn store_fixed_bounds(&mut self, fixed: FixedBounds) {
        self.fixed = fixed;
        debug!(
            min = ?fixed.min,
            max = ?fixed.max,
            min_from_data = fixed.min_from_data(),
            max_from_data = fixed.max_from_data(),
            "set fixed bounds"
        );
        self.recompute();
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        let orientation_changed = self.reversed != reversed;
        self.reversed = reversed;
        if self.domain.is_empty() {
            trace!(reversed, "reversal stored before any domain exists");
            return;
        }
        if orientation_changed {
            self.domain = self.domain.swapped();
        }
        debug!(reversed, domain = ?self.domain, "domain reversal applied");
        self.notify();
    }

    /// Stores or overwrites one view's extent and recomputes the domain.
    ///
    /// `ViewExtent::Empty` drops the view's contribution but keeps it
    /// registered.
    pub fn set_view_extent(
        &mut self,
        key: impl Into<ViewKey>,
        extent: ViewExtent,
    ) -> ScaleResult<()> {
        let key = key.into();
        if self.validation == ValidationMode::Strict {
            validate_extent(&key, extent)?;
        }
        trace!(view = %key, ?extent, "set view extent");
        self.views.insert(key, extent);
        self.recompute();
        Ok(())
    }

    /// Derives `[min, max]` over all samples of a view and stores it.
    pub fn compute_and_set_extent_from_samples(
        &mut self,
        key: impl Into<ViewKey>,
        samples: &Samples,
    ) -> ScaleResult<()> {
        let extent = extent_from_samples(samples);
        self.set_view_extent(key, extent)
    }

    /// Drops a view registration entirely. Returns `true` when it existed.
    pub fn remove_view(&mut self, key: &ViewKey) -> bool {
        if self.views.shift_remove(key).is_none() {
            return false;
        }
        debug!(view = %key, remaining = self.views.len(), "removed view");
        self.recompute();
        true
    }

    fn merged_min(&self) -> f64 {
        match self.fixed.min {
            Some(min) => min,
            None => self
                .views
                .values()
                .map(|extent| extent.start().unwrap_or(SENTINEL_HIGH))
                .fold(SENTINEL_HIGH, f64::min),
        }
    }

    fn merged_max(&self) -> f64 {
        match self.fixed.max {
            Some(max) => max,
            None => self
                .views
                .values()
                .map(|extent| extent.end().unwrap_or(SENTINEL_LOW))
                .fold(SENTINEL_LOW, f64::max),
        }
    }

    /// Floats compare through `OrderedFloat`, so a NaN bound equal to the
    /// stored NaN counts as unchanged and does not notify again.
    fn recompute(&mut self) {
        let min = self.merged_min();
        let max = self.merged_max();
        let min_index = usize::from(self.reversed);

        let unchanged = matches!(
            (self.domain.at(min_index), self.domain.at(1 - min_index)),
            (Some(prev_min), Some(prev_max))
                if OrderedFloat(prev_min) == OrderedFloat(min)
                    && OrderedFloat(prev_max) == OrderedFloat(max)
        );
        if unchanged {
            trace!(min, max, "domain unchanged");
            return;
        }

        self.domain = if self.reversed {
            Domain::Span(max, min)
        } else {
            Domain::Span(min, max)
        };
        debug!(domain = ?self.domain, views = self.views.len(), "domain changed");
        self.notify();
    }

    fn notify(&mut self) {
        let domain = self.domain;
        for (_, handler) in &mut self.subscribers {
            handler(&domain);
        }
    }
}

/// Global `[min, max]` across every sample, ignoring NaN.
///
/// Returns `ViewExtent::Empty` when there is no comparable sample.
#[must_use]
pub fn extent_from_samples(samples: &Samples) -> ViewExtent {
    let bounds = match samples {
        Samples::Flat(values) => reduce_values(values),
        Samples::Nested(series) => reduce_series(series),
    };
    match bounds {
        Some((start, end)) => ViewExtent::Span { start, end },
        None => ViewExtent::Empty,
    }
}

fn merge_bounds(a: Option<(f64, f64)>, b: Option<(f64, f64)>) -> Option<(f64, f64)> {
    match (a, b) {
        (Some((a_min, a_max)), Some((b_min, b_max))) => Some((a_min.min(b_min), a_max.max(b_max))),
        (Some(bounds), None) | (None, Some(bounds)) => Some(bounds),
        (None, None) => None,
    }
}

fn reduce_values(values: &[f64]) -> Option<(f64, f64)> {
    #[cfg(feature = "parallel-samples")]
    {
        if values.len() >= PARALLEL_SAMPLE_THRESHOLD {
            return values
                .par_iter()
                .copied()
                .filter(|value| !value.is_nan())
                .map(|value| Some((value, value)))
                .reduce(|| None, merge_bounds);
        }
    }

    values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .fold(None, |acc, value| merge_bounds(acc, Some((value, value))))
}

fn reduce_series(series: &[Vec<f64>]) -> Option<(f64, f64)> {
    #[cfg(feature = "parallel-samples")]
    {
        let total: usize = series.iter().map(Vec::len).sum();
        if total >= PARALLEL_SAMPLE_THRESHOLD {
            return series
                .par_iter()
                .map(|values| reduce_values(values))
                .reduce(|| None, merge_bounds);
        }
    }

    series
        .iter()
        .map(|values| reduce_values(values))
        .fold(None, merge_bounds)
}

fn validate_fixed_bounds(min: Option<f64>, max: Option<f64>) -> ScaleResult<()> {
    for value in [min, max].into_iter().flatten() {
        if !value.is_finite() {
            return Err(ScaleError::InvalidData(
                "fixed bounds must be finite".to_owned(),
            ));
        }
    }
    if let (Some(low), Some(high)) = (min, max) {
        if low > high {
            return Err(ScaleError::InvertedBounds { low, high });
        }
    }
    Ok(())
}

fn validate_extent(key: &ViewKey, extent: ViewExtent) -> ScaleResult<()> {
    let ViewExtent::Span { start, end } = extent else {
        return Ok(());
    };
    if !start.is_finite() || !end.is_finite() {
        return Err(ScaleError::InvalidData(format!(
            "extent of view `{key}` must be finite"
        )));
    }
    if start > end {
        return Err(ScaleError::InvertedBounds {
            low: start,
            high: end,
        });
    }
    Ok(())
}
