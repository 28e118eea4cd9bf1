use tracing::debug;

use crate::core::{
    Domain, DomainReconciler, LinearScale, OutputRange, Samples, SubscriptionId, ViewExtent,
    ViewKey,
};
use crate::error::ScaleResult;

use super::{LinearScaleConfig, ScaleModelSnapshot};

/// Linear scale model shared by every view plotted against it.
///
/// Configuration changes are forwarded explicitly into the reconciler: only
/// fields that actually changed reach `set_fixed_bounds` / `set_reversed`.
#[derive(Debug)]
pub struct LinearScaleModel {
    config: LinearScaleConfig,
    reconciler: DomainReconciler,
}

impl Default for LinearScaleModel {
    /// Same state as `LinearScaleModel::new(LinearScaleConfig::default())`.
    fn default() -> Self {
        let config = LinearScaleConfig::default();
        let mut reconciler = DomainReconciler::with_validation(config.validation);
        reconciler.clear_fixed_bounds();
        reconciler.set_reversed(config.reverse);
        Self { config, reconciler }
    }
}

impl LinearScaleModel {
    /// Creates a model and applies the initial fixed bounds and reversal.
    ///
    /// No handler can be registered yet, so the initial recomputation is
    /// silent.
    pub fn new(config: LinearScaleConfig) -> ScaleResult<Self> {
        let mut reconciler = DomainReconciler::with_validation(config.validation);
        reconciler.set_fixed_bounds(config.min, config.max)?;
        reconciler.set_reversed(config.reverse);
        debug!(?config, "linear scale model created");
        Ok(Self { config, reconciler })
    }

    #[must_use]
    pub fn config(&self) -> LinearScaleConfig {
        self.config
    }

    #[must_use]
    pub fn domain(&self) -> Domain {
        self.reconciler.domain()
    }

    #[must_use]
    pub fn reconciler(&self) -> &DomainReconciler {
        &self.reconciler
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reconciler.is_empty()
    }

    pub fn set_min(&mut self, min: Option<f64>) -> ScaleResult<()> {
        self.apply_config(LinearScaleConfig { min, ..self.config })
    }

    pub fn set_max(&mut self, max: Option<f64>) -> ScaleResult<()> {
        self.apply_config(LinearScaleConfig { max, ..self.config })
    }

    pub fn set_reverse(&mut self, reverse: bool) -> ScaleResult<()> {
        self.apply_config(LinearScaleConfig {
            reverse,
            ..self.config
        })
    }

    /// Forwards the fields that differ from the current configuration.
    ///
    /// Bounds are applied before reversal, so a call changing both may
    /// notify twice: once for the recomputed bounds and once for the
    /// reversal. Bounds are validated under the incoming validation mode; a
    /// rejection leaves the previous configuration, validation mode
    /// included, in place.
    pub fn apply_config(&mut self, config: LinearScaleConfig) -> ScaleResult<()> {
        let previous_validation = self.config.validation;
        if config.validation != previous_validation {
            self.reconciler.set_validation_mode(config.validation);
        }
        if config.min != self.config.min || config.max != self.config.max {
            if let Err(err) = self.reconciler.set_fixed_bounds(config.min, config.max) {
                self.reconciler.set_validation_mode(previous_validation);
                return Err(err);
            }
            self.config.min = config.min;
            self.config.max = config.max;
        }
        self.config.validation = config.validation;
        if config.reverse != self.config.reverse {
            self.reconciler.set_reversed(config.reverse);
            self.config.reverse = config.reverse;
        }
        Ok(())
    }

    pub fn set_view_extent(
        &mut self,
        key: impl Into<ViewKey>,
        extent: ViewExtent,
    ) -> ScaleResult<()> {
        self.reconciler.set_view_extent(key, extent)
    }

    pub fn compute_and_set_extent_from_samples(
        &mut self,
        key: impl Into<ViewKey>,
        samples: &Samples,
    ) -> ScaleResult<()> {
        self.reconciler
            .compute_and_set_extent_from_samples(key, samples)
    }

    pub fn remove_view(&mut self, key: &ViewKey) -> bool {
        self.reconciler.remove_view(key)
    }

    pub fn on_domain_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&Domain) + 'static,
    {
        self.reconciler.on_domain_changed(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.reconciler.unsubscribe(id)
    }

    /// Linear mapping of the current domain onto `range`.
    pub fn scale(&self, range: OutputRange) -> ScaleResult<LinearScale> {
        LinearScale::from_domain(self.reconciler.domain(), range)
    }

    #[must_use]
    pub fn snapshot(&self) -> ScaleModelSnapshot {
        ScaleModelSnapshot {
            config: self.config,
            domain: self.reconciler.domain(),
            views: self
                .reconciler
                .views()
                .map(|(key, extent)| (key.clone(), extent))
                .collect(),
        }
    }
}
